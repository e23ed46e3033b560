// Battle field: owns every battle object and runs the per-tick update

use std::sync::Arc;

use glam::Vec2;

use crate::common::{math, Direction};
use crate::engine::animation::AnimationLibrary;
use crate::engine::random::GameRng;
use crate::engine::renderer::{DrawList, SpriteQuad};
use crate::engine::sprites::{ids, DEAD_CLIP};

use super::character::{BattleCharacter, CharacterId};
use super::character_info::Archetype;
use super::fx::{BattleFx, FxSystem};
use super::particle::{BattleParticle, ParticleSystem};
use super::projectile::BattleProjectile;
use super::services::BattleServices;
use super::skill::Skill;

/// Hit-stun inflicted on the player by any hit
pub const PLAYER_HITSTUN: u32 = 60;
/// Hit-stun added to a monster per projectile hit
pub const MONSTER_HITSTUN: u32 = 1;
/// Particles sprayed per hit
const HIT_PARTICLES: u32 = 10;
const HIT_PARTICLE_SCALE: f32 = 0.2;
const HIT_PARTICLE_GRAVITY: Vec2 = Vec2::new(0.0, -0.2);
/// Projectiles this far outside the stage are discarded
const PROJECTILE_ESCAPE_MARGIN: f32 = 200.0;
/// Horizontal offset of the shadow partner's copy of the player
const SHADOW_OFFSET: f32 = 8.0;
const SHADOW_ALPHA: f32 = 0.1;

/// Playable extents of the stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub left: f32,
    pub right: f32,
    pub floor: f32,
}

impl FieldBounds {
    pub const fn new(left: f32, right: f32, floor: f32) -> Self {
        Self { left, right, floor }
    }

    pub fn clamp_x(&self, x: f32) -> f32 {
        math::clamp(x, self.left, self.right)
    }

    /// Keep `pos` between the walls and on or above the floor
    pub fn clamp_to_bounds(&self, pos: Vec2) -> Vec2 {
        Vec2::new(self.clamp_x(pos.x), pos.y.max(self.floor))
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Far enough outside the stage that nothing will come back
    fn is_escaped(&self, pos: Vec2) -> bool {
        pos.x < self.left - PROJECTILE_ESCAPE_MARGIN
            || pos.x > self.right + PROJECTILE_ESCAPE_MARGIN
            || pos.y < self.floor - PROJECTILE_ESCAPE_MARGIN
    }
}

/// The arena and everything in it
#[derive(Debug)]
pub struct BattleField {
    characters: Vec<BattleCharacter>,
    projectiles: Vec<BattleProjectile>,
    particles: ParticleSystem,
    effects: FxSystem,
    bounds: FieldBounds,
    player_index: Option<CharacterId>,
    last_enemy_hit: Option<CharacterId>,
    library: Arc<AnimationLibrary>,
}

impl BattleField {
    pub fn new(library: Arc<AnimationLibrary>, bounds: FieldBounds) -> Self {
        Self {
            characters: Vec::new(),
            projectiles: Vec::new(),
            particles: ParticleSystem::new(),
            effects: FxSystem::new(),
            bounds,
            player_index: None,
            last_enemy_hit: None,
            library,
        }
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: FieldBounds) {
        self.bounds = bounds;
    }

    pub fn library(&self) -> &AnimationLibrary {
        &self.library
    }

    /// Remove every object and forget the player
    pub fn clear(&mut self) {
        self.characters.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.effects.clear();
        self.player_index = None;
        self.last_enemy_hit = None;
    }

    /// Add a character and give it its archetype's controller
    pub fn spawn_character(&mut self, archetype: Archetype, pos: Vec2, rng: &mut GameRng) -> CharacterId {
        let id = self.characters.len();
        let mut character = BattleCharacter::new(id, archetype, pos, &self.library);
        character.controller = archetype.info().controller.map(|factory| factory(rng));
        self.characters.push(character);
        log::debug!("Spawned {} #{id} at ({:.1}, {:.1})", archetype.info().name, pos.x, pos.y);
        id
    }

    /// Add a projectile with default attributes using sprite `sprite_id`
    pub fn spawn_projectile(&mut self, sprite_id: u32) -> &mut BattleProjectile {
        self.projectiles.push(BattleProjectile::new(self.library.get(sprite_id)));
        let last = self.projectiles.len() - 1;
        &mut self.projectiles[last]
    }

    /// Add a one-shot effect; attach it to make `pos` owner-relative
    pub fn spawn_fx(&mut self, sprite_id: u32, dir: Direction, pos: Vec2) -> &mut BattleFx {
        self.effects
            .spawn(self.library.get(sprite_id), dir, pos, DEAD_CLIP)
    }

    pub fn emit_particle(&mut self, sprite_id: u32, pos: Vec2, vel: Vec2, scale: f32) -> &mut BattleParticle {
        self.particles
            .emit(self.library.get(sprite_id), pos, vel, scale)
    }

    pub fn characters(&self) -> &[BattleCharacter] {
        &self.characters
    }

    /// # Panics
    /// If `id` does not name a spawned character.
    pub fn character(&self, id: CharacterId) -> &BattleCharacter {
        &self.characters[id]
    }

    /// # Panics
    /// If `id` does not name a spawned character.
    pub fn character_mut(&mut self, id: CharacterId) -> &mut BattleCharacter {
        &mut self.characters[id]
    }

    pub fn projectiles(&self) -> &[BattleProjectile] {
        &self.projectiles
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn effects(&self) -> &FxSystem {
        &self.effects
    }

    /// # Panics
    /// If `id` does not name a spawned character.
    pub fn set_player_index(&mut self, id: CharacterId) {
        assert!(
            id < self.characters.len(),
            "player index {id} out of range ({} characters)",
            self.characters.len()
        );
        self.player_index = Some(id);
    }

    pub fn has_player(&self) -> bool {
        self.player_index.is_some()
    }

    /// # Panics
    /// If no player has been designated.
    pub fn player_index(&self) -> CharacterId {
        match self.player_index {
            Some(id) => id,
            None => panic!("battle field has no player; call set_player_index first"),
        }
    }

    /// # Panics
    /// If no player has been designated.
    pub fn player(&self) -> &BattleCharacter {
        &self.characters[self.player_index()]
    }

    /// # Panics
    /// If no player has been designated.
    pub fn player_mut(&mut self) -> &mut BattleCharacter {
        let id = self.player_index();
        &mut self.characters[id]
    }

    /// Monster most recently struck by a projectile
    pub fn last_enemy_hit(&self) -> Option<&BattleCharacter> {
        self.last_enemy_hit.map(|id| &self.characters[id])
    }

    /// Whether any character other than the player is still alive
    pub fn hostiles_alive(&self) -> bool {
        let player = self.player_index;
        self.characters
            .iter()
            .any(|c| c.alive && Some(c.id) != player)
    }

    /// Experience awarded for this encounter
    pub fn calc_exp_value(&self) -> i32 {
        self.characters.iter().map(|c| c.info.exp).sum()
    }

    /// Use `skill` if its owner is allowed to, locking them for its cast time
    pub fn use_skill(&mut self, owner: CharacterId, skill: &mut dyn Skill, services: &mut BattleServices<'_>) -> bool {
        if !skill.can_use(&self.characters[owner]) {
            return false;
        }

        skill.activate(self, owner, services);
        self.characters[owner].begin_skill(skill.kind(), skill.cast_time());
        log::debug!("#{owner} used {}", skill.name());
        true
    }

    /// Fire the skill's effect with no checks and no lock
    pub fn use_skill_unconditionally(
        &mut self,
        owner: CharacterId,
        skill: &mut dyn Skill,
        services: &mut BattleServices<'_>,
    ) {
        skill.activate(self, owner, services);
    }

    /// Snap every character onto the floor with no interpolation
    pub fn settle(&mut self) {
        let floor = self.bounds.floor;
        for c in &mut self.characters {
            c.init_position(floor);
        }
    }

    /// Advance the whole field one tick.
    ///
    /// With `skip_think` set, controllers are not consulted (used while the
    /// battle is fading in).
    ///
    /// # Panics
    /// If no player has been designated.
    pub fn update(&mut self, skip_think: bool, services: &mut BattleServices<'_>) {
        let player = self.player_index();

        // Think, move and touch run per character, so a later character sees
        // earlier ones already moved this tick
        for i in 0..self.characters.len() {
            if !skip_think && self.characters[i].alive {
                if let Some(mut controller) = self.characters[i].controller.take() {
                    controller.think(i, self, services);
                    self.characters[i].controller = Some(controller);
                }
            }

            let bounds = self.bounds;
            let c = &mut self.characters[i];
            c.update(bounds.floor);
            c.pos.x = bounds.clamp_x(c.pos.x);

            if !c.alive || i == player {
                continue;
            }

            self.resolve_contact(i, player, services);
        }

        // Scripts may spawn into the emptied list; those join next tick
        let mut projectiles = std::mem::take(&mut self.projectiles);
        for p in &mut projectiles {
            p.update(self, services);
            self.resolve_projectile_hits(p, player, services);

            if self.bounds.is_escaped(p.pos) {
                p.kill();
            }
        }
        projectiles.append(&mut self.projectiles);
        projectiles.retain(|p| p.alive);
        self.projectiles = projectiles;

        self.particles.update(self.bounds.floor);
        self.effects.update();
    }

    /// Body contact between monster `attacker` and the player
    fn resolve_contact(&mut self, attacker: CharacterId, player: CharacterId, services: &mut BattleServices<'_>) {
        if self.characters[player].hitstun_frames > 0 {
            return;
        }

        let attacker_box = self.characters[attacker].worldspace_hitbox();
        let player_box = self.characters[player].worldspace_hitbox();
        if !attacker_box.intersects(&player_box) {
            return;
        }

        let attacker_vel = self.characters[attacker].vel;
        services.play_sound(self.characters[attacker].info.hurt_sound);

        let target = &mut self.characters[player];
        target.hitstun_frames += PLAYER_HITSTUN;
        target.vel += Vec2::new(attacker_vel.x, 0.0) + Vec2::new(0.0, 3.0);
        target.hurt(1);
        let particle_sprite = target.info.hurt_particle_sprite_id;
        log::trace!("#{attacker} touched the player, life {}", target.life);

        self.spray_hit_particles(particle_sprite, player_box.center(), attacker_vel, services);
    }

    /// Projectile `p` against every character on the opposing side
    fn resolve_projectile_hits(
        &mut self,
        p: &mut BattleProjectile,
        player: CharacterId,
        services: &mut BattleServices<'_>,
    ) {
        debug_assert!(p.owner.is_some(), "projectile fired without an owner");
        let monster_owned = p.owner != Some(player);
        let proj_rect = p.worldspace_hitbox();

        for i in 0..self.characters.len() {
            if !p.alive {
                break;
            }

            let is_player = i == player;
            if is_player != monster_owned {
                continue;
            }

            let c = &self.characters[i];
            if c.hitstun_frames > 0 {
                continue;
            }

            let char_rect = c.worldspace_hitbox();
            if !proj_rect.intersects(&char_rect) {
                continue;
            }

            services.play_sound(c.info.hurt_sound);
            let particle_sprite = c.info.hurt_particle_sprite_id;
            self.spray_hit_particles(particle_sprite, char_rect.center(), -p.vel, services);

            let (spark_dir, spark_offset) = if proj_rect.x <= char_rect.x {
                (Direction::Right, Vec2::new(-12.0, 0.0))
            } else {
                (Direction::Left, Vec2::new(12.0, 0.0))
            };
            self.spawn_fx(ids::HIT_SPARK_FX, spark_dir, spark_offset).attach(i);

            let c = &mut self.characters[i];
            if is_player {
                c.hitstun_frames += PLAYER_HITSTUN;
                c.vel += p.vel + Vec2::new(0.0, 1.0);
            } else {
                c.hitstun_frames += MONSTER_HITSTUN;
                c.vel += p.vel.normalize_or_zero() + Vec2::new(0.0, 1.0) * c.hitstun_frames as f32;
                self.last_enemy_hit = Some(i);
            }

            if p.pierce > 0 {
                p.pierce -= 1;
            } else {
                p.kill();
            }

            let c = &mut self.characters[i];
            c.hurt(p.power);
            log::trace!("projectile struck #{i} for {}, life {}", p.power, c.life);
        }
    }

    /// Burst of hurt particles; `impact_vel` is the velocity of whatever hit
    fn spray_hit_particles(&mut self, sprite_id: u32, pos: Vec2, impact_vel: Vec2, services: &mut BattleServices<'_>) {
        for _ in 0..HIT_PARTICLES {
            let vel = impact_vel * 0.25 + services.rng.rand_vec2(-1.0, 1.0);
            self.emit_particle(sprite_id, pos, vel, HIT_PARTICLE_SCALE).acc = HIT_PARTICLE_GRAVITY;
        }
    }

    /// Snapshot of everything visible, interpolated by `alpha`
    pub fn draw_list(&self, alpha: f32, shadow_partner: bool) -> DrawList {
        let mut list = DrawList::new();

        for (i, c) in self.characters.iter().enumerate() {
            let Some(src) = c.anim.current_rect() else {
                continue;
            };

            let is_player = self.player_index == Some(i);
            let flash = if c.hitstun_frames == 0 {
                false
            } else if is_player {
                c.hitstun_frames % 4 == 0
            } else {
                true
            };

            let dest = c.worldspace_interp_rect(alpha);
            let flip = c.facing.should_flip();

            if is_player && shadow_partner {
                let mut shadow = dest;
                shadow.x += if c.facing == Direction::Left {
                    SHADOW_OFFSET
                } else {
                    -SHADOW_OFFSET
                };
                list.characters.push(
                    SpriteQuad::new(shadow, src)
                        .with_flip(flip)
                        .with_alpha(SHADOW_ALPHA),
                );
            }

            list.characters
                .push(SpriteQuad::new(dest, src).with_flip(flip).with_flash(flash));
        }

        for p in &self.projectiles {
            if let Some(src) = p.anim.current_rect() {
                list.projectiles.push(
                    SpriteQuad::new(p.worldspace_interp_rect(alpha), src)
                        .with_rotation(p.interp_angle(alpha))
                        .with_flip(p.dir.should_flip()),
                );
            }
        }

        for fx in self.effects.iter() {
            if let Some(src) = fx.anim.current_rect() {
                list.effects.push(
                    SpriteQuad::new(fx.worldspace_interp_rect(alpha, &self.characters), src)
                        .with_flip(fx.dir.should_flip()),
                );
            }
        }

        for particle in self.particles.iter() {
            if let Some(src) = particle.anim.current_rect() {
                list.particles
                    .push(SpriteQuad::new(particle.worldspace_interp_rect(alpha), src));
            }
        }

        list
    }

    /// Empty field on a wide, flat stage at y = 0
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self::new(
            Arc::new(crate::engine::sprites::standard_library()),
            FieldBounds::new(-1000.0, 1000.0, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::RecordingAudio;
    use crate::game::battle::skill::DoubleThrow;
    use approx::assert_abs_diff_eq;

    struct Harness {
        field: BattleField,
        audio: RecordingAudio,
        rng: GameRng,
    }

    impl Harness {
        /// Player at the origin, nothing else
        fn new() -> Self {
            let mut rng = GameRng::seeded(42);
            let mut field = BattleField::for_tests();
            let player = field.spawn_character(Archetype::Player, Vec2::ZERO, &mut rng);
            field.set_player_index(player);
            Self {
                field,
                audio: RecordingAudio::new(),
                rng,
            }
        }

        fn spawn(&mut self, archetype: Archetype, pos: Vec2) -> CharacterId {
            self.field.spawn_character(archetype, pos, &mut self.rng)
        }

        fn tick(&mut self, skip_think: bool) {
            let mut services = BattleServices::new(&mut self.audio, &mut self.rng);
            self.field.update(skip_think, &mut services);
        }

        fn fire(&mut self, owner: CharacterId, pos: Vec2, vel: Vec2) {
            let p = self.field.spawn_projectile(ids::SPIKE);
            p.set_position(pos);
            p.vel = vel;
            p.owner = Some(owner);
        }
    }

    #[test]
    fn test_bounds_clamping() {
        let bounds = FieldBounds::new(0.0, 100.0, 10.0);
        assert_eq!(bounds.clamp_to_bounds(Vec2::new(-5.0, 0.0)), Vec2::new(0.0, 10.0));
        assert_eq!(bounds.clamp_to_bounds(Vec2::new(50.0, 40.0)), Vec2::new(50.0, 40.0));
        assert_eq!(bounds.center_x(), 50.0);
    }

    #[test]
    fn test_spawn_assigns_ids_and_controllers() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(50.0, 0.0));
        assert_eq!(slime, 1);
        assert!(h.field.character(slime).controller.is_some());
        assert!(h.field.player().controller.is_none());
    }

    #[test]
    #[should_panic(expected = "no player")]
    fn test_player_before_set_panics() {
        let field = BattleField::for_tests();
        let _ = field.player();
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_set_player_index_out_of_range() {
        let mut field = BattleField::for_tests();
        field.set_player_index(3);
    }

    #[test]
    fn test_gravity_never_sinks_below_floor() {
        let mut h = Harness::new();
        h.field.player_mut().warp(Vec2::new(0.0, 50.0));
        for _ in 0..120 {
            h.tick(true);
            assert!(h.field.player().pos.y >= 0.0);
        }
        let player = h.field.player();
        assert!(player.grounded);
        assert_eq!(player.vel.y, 0.0);
    }

    #[test]
    fn test_characters_clamped_to_bounds() {
        let mut h = Harness::new();
        h.field.player_mut().vel.x = -5000.0;
        h.tick(true);
        assert_eq!(h.field.player().pos.x, -1000.0);
    }

    #[test]
    fn test_new_bounds_apply_next_tick() {
        let mut h = Harness::new();
        h.field.player_mut().warp(Vec2::new(40.0, 0.0));
        h.field.set_bounds(FieldBounds::new(-20.0, 20.0, 0.0));
        h.tick(true);
        assert_eq!(h.field.player().pos.x, 20.0);
        assert_eq!(h.field.bounds().right, 20.0);
    }

    #[test]
    fn test_projectile_kills_monster_and_dies() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(50.0, 0.0));
        h.field.character_mut(slime).life = 1;
        h.fire(0, Vec2::new(50.0, 0.0), Vec2::ZERO);

        h.tick(true);

        let monster = h.field.character(slime);
        assert!(!monster.alive);
        assert_eq!(monster.life, 0);
        assert!(h.field.projectiles().is_empty());
        assert!(!h.field.hostiles_alive());
        assert_eq!(h.field.last_enemy_hit().map(|c| c.id), Some(slime));
    }

    #[test]
    fn test_projectile_hit_effects() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(50.0, 0.0));
        h.fire(0, Vec2::new(50.0, 0.0), Vec2::ZERO);

        h.tick(true);

        let monster = h.field.character(slime);
        assert_eq!(monster.life, 4);
        assert!(monster.hitstun_frames > 0);
        assert_eq!(h.audio.count("slime0"), 1);
        assert_eq!(h.field.particles().len(), 10);
        assert_eq!(h.field.effects().len(), 1);

        h.tick(true);
        assert!(h.field.projectiles().is_empty());
    }

    #[test]
    fn test_hitstun_gates_second_hit() {
        let mut h = Harness::new();
        let skeleton = h.spawn(Archetype::Skeleton, Vec2::new(50.0, 0.0));
        h.field.character_mut(skeleton).hitstun_frames = 5;
        h.fire(0, Vec2::new(50.0, 0.0), Vec2::ZERO);

        h.tick(true);

        assert_eq!(h.field.character(skeleton).life, 15);
        assert_eq!(h.field.projectiles().len(), 1);
    }

    #[test]
    fn test_pierce_passes_through() {
        let mut h = Harness::new();
        let a = h.spawn(Archetype::Skeleton, Vec2::new(50.0, 0.0));
        let b = h.spawn(Archetype::Skeleton, Vec2::new(52.0, 0.0));
        h.fire(0, Vec2::new(51.0, 0.0), Vec2::ZERO);
        h.field.projectiles[0].pierce = 1;

        h.tick(true);

        assert_eq!(h.field.character(a).life, 14);
        assert_eq!(h.field.character(b).life, 14);
        assert!(h.field.projectiles().is_empty());
    }

    #[test]
    fn test_pierce_two_dies_on_third_hit() {
        let mut h = Harness::new();
        let a = h.spawn(Archetype::Skeleton, Vec2::new(50.0, 0.0));
        let b = h.spawn(Archetype::Skeleton, Vec2::new(52.0, 0.0));
        h.fire(0, Vec2::new(51.0, 0.0), Vec2::ZERO);
        h.field.projectiles[0].pierce = 2;

        h.tick(true);

        assert_eq!(h.field.character(a).life, 14);
        assert_eq!(h.field.character(b).life, 14);
        assert_eq!(h.field.projectiles().len(), 1);
        assert_eq!(h.field.projectiles()[0].pierce, 0);

        let mut h = Harness::new();
        let targets = [50.0, 52.0, 54.0].map(|x| h.spawn(Archetype::Skeleton, Vec2::new(x, 0.0)));
        h.fire(0, Vec2::new(52.0, 0.0), Vec2::ZERO);
        h.field.projectiles[0].pierce = 2;

        h.tick(true);

        for id in targets {
            assert_eq!(h.field.character(id).life, 14);
        }
        assert!(h.field.projectiles().is_empty());
    }

    #[test]
    fn test_friendly_fire_ignored() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(50.0, 0.0));
        let other = h.spawn(Archetype::Slime, Vec2::new(80.0, 0.0));
        // Monster projectile over another monster
        h.fire(slime, Vec2::new(80.0, 0.0), Vec2::ZERO);
        // Player projectile over the player
        h.fire(0, Vec2::ZERO, Vec2::ZERO);

        h.tick(true);

        assert_eq!(h.field.character(other).life, 5);
        assert_eq!(h.field.player().life, 5);
        assert_eq!(h.field.projectiles().len(), 2);
    }

    #[test]
    fn test_monster_projectile_hurts_player() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(300.0, 0.0));
        h.fire(slime, Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0));

        h.tick(true);

        let player = h.field.player();
        assert_eq!(player.life, 4);
        assert_eq!(player.hitstun_frames, PLAYER_HITSTUN);
        assert_abs_diff_eq!(player.vel.x, 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(player.vel.y, 1.0, epsilon = 1e-5);
        assert_eq!(h.audio.count("stab"), 1);
    }

    #[test]
    fn test_contact_damage_and_stun() {
        let mut h = Harness::new();
        h.spawn(Archetype::Skeleton, Vec2::new(4.0, 0.0));

        h.tick(true);
        let player = h.field.player();
        assert_eq!(player.life, 4);
        assert_eq!(player.hitstun_frames, PLAYER_HITSTUN);
        assert_eq!(h.audio.count("bone"), 1);

        // Stunned: no further contact damage
        h.tick(true);
        assert_eq!(h.field.player().life, 4);
    }

    #[test]
    fn test_dead_monsters_do_not_touch() {
        let mut h = Harness::new();
        let skeleton = h.spawn(Archetype::Skeleton, Vec2::new(4.0, 0.0));
        h.field.character_mut(skeleton).kill();
        h.tick(true);
        assert_eq!(h.field.player().life, 5);
    }

    #[test]
    fn test_escaped_projectiles_removed() {
        let mut h = Harness::new();
        h.fire(0, Vec2::new(1199.0, 100.0), Vec2::new(5.0, 0.0));
        h.fire(0, Vec2::new(0.0, -199.0), Vec2::new(0.0, -5.0));
        h.fire(0, Vec2::new(0.0, 100.0), Vec2::ZERO);
        h.tick(true);
        assert_eq!(h.field.projectiles().len(), 1);

        // Parked past the left wall, no velocity needed
        h.fire(0, Vec2::new(-1201.0, 100.0), Vec2::ZERO);
        h.tick(true);
        assert_eq!(h.field.projectiles().len(), 1);
        assert_eq!(h.field.projectiles()[0].pos, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_cast_lock_blocks_skills_for_cast_time() {
        let mut h = Harness::new();
        let mut skill = DoubleThrow::new();
        let mut services = BattleServices::new(&mut h.audio, &mut h.rng);
        assert!(h.field.use_skill(0, &mut skill, &mut services));

        for _ in 0..11 {
            h.field.update(true, &mut services);
            assert!(!h.field.use_skill(0, &mut skill, &mut services));
        }
        h.field.update(true, &mut services);
        assert!(h.field.use_skill(0, &mut skill, &mut services));
    }

    #[test]
    fn test_skip_think_freezes_ai() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(300.0, 0.0));
        h.tick(true);
        assert_eq!(h.field.character(slime).vel.x, 0.0);
        h.tick(false);
        assert!(h.field.character(slime).vel.x < 0.0);
    }

    #[test]
    fn test_exp_value_and_hostiles() {
        let mut h = Harness::new();
        assert!(!h.field.hostiles_alive());
        h.spawn(Archetype::Slime, Vec2::new(300.0, 0.0));
        h.spawn(Archetype::Ghost, Vec2::new(400.0, 0.0));
        assert!(h.field.hostiles_alive());
        assert_eq!(h.field.calc_exp_value(), 11);
    }

    #[test]
    fn test_settle_snaps_to_floor() {
        let mut h = Harness::new();
        let bat = h.spawn(Archetype::Bat, Vec2::new(300.0, 90.0));
        h.field.settle();
        let bat = h.field.character(bat);
        assert_eq!(bat.pos.y, 0.0);
        assert_eq!(bat.prev_pos, bat.pos);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut h = Harness::new();
        h.fire(0, Vec2::ZERO, Vec2::ZERO);
        h.field.clear();
        assert!(h.field.characters().is_empty());
        assert!(h.field.projectiles().is_empty());
        assert!(!h.field.has_player());
    }

    #[test]
    fn test_draw_list_flash_rules() {
        let mut h = Harness::new();
        let slime = h.spawn(Archetype::Slime, Vec2::new(300.0, 0.0));
        h.field.player_mut().hitstun_frames = 7;
        h.field.character_mut(slime).hitstun_frames = 7;

        let list = h.field.draw_list(1.0, false);
        assert_eq!(list.characters.len(), 2);
        assert_eq!(list.characters[0].flash, 0);
        assert_eq!(list.characters[1].flash, 1);

        h.field.player_mut().hitstun_frames = 8;
        let list = h.field.draw_list(1.0, false);
        assert_eq!(list.characters[0].flash, 1);
    }

    #[test]
    fn test_draw_list_shadow_partner() {
        let mut h = Harness::new();
        h.field.player_mut().facing = Direction::Left;
        let list = h.field.draw_list(1.0, true);
        assert_eq!(list.characters.len(), 2);
        let shadow = list.characters[0];
        let body = list.characters[1];
        assert_abs_diff_eq!(shadow.dest[0] - body.dest[0], 8.0, epsilon = 1e-5);
        assert_abs_diff_eq!(shadow.alpha, 0.1, epsilon = 1e-5);
        assert_eq!(shadow.flip, 1);
    }

    #[test]
    fn test_thrown_spike_wounds_monster() {
        let mut rng = GameRng::seeded(7);
        let mut field = BattleField::for_tests();
        let player = field.spawn_character(Archetype::Player, Vec2::ZERO, &mut rng);
        let monster = field.spawn_character(Archetype::Slime, Vec2::new(50.0, 0.0), &mut rng);
        field.set_player_index(player);

        let p = field.spawn_projectile(ids::SPIKE);
        p.set_position(Vec2::new(50.0, 0.0));
        p.owner = Some(player);

        let mut audio = RecordingAudio::new();
        let mut services = BattleServices::new(&mut audio, &mut rng);
        field.update(true, &mut services);

        assert_eq!(field.character(monster).life, 4);
        assert!(field.character(monster).hitstun_frames > 0);

        field.update(true, &mut services);
        assert!(field.projectiles().is_empty());
    }
}
