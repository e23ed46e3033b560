// Player progression, unlocks, and the per-tick player driver

use crate::engine::game_loop::TickTimer;

use super::field::BattleField;
use super::services::BattleServices;
use super::skill::{Avenger, DoubleThrow, FlashJump, Skill};

/// Delay before the shadow partner repeats a throw
pub const DEFAULT_SHADOW_ECHO_DELAY: f64 = 0.1;

/// Level and experience carried between battles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    pub level: i32,
    pub exp: i32,
}

impl PlayerStats {
    pub fn new(level: i32) -> Self {
        Self { level, exp: 0 }
    }

    pub fn max_life(&self) -> i32 {
        5 + (self.level - 1) * 3
    }

    /// Damage dealt by the player's projectiles
    pub fn power(&self) -> i32 {
        (self.level + 5) / 5
    }

    /// Experience needed for the next level
    pub fn exp_to_next_level(&self) -> i32 {
        self.level * 5
    }

    /// Add experience, levelling up as many times as it allows.
    /// Returns the number of levels gained.
    pub fn add_exp(&mut self, amount: i32) -> u32 {
        self.exp += amount;
        let mut gained = 0;
        while self.exp >= self.exp_to_next_level() {
            self.exp -= self.exp_to_next_level();
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            log::info!("Player reached level {}", self.level);
        }
        gained
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(1)
    }
}

/// What the player has unlocked this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerLoadout {
    pub stats: PlayerStats,
    pub has_flash_jump: bool,
    pub has_avenger: bool,
    pub has_shadow_partner: bool,
}

impl PlayerLoadout {
    /// Everything unlocked at the given level
    pub fn unlocked(level: i32) -> Self {
        Self {
            stats: PlayerStats::new(level),
            has_flash_jump: true,
            has_avenger: true,
            has_shadow_partner: true,
        }
    }
}

/// Battle controls for one tick.
///
/// `left`/`right` are held state; `jump`, `skill1` and `skill2` are presses
/// that happened since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BattleInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub skill1: bool,
    pub skill2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShadowEcho {
    DoubleThrow,
    Avenger,
}

/// Drives the player character from input and owns the player's skills
#[derive(Debug)]
pub struct PlayerDriver {
    loadout: PlayerLoadout,
    echo_delay: f64,

    flash_jump: FlashJump,
    double_throw: DoubleThrow,
    avenger: Avenger,

    // The shadow partner's private copies
    shadow_double_throw: DoubleThrow,
    shadow_avenger: Avenger,
    pending_echo: Option<(ShadowEcho, TickTimer)>,
}

impl PlayerDriver {
    pub fn new(loadout: PlayerLoadout, echo_delay: f64) -> Self {
        Self {
            loadout,
            echo_delay,
            flash_jump: FlashJump::new(),
            double_throw: DoubleThrow::new(),
            avenger: Avenger::new(),
            shadow_double_throw: DoubleThrow::new(),
            shadow_avenger: Avenger::new(),
            pending_echo: None,
        }
    }

    pub fn loadout(&self) -> &PlayerLoadout {
        &self.loadout
    }

    /// Apply the presses in `input`. Only call while the player may act.
    pub fn handle_presses(
        &mut self,
        field: &mut BattleField,
        input: &BattleInput,
        now: u32,
        services: &mut BattleServices<'_>,
    ) {
        let player = field.player_index();
        if !field.player().can_act() {
            return;
        }

        if input.jump {
            field.player_mut().jump();
            if self.loadout.has_flash_jump {
                field.use_skill(player, &mut self.flash_jump, services);
            }
        }

        if input.skill1 && field.use_skill(player, &mut self.double_throw, services) {
            self.queue_echo(ShadowEcho::DoubleThrow, now);
        }

        if input.skill2
            && self.loadout.has_avenger
            && field.use_skill(player, &mut self.avenger, services)
        {
            self.queue_echo(ShadowEcho::Avenger, now);
        }
    }

    fn queue_echo(&mut self, echo: ShadowEcho, now: u32) {
        if self.loadout.has_shadow_partner {
            self.pending_echo = Some((echo, TickTimer::from_seconds(now, self.echo_delay)));
        }
    }

    /// Held left/right movement
    pub fn apply_movement(&self, field: &mut BattleField, input: &BattleInput) {
        let player = field.player_mut();
        if !player.can_act() {
            return;
        }

        if input.left {
            player.move_left();
        } else if input.right {
            player.move_right();
        }
    }

    /// Per-tick skill bookkeeping and the shadow partner's delayed repeat
    pub fn update(&mut self, field: &mut BattleField, now: u32, services: &mut BattleServices<'_>) {
        let player = field.player_index();

        self.flash_jump.update(field, player, services);
        self.double_throw.update(field, player, services);
        self.avenger.update(field, player, services);

        self.shadow_double_throw.update(field, player, services);
        self.shadow_avenger.update(field, player, services);

        if let Some((echo, timer)) = self.pending_echo {
            if timer.expired(now) {
                let skill: &mut dyn Skill = match echo {
                    ShadowEcho::DoubleThrow => &mut self.shadow_double_throw,
                    ShadowEcho::Avenger => &mut self.shadow_avenger,
                };
                field.use_skill_unconditionally(player, skill, services);
                self.pending_echo = None;
                log::debug!("Shadow partner echoed {:?}", echo);
            }
        }
    }

    pub fn has_pending_echo(&self) -> bool {
        self.pending_echo.is_some()
    }
}
