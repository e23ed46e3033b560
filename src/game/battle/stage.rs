// Battle stages: static properties and stage mesh loading

use std::path::PathBuf;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::error::{BattleError, Result};
use super::field::FieldBounds;

/// Half the size of a battle object; raw mesh bounds are inset by this
const OBJECT_HALF_SIZE: f32 = 8.0;

/// Static description of a battle stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageProperties {
    pub name: &'static str,
    /// Bounds as drawn in the stage mesh, before inset
    pub raw_bounds: FieldBounds,
    pub light_direction: Vec3,
    pub sky_color: Vec3,
}

impl StageProperties {
    /// Area battle object centers may occupy
    pub fn playable_bounds(&self) -> FieldBounds {
        inset(self.raw_bounds)
    }
}

fn inset(raw: FieldBounds) -> FieldBounds {
    FieldBounds::new(
        raw.left + OBJECT_HALF_SIZE,
        raw.right - OBJECT_HALF_SIZE,
        raw.floor + OBJECT_HALF_SIZE,
    )
}

const STAGE_RAW_BOUNDS: FieldBounds = FieldBounds::new(7.783096, 475.339, 8.890106);

pub static STAGES: [StageProperties; 3] = [
    StageProperties {
        name: "bf_dungeon",
        raw_bounds: STAGE_RAW_BOUNDS,
        light_direction: Vec3::new(0.5, -0.3, -0.8),
        sky_color: Vec3::new(0x14 as f32 / 255.0, 0x0c as f32 / 255.0, 0x1c as f32 / 255.0),
    },
    StageProperties {
        name: "bf_sanctum",
        raw_bounds: STAGE_RAW_BOUNDS,
        light_direction: Vec3::new(0.2, -0.8, -0.2),
        sky_color: Vec3::new(0x59 as f32 / 255.0, 0x7d as f32 / 255.0, 0xce as f32 / 255.0),
    },
    StageProperties {
        name: "bf_lair",
        raw_bounds: STAGE_RAW_BOUNDS,
        light_direction: Vec3::new(0.2, -0.8, -0.2),
        sky_color: Vec3::new(0xd0 as f32 / 255.0, 0x46 as f32 / 255.0, 0x48 as f32 / 255.0),
    },
];

/// Look up a stage by name
pub fn stage(name: &str) -> Result<&'static StageProperties> {
    STAGES
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| BattleError::UnknownStage(name.to_string()))
}

/// Vertex layout of a stage mesh file
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StageVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

/// Stage geometry: render mesh plus the raw floor/wall extents
#[derive(Debug, Clone, Default)]
pub struct StageMesh {
    pub vertices: Vec<StageVertex>,
    pub raw_bounds: Option<FieldBounds>,
}

impl StageMesh {
    /// Decode a stage mesh file.
    ///
    /// Layout (little endian): `u32` vertex count, that many `StageVertex`
    /// records, then `left`, `right`, `floor` as `f32`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        const VERTEX_SIZE: usize = std::mem::size_of::<StageVertex>();
        const BOUNDS_SIZE: usize = 3 * std::mem::size_of::<f32>();

        let count_bytes: [u8; 4] = bytes
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or(BattleError::MalformedStageMesh {
                expected: 4,
                found: bytes.len(),
            })?;
        let count = u32::from_le_bytes(count_bytes) as usize;

        let vertex_end = count.saturating_mul(VERTEX_SIZE).saturating_add(4);
        let expected = vertex_end.saturating_add(BOUNDS_SIZE);
        if bytes.len() < expected {
            return Err(BattleError::MalformedStageMesh { expected, found: bytes.len() });
        }

        let vertices = bytes[4..vertex_end]
            .chunks_exact(VERTEX_SIZE)
            .map(|chunk| {
                let mut v: StageVertex = bytemuck::pod_read_unaligned(chunk);
                // Sheet origin is top-left
                v.tex_coords[1] = 1.0 - v.tex_coords[1];
                v
            })
            .collect();

        let bounds: [f32; 3] = bytemuck::pod_read_unaligned(&bytes[vertex_end..expected]);

        Ok(Self {
            vertices,
            raw_bounds: Some(FieldBounds::new(bounds[0], bounds[1], bounds[2])),
        })
    }

    /// Playable bounds from the mesh, falling back to `props`
    pub fn playable_bounds(&self, props: &StageProperties) -> FieldBounds {
        inset(self.raw_bounds.unwrap_or(props.raw_bounds))
    }
}

/// Supplies stage geometry to a battle session
pub trait StageGeometrySource {
    fn load(&mut self, props: &StageProperties) -> Result<StageMesh>;
}

/// No mesh data; bounds come from the stage table
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinStages;

impl StageGeometrySource for BuiltinStages {
    fn load(&mut self, props: &StageProperties) -> Result<StageMesh> {
        Ok(StageMesh {
            vertices: Vec::new(),
            raw_bounds: Some(props.raw_bounds),
        })
    }
}

/// Reads `<root>/models/<stage>.bin`, caching each stage after first load
#[derive(Debug)]
pub struct MeshFileSource {
    root: PathBuf,
    cache: Vec<(&'static str, StageMesh)>,
}

impl MeshFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Vec::new(),
        }
    }

    pub fn mesh_path(&self, name: &str) -> PathBuf {
        self.root.join("models").join(format!("{name}.bin"))
    }
}

impl StageGeometrySource for MeshFileSource {
    fn load(&mut self, props: &StageProperties) -> Result<StageMesh> {
        if let Some((_, mesh)) = self.cache.iter().find(|(name, _)| *name == props.name) {
            return Ok(mesh.clone());
        }

        let path = self.mesh_path(props.name);
        let bytes = std::fs::read(&path)?;
        let mesh = StageMesh::parse(&bytes)?;
        log::info!("Loaded stage mesh {} ({} vertices)", path.display(), mesh.vertices.len());

        self.cache.push((props.name, mesh.clone()));
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mesh_bytes(vertices: &[StageVertex], bounds: [f32; 3]) -> Vec<u8> {
        let mut bytes = (vertices.len() as u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(bytemuck::cast_slice(vertices));
        bytes.extend_from_slice(bytemuck::cast_slice(&bounds));
        bytes
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(stage("bf_lair").map(|s| s.name).ok(), Some("bf_lair"));
        assert!(matches!(stage("bf_moon"), Err(BattleError::UnknownStage(name)) if name == "bf_moon"));
    }

    #[test]
    fn test_playable_bounds_inset() {
        let bounds = stage("bf_dungeon").expect("known stage").playable_bounds();
        assert_abs_diff_eq!(bounds.left, 15.783096, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.right, 467.339, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.floor, 16.890106, epsilon = 1e-4);
    }

    #[test]
    fn test_sky_colors_differ() {
        assert_ne!(STAGES[0].sky_color, STAGES[1].sky_color);
        assert_abs_diff_eq!(STAGES[2].sky_color.x, 0xd0 as f32 / 255.0);
    }

    #[test]
    fn test_parse_mesh() {
        let vertex = StageVertex {
            position: [1.0, 2.0, 3.0],
            tex_coords: [0.25, 0.25],
            normal: [0.0, 1.0, 0.0],
        };
        let bytes = mesh_bytes(&[vertex, vertex], [0.0, 100.0, 4.0]);

        let mesh = StageMesh::parse(&bytes).expect("valid mesh");
        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.vertices[0].position, [1.0, 2.0, 3.0]);
        assert_abs_diff_eq!(mesh.vertices[1].tex_coords[1], 0.75);
        assert_eq!(mesh.raw_bounds, Some(FieldBounds::new(0.0, 100.0, 4.0)));

        let bounds = mesh.playable_bounds(&STAGES[0]);
        assert_eq!(bounds, FieldBounds::new(8.0, 92.0, 12.0));
    }

    #[test]
    fn test_parse_truncated_mesh() {
        let mut bytes = mesh_bytes(&[StageVertex::zeroed()], [0.0, 1.0, 2.0]);
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            StageMesh::parse(&bytes),
            Err(BattleError::MalformedStageMesh { .. })
        ));
        assert!(StageMesh::parse(&[1, 0]).is_err());
    }

    #[test]
    fn test_builtin_source_uses_table_bounds() {
        let mut source = BuiltinStages;
        let mesh = source.load(&STAGES[1]).expect("builtin");
        assert!(mesh.vertices.is_empty());
        assert_eq!(mesh.playable_bounds(&STAGES[1]), STAGES[1].playable_bounds());
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = MeshFileSource::new("/nonexistent/assets");
        assert!(source.mesh_path("bf_lair").ends_with("models/bf_lair.bin"));
        assert!(matches!(source.load(&STAGES[2]), Err(BattleError::Io(_))));
    }
}
