//! Noise-driven ground chunks on a regular unit grid.
//!
//! Vertices sit at integer (x, z); `x` runs along a chunk row and `z` counts
//! rows. Heights come from a [`NoiseField`] with low ground raised to a sea
//! floor, then divided down to keep the relief gentle.
//!
//! Chunks are sampled in world coordinates, so two neighbouring chunks built
//! from the same seed share their common edge exactly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ProcgenError, Result};
use crate::mesh::Mesh;
use crate::noise_field::NoiseField;

/// Configuration for noise ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Seed for the noise permutation.
    pub seed: u32,
    /// Vertices per row.
    pub chunk_width: u32,
    /// Vertex rows.
    pub chunk_height: u32,
    /// Height scale applied to the raw noise.
    pub mesh_height: f32,
    /// Water threshold as a fraction of `mesh_height`; half of it is the sea floor.
    pub water_level: f32,
    /// Final divisor on every height.
    pub height_divisor: f32,
    /// Z slice of the 3D noise the ground is cut from.
    pub noise_z: f64,
    /// Grid-to-noise coordinate scale (lower = smoother).
    pub frequency: f64,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            seed: 112,
            chunk_width: 12,
            chunk_height: 12,
            mesh_height: 1.0,
            water_level: 0.1,
            height_divisor: 20.0,
            noise_z: 0.8,
            frequency: 1.0,
        }
    }
}

impl GroundConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_width < 2 || self.chunk_height < 2 {
            return Err(ProcgenError::invalid(
                "chunk size",
                format!(
                    "need at least 2x2 vertices, got {}x{}",
                    self.chunk_width, self.chunk_height
                ),
            ));
        }
        if !(self.mesh_height > 0.0) || !self.mesh_height.is_finite() {
            return Err(ProcgenError::invalid(
                "mesh_height",
                format!("must be positive and finite, got {}", self.mesh_height),
            ));
        }
        if !(self.height_divisor > 0.0) || !self.height_divisor.is_finite() {
            return Err(ProcgenError::invalid(
                "height_divisor",
                format!("must be positive and finite, got {}", self.height_divisor),
            ));
        }
        // Sand starts at 0.15, so water must stay below it for the palette to ascend.
        if !(self.water_level > 0.0 && self.water_level < 0.15) {
            return Err(ProcgenError::invalid(
                "water_level",
                format!("must be in (0, 0.15), got {}", self.water_level),
            ));
        }
        if !(self.frequency > 0.0) || !self.frequency.is_finite() {
            return Err(ProcgenError::invalid(
                "frequency",
                format!("must be positive and finite, got {}", self.frequency),
            ));
        }
        if !self.noise_z.is_finite() {
            return Err(ProcgenError::invalid("noise_z", "must be finite"));
        }
        Ok(())
    }

    /// Tallest height a vertex can reach after the divisor.
    pub fn max_height(&self) -> f32 {
        self.mesh_height / self.height_divisor
    }

    /// Sea-floor height every vertex is raised to at least.
    pub fn floor_height(&self) -> f32 {
        self.water_level * 0.5 * self.mesh_height / self.height_divisor
    }

    pub fn index_count(&self) -> usize {
        let cells_x = (self.chunk_width as usize).saturating_sub(1);
        let cells_z = (self.chunk_height as usize).saturating_sub(1);
        6 * cells_x * cells_z
    }
}

/// Ground height at world grid point (x, y).
pub fn ground_height(field: &NoiseField, x: f64, y: f64, config: &GroundConfig) -> f32 {
    let n = field.sample(x * config.frequency, y * config.frequency, config.noise_z);
    let raised = (n * config.mesh_height as f64)
        .max(config.water_level as f64 * 0.5 * config.mesh_height as f64);
    (raised / config.height_divisor as f64) as f32
}

/// Vertex positions for the chunk whose first vertex sits at world `(origin_x, origin_z)`.
pub fn ground_vertices_at(
    field: &NoiseField,
    config: &GroundConfig,
    origin_x: i64,
    origin_z: i64,
) -> Vec<Vec3> {
    let width = config.chunk_width as i64;
    let height = config.chunk_height as i64;
    let mut positions = Vec::with_capacity((width * height) as usize);
    for row in 0..height {
        for col in 0..width {
            let wx = origin_x + col;
            let wz = origin_z + row;
            let h = ground_height(field, wx as f64, wz as f64, config);
            positions.push(Vec3::new(wx as f32, h, wz as f32));
        }
    }
    positions
}

/// Vertex positions for the chunk at the world origin.
pub fn ground_vertices(field: &NoiseField, config: &GroundConfig) -> Vec<Vec3> {
    ground_vertices_at(field, config, 0, 0)
}

/// Two triangles per cell; the last column and row start no cell.
pub fn ground_indices(config: &GroundConfig) -> Vec<u32> {
    let width = config.chunk_width;
    let height = config.chunk_height;
    let mut indices = Vec::with_capacity(config.index_count());

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let pos = x + y * width;

            // Top-left triangle
            indices.push(pos + width);
            indices.push(pos);
            indices.push(pos + width + 1);

            // Bottom-right triangle
            indices.push(pos + 1);
            indices.push(pos + 1 + width);
            indices.push(pos);
        }
    }

    indices
}

/// Full ground mesh for the chunk at the world origin.
pub fn ground_mesh(field: &NoiseField, config: &GroundConfig) -> Result<Mesh> {
    config.validate()?;
    let mesh = Mesh::new(ground_vertices(field, config), ground_indices(config));
    mesh.validate_indices()?;
    Ok(mesh)
}

/// Ground chunk for streaming a larger map.
#[derive(Debug, Clone)]
pub struct GroundChunk {
    /// Chunk coordinates.
    pub position: (i32, i32),
    pub mesh: Mesh,
}

impl GroundChunk {
    /// Generate the chunk at the given chunk coordinates. Neighbours overlap by
    /// one vertex so their shared edge is sampled at identical coordinates.
    pub fn generate(chunk_x: i32, chunk_z: i32, config: &GroundConfig) -> Result<Self> {
        config.validate()?;
        let field = NoiseField::new(config.seed);
        let origin_x = chunk_x as i64 * (config.chunk_width as i64 - 1);
        let origin_z = chunk_z as i64 * (config.chunk_height as i64 - 1);

        let positions = ground_vertices_at(&field, config, origin_x, origin_z);
        let mesh = Mesh::new(positions, ground_indices(config));
        mesh.validate_indices()?;

        Ok(Self {
            position: (chunk_x, chunk_z),
            mesh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normals::triangle_normals;

    #[test]
    fn default_chunk_counts() {
        let config = GroundConfig::default();
        let field = NoiseField::new(config.seed);
        let mesh = ground_mesh(&field, &config).unwrap();
        assert_eq!(mesh.vertex_count(), 12 * 12);
        // 11 x 11 cells, two triangles each.
        assert_eq!(mesh.indices.len(), 726);
        assert_eq!(config.index_count(), 726);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn rectangular_chunk_counts() {
        let config = GroundConfig {
            chunk_width: 7,
            chunk_height: 4,
            ..Default::default()
        };
        let indices = ground_indices(&config);
        assert_eq!(indices.len(), 6 * 6 * 3);
        assert_eq!(indices.iter().copied().max(), Some(7 * 4 - 1));
    }

    #[test]
    fn first_cell_uses_fixed_diagonal() {
        let config = GroundConfig::default();
        let indices = ground_indices(&config);
        assert_eq!(&indices[..6], &[12, 0, 13, 1, 13, 0]);
    }

    #[test]
    fn heights_respect_floor_and_ceiling() {
        let config = GroundConfig::default();
        let field = NoiseField::new(config.seed);
        for p in ground_vertices(&field, &config) {
            assert!(p.y >= config.floor_height() - f32::EPSILON, "height {} under floor", p.y);
            assert!(p.y <= config.max_height() + f32::EPSILON, "height {} over ceiling", p.y);
        }
    }

    #[test]
    fn same_seed_same_vertices() {
        let config = GroundConfig::default();
        let a = ground_vertices(&NoiseField::new(config.seed), &config);
        let b = ground_vertices(&NoiseField::new(config.seed), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn normals_face_up() {
        let config = GroundConfig {
            mesh_height: 40.0,
            height_divisor: 1.0,
            frequency: 0.37,
            ..Default::default()
        };
        let field = NoiseField::new(config.seed);
        let mesh = ground_mesh(&field, &config).unwrap();
        let normals = triangle_normals(&mesh.indices, &mesh.positions);
        assert_eq!(normals.len(), mesh.triangle_count());
        assert!(normals.iter().all(|n| n.y > 0.0));
    }

    #[test]
    fn neighbouring_chunks_share_an_edge() {
        let config = GroundConfig {
            frequency: 0.21,
            ..Default::default()
        };
        let w = config.chunk_width as usize;
        let h = config.chunk_height as usize;
        let a = GroundChunk::generate(0, 0, &config).unwrap();
        let b = GroundChunk::generate(1, 0, &config).unwrap();
        for row in 0..h {
            let right_of_a = a.mesh.positions[row * w + (w - 1)];
            let left_of_b = b.mesh.positions[row * w];
            assert_eq!(right_of_a, left_of_b, "row {row} edge mismatch");
        }
        assert_eq!(b.position, (1, 0));
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let too_small = GroundConfig {
            chunk_width: 1,
            ..Default::default()
        };
        assert!(too_small.validate().is_err());

        let drowned = GroundConfig {
            water_level: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            drowned.validate(),
            Err(ProcgenError::InvalidParameter { name: "water_level", .. })
        ));

        let flat = GroundConfig {
            mesh_height: 0.0,
            ..Default::default()
        };
        assert!(ground_mesh(&NoiseField::new(1), &flat).is_err());
    }
}
