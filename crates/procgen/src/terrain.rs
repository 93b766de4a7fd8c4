//! Finished terrain meshes ready for upload.
//!
//! Both scenes run the same pipeline:
//! generator -> mesh -> normals + biome colors -> normalize.
//! The result is plain data; the renderer owns every GPU resource.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::biome::{colorize, ColorPalette};
use crate::error::Result;
use crate::ground::{ground_mesh, GroundConfig};
use crate::landscape::{FractalLandscape, LandscapeConfig};
use crate::mesh::{landscape_mesh, Mesh};
use crate::noise_field::NoiseField;
use crate::normalize::Aabb;
use crate::normals::{triangle_normals, vertex_normals};

/// Interleaved vertex for terrain upload (position + biome color).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Flat (one per triangle) or smooth (one per vertex) normals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    #[default]
    Flat,
    Smooth,
}

/// Normals tagged with what they run parallel to.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalSet {
    PerTriangle(Vec<Vec3>),
    PerVertex(Vec<Vec3>),
}

impl NormalSet {
    fn compute(shading: Shading, mesh: &Mesh) -> Self {
        match shading {
            Shading::Flat => Self::PerTriangle(triangle_normals(&mesh.indices, &mesh.positions)),
            Shading::Smooth => Self::PerVertex(vertex_normals(&mesh.indices, &mesh.positions)),
        }
    }

    pub fn as_slice(&self) -> &[Vec3] {
        match self {
            Self::PerTriangle(n) | Self::PerVertex(n) => n,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Generated terrain data.
#[derive(Debug, Clone)]
pub struct TerrainData {
    /// Normalized mesh: centered on the origin, bounding diagonal 2.
    pub mesh: Mesh,
    /// One color per vertex.
    pub colors: Vec<Vec3>,
    pub normals: NormalSet,
    /// Height the palette thresholds were scaled by.
    pub mesh_height: f32,
    /// Bounds before normalization, in generator units.
    pub source_bounds: Aabb,
}

impl TerrainData {
    /// Noise ground chunk at the origin, colored by the standard palette for its water level.
    pub fn ground(config: &GroundConfig, shading: Shading) -> Result<Self> {
        let field = NoiseField::new(config.seed);
        let mesh = ground_mesh(&field, config)?;
        let palette = ColorPalette::standard(config.water_level)?;
        Self::finish(mesh, &palette, config.max_height(), shading)
    }

    /// Fractal landscape, colored relative to its highest point.
    pub fn landscape(
        config: &LandscapeConfig,
        palette: &ColorPalette,
        shading: Shading,
    ) -> Result<Self> {
        let landscape = FractalLandscape::generate(config)?;
        let mesh = landscape_mesh(&landscape.grid)?;
        Self::finish(mesh, palette, landscape.highest as f32, shading)
    }

    fn finish(
        mut mesh: Mesh,
        palette: &ColorPalette,
        mesh_height: f32,
        shading: Shading,
    ) -> Result<Self> {
        mesh.validate_indices()?;
        // Uniform scaling keeps directions, so normals are taken before normalizing.
        let normals = NormalSet::compute(shading, &mesh);
        let colors = colorize(&mesh.positions, palette, mesh_height);
        let source_bounds = mesh.normalize()?;

        log::debug!(
            "Terrain ready: {} vertices, {} triangles, {} normals",
            mesh.vertex_count(),
            mesh.triangle_count(),
            normals.len()
        );

        Ok(Self {
            mesh,
            colors,
            normals,
            mesh_height,
            source_bounds,
        })
    }

    /// Interleaved position + color vertices.
    pub fn vertices(&self) -> Vec<TerrainVertex> {
        self.mesh
            .positions
            .iter()
            .zip(&self.colors)
            .map(|(p, c)| TerrainVertex {
                position: p.to_array(),
                color: c.to_array(),
            })
            .collect()
    }

    /// Positions as a flat `[x, y, z, x, y, z, ...]` slice.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.mesh.positions)
    }

    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.normals.as_slice())
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.mesh.indices)
    }
}
