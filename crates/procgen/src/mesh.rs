//! Indexed triangle meshes and positional vertex welding.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{ProcgenError, Result};
use crate::landscape::ElevationGrid;

/// Unique vertex positions plus a triangle list (three indices per triangle).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Set once `normalize` has run.
    pub(crate) normalized: bool,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normalized: false,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Corner positions of triangle `t`.
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        let i = t * 3;
        [
            self.positions[self.indices[i] as usize],
            self.positions[self.indices[i + 1] as usize],
            self.positions[self.indices[i + 2] as usize],
        ]
    }

    /// Check that every index refers to an existing vertex and triangles are complete.
    pub fn validate_indices(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(ProcgenError::invalid(
                "indices",
                format!("length {} is not a multiple of 3", self.indices.len()),
            ));
        }
        let vertex_count = self.positions.len();
        match self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            Some(&index) => Err(ProcgenError::IndexOutOfRange {
                index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

/// Exact-bit key for a position. `-0.0` and `0.0` weld together.
fn position_key(p: Vec3) -> [u32; 3] {
    let bits = |v: f32| if v == 0.0 { 0 } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

/// Incrementally builds a mesh, giving identical positions a single shared index.
///
/// Shared grid corners are computed by the same arithmetic every time they are
/// visited, so exact bit equality is enough to find them.
#[derive(Debug, Default)]
pub struct VertexWelder {
    lookup: HashMap<[u32; 3], u32>,
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(vertices),
            positions: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Index of `position`, appending it if unseen.
    pub fn weld(&mut self, position: Vec3) -> u32 {
        let positions = &mut self.positions;
        *self.lookup.entry(position_key(position)).or_insert_with(|| {
            positions.push(position);
            (positions.len() - 1) as u32
        })
    }

    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let ia = self.weld(a);
        let ib = self.weld(b);
        let ic = self.weld(c);
        self.indices.extend([ia, ib, ic]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn finish(self) -> Mesh {
        Mesh::new(self.positions, self.indices)
    }
}

/// Triangulate an elevation grid: rows run along X, columns along Z, height on Y.
///
/// Every grid cell yields a lower-left and an upper-right triangle, so the
/// mesh has exactly `6 * (rows - 1) * (columns - 1)` indices. The grid must be
/// fully populated.
pub fn landscape_mesh(grid: &ElevationGrid) -> Result<Mesh> {
    if let Some((row, column)) = grid.first_unset() {
        return Err(ProcgenError::Unpopulated { row, column });
    }

    let rows = grid.rows();
    let columns = grid.columns();
    let cells = rows.saturating_sub(1) * columns.saturating_sub(1);
    let mut welder = VertexWelder::with_capacity(rows * columns, cells * 6);
    let at = |x: usize, z: usize| Vec3::new(x as f32, grid.get(x, z) as f32, z as f32);

    for x in 0..rows.saturating_sub(1) {
        for z in 0..columns.saturating_sub(1) {
            // lower-left
            welder.push_triangle(at(x, z), at(x + 1, z), at(x, z + 1));
            // upper-right
            welder.push_triangle(at(x + 1, z), at(x + 1, z + 1), at(x, z + 1));
        }
    }

    let mesh = welder.finish();
    log::debug!(
        "Landscape mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::{FractalLandscape, LandscapeConfig, UNSET_ELEVATION};

    #[test]
    fn welder_shares_repeated_positions() {
        let mut welder = VertexWelder::new();
        let a = Vec3::new(0.0, 1.0, 0.0);
        let b = Vec3::new(1.0, 1.0, 0.0);
        let c = Vec3::new(0.0, 1.0, 1.0);
        let d = Vec3::new(1.0, 1.0, 1.0);
        welder.push_triangle(a, b, c);
        welder.push_triangle(b, d, c);
        let mesh = welder.finish();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn welder_folds_negative_zero() {
        let mut welder = VertexWelder::new();
        let i = welder.weld(Vec3::new(0.0, 0.0, 1.0));
        let j = welder.weld(Vec3::new(-0.0, 0.0, 1.0));
        assert_eq!(i, j);
        assert_eq!(welder.vertex_count(), 1);
    }

    #[test]
    fn landscape_index_count_and_range() {
        let land = FractalLandscape::generate(&LandscapeConfig {
            rows: 17,
            columns: 12,
            roughness: 1.0,
            seed: 8,
        })
        .unwrap();
        let mesh = landscape_mesh(&land.grid).unwrap();
        assert_eq!(mesh.indices.len(), 6 * 16 * 11);
        assert!(mesh.vertex_count() <= 6 * 16 * 11);
        mesh.validate_indices().unwrap();
    }

    #[test]
    fn distinct_heights_give_one_vertex_per_grid_point() {
        let grid = ElevationGrid::from_fn(6, 7, |r, c| (r * 7 + c) as f64 * 0.5);
        let mesh = landscape_mesh(&grid).unwrap();
        assert_eq!(mesh.vertex_count(), 6 * 7);
        assert_eq!(mesh.indices.len(), 6 * 5 * 6);
    }

    /// Grid points are at distinct (x, z), so welding never merges two grid points;
    /// every raw corner sample must land on its grid point's single index.
    #[test]
    fn shared_corners_reference_the_same_index() {
        let grid = ElevationGrid::from_fn(5, 5, |_, _| 0.0);
        let mesh = landscape_mesh(&grid).unwrap();
        assert_eq!(mesh.vertex_count(), 25);
        // Each raw position appears 6 times per interior point; all map to one index.
        let target = Vec3::new(2.0, 0.0, 2.0);
        let refs: Vec<u32> = mesh
            .indices
            .iter()
            .copied()
            .filter(|&i| mesh.positions[i as usize] == target)
            .collect();
        assert_eq!(refs.len(), 6);
        assert!(refs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn coincident_samples_shrink_vertex_count() {
        // Six raw corners per cell; a 4x4 flat grid has 9 cells -> 54 raw samples.
        let grid = ElevationGrid::from_fn(4, 4, |_, _| 0.0);
        let mesh = landscape_mesh(&grid).unwrap();
        assert_eq!(mesh.indices.len(), 54);
        assert_eq!(mesh.vertex_count(), 16);
    }

    #[test]
    fn triangles_wind_consistently() {
        let grid = ElevationGrid::from_fn(4, 4, |_, _| 0.0);
        let mesh = landscape_mesh(&grid).unwrap();
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle(t);
            let n = (b - a).cross(c - a);
            assert!(n.y < 0.0, "triangle {t} winds the other way");
        }
    }

    #[test]
    fn unpopulated_grid_is_rejected() {
        let mut grid = ElevationGrid::from_fn(5, 5, |_, _| 1.0);
        grid.set(3, 2, UNSET_ELEVATION);
        assert_eq!(
            landscape_mesh(&grid).unwrap_err(),
            ProcgenError::Unpopulated { row: 3, column: 2 }
        );
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Z], vec![0, 1, 3]);
        assert_eq!(
            mesh.validate_indices().unwrap_err(),
            ProcgenError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        );
    }
}
