//! Recentering and rescaling meshes into a canonical volume.

use glam::Vec3;

use crate::error::{ProcgenError, Result};
use crate::mesh::Mesh;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Bounds of a point set, `None` if empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |b, &p| Self {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        ))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        (self.max - self.min).length()
    }
}

/// Center `positions` on the origin and scale so the bounding diagonal is 2.
///
/// Returns the bounds before the transform. Fails if the points have no extent.
pub fn normalize_positions(positions: &mut [Vec3]) -> Result<Aabb> {
    let bounds = Aabb::from_points(positions).ok_or(ProcgenError::DegenerateBounds)?;
    let diagonal = bounds.diagonal();
    if !(diagonal > 0.0) || !diagonal.is_finite() {
        return Err(ProcgenError::DegenerateBounds);
    }

    let center = bounds.center();
    let scale = 2.0 / diagonal;
    for p in positions.iter_mut() {
        *p = (*p - center) * scale;
    }
    Ok(bounds)
}

impl Mesh {
    /// Normalize vertex positions in place. Allowed exactly once per mesh.
    pub fn normalize(&mut self) -> Result<Aabb> {
        if self.normalized {
            return Err(ProcgenError::AlreadyNormalized);
        }
        let bounds = normalize_positions(&mut self.positions)?;
        self.normalized = true;
        Ok(bounds)
    }
}
