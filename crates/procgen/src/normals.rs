//! Normal computation for indexed triangle lists.
//!
//! Sign convention: a triangle `(a, b, c)` faces along `-(b - a) × (c - a)`,
//! which points up (+Y) for the winding both terrain builders emit.

use glam::Vec3;

/// Unit normal of one triangle. Degenerate triangles give NaN components.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (-(b - a).cross(c - a)).normalize()
}

/// One flat-shading normal per triangle, in triangle order.
pub fn triangle_normals(indices: &[u32], positions: &[Vec3]) -> Vec<Vec3> {
    indices
        .chunks_exact(3)
        .map(|tri| {
            face_normal(
                positions[tri[0] as usize],
                positions[tri[1] as usize],
                positions[tri[2] as usize],
            )
        })
        .collect()
}

/// Smooth per-vertex normals: area-weighted sum of the adjacent face normals.
///
/// Vertices no triangle touches keep `Vec3::Y`.
pub fn vertex_normals(indices: &[u32], positions: &[Vec3]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (a, b, c) = (positions[i0], positions[i1], positions[i2]);
        // Unnormalized: length is twice the area.
        let n = -(b - a).cross(c - a);
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }

    for n in normals.iter_mut() {
        *n = n.try_normalize().unwrap_or(Vec3::Y);
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn flat_quad_faces_up() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = vec![0, 1, 2, 1, 3, 2];
        let normals = triangle_normals(&indices, &positions);
        assert_eq!(normals.len(), 2);
        for n in normals {
            assert!((n - Vec3::Y).length() < EPS, "expected +Y, got {n}");
        }
    }

    /// Each triangle uses its own three corners, not a running offset into all corners.
    #[test]
    fn later_triangles_use_their_own_corners() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            // tilted triangle facing +X
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 1.0),
            Vec3::new(5.0, 1.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 3, 4, 5];
        let normals = triangle_normals(&indices, &positions);
        assert!((normals[0] - Vec3::Y).length() < EPS);
        let expected = face_normal(positions[3], positions[4], positions[5]);
        assert!((normals[1] - expected).length() < EPS);
        assert!((normals[1].x.abs() - 1.0).abs() < EPS);
    }

    #[test]
    fn normals_are_unit_length() {
        let positions = vec![
            Vec3::new(0.0, 0.3, 0.0),
            Vec3::new(1.0, 0.9, 0.0),
            Vec3::new(0.0, -0.4, 1.0),
        ];
        let n = triangle_normals(&[0, 1, 2], &positions)[0];
        assert!((n.length() - 1.0).abs() < EPS);
        assert!(n.y > 0.0);
    }

    #[test]
    fn degenerate_triangle_is_nan() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        let n = triangle_normals(&[0, 1, 2], &positions)[0];
        assert!(n.is_nan());
    }

    #[test]
    fn smooth_normals_on_flat_grid_point_up() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(9.0, 9.0, 9.0), // unused
        ];
        let normals = vertex_normals(&[0, 1, 2, 1, 3, 2], &positions);
        assert_eq!(normals.len(), positions.len());
        for n in &normals[..4] {
            assert!((*n - Vec3::Y).length() < EPS);
        }
        assert_eq!(normals[4], Vec3::Y);
    }
}
