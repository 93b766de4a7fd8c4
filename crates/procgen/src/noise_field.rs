//! Seeded gradient-noise field used for the procedural ground.
//!
//! Output is a pure function of (seed, coordinate): Perlin noise from the
//! `noise` crate with a seed-derived permutation table, so the same seed
//! samples bit-identically on every run and platform.

use noise::{NoiseFn, Perlin};

/// Deterministic scalar field over 2D and 3D coordinates.
#[derive(Debug, Clone)]
pub struct NoiseField {
    seed: u32,
    perlin: Perlin,
}

impl NoiseField {
    /// Seed the field. The permutation is fixed from here on.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Raw gradient noise in `[-1, 1]`.
    pub fn sample_signed(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Noise remapped to `[0, 1]`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.sample_signed(x, y, z) + 1.0) * 0.5
    }

    /// 2D variant, remapped to `[0, 1]`.
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        let raw = self.perlin.get([x, y]).clamp(-1.0, 1.0);
        (raw + 1.0) * 0.5
    }
}
