//! Starfield fly-through: stars stream toward the camera at the origin and are
//! recycled into the distance once they pass it.

use glam::{Mat4, Vec3};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ProcgenError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub seed: u64,
    /// Number of stars.
    pub count: usize,
    /// Stars spawn within `[-spread_xy, spread_xy]` on X and Y.
    pub spread_xy: f32,
    /// Initial Z is drawn from `[-depth, 0]`.
    pub depth: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// A star past this Z is behind the camera and gets recycled.
    pub recycle_z: f32,
    /// Recycled stars restart at this Z.
    pub respawn_z: f32,
    /// Uniform model scale per star.
    pub scale: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            count: 500,
            spread_xy: 5.0,
            depth: 10.0,
            min_speed: 2.0,
            max_speed: 15.0,
            recycle_z: 0.1,
            respawn_z: -100.0,
            scale: 0.2,
        }
    }
}

impl StarfieldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ProcgenError::invalid("count", "need at least one star"));
        }
        let finite = [
            self.spread_xy,
            self.depth,
            self.min_speed,
            self.max_speed,
            self.recycle_z,
            self.respawn_z,
            self.scale,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(ProcgenError::invalid("starfield", "all values must be finite"));
        }
        if !(self.min_speed < self.max_speed) {
            return Err(ProcgenError::invalid(
                "speed",
                format!("min {} must be below max {}", self.min_speed, self.max_speed),
            ));
        }
        if self.spread_xy <= 0.0 || self.depth <= 0.0 {
            return Err(ProcgenError::invalid("spread", "spread and depth must be positive"));
        }
        if self.respawn_z >= self.recycle_z {
            return Err(ProcgenError::invalid("respawn_z", "must be in front of recycle_z"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub speed: f32,
}

/// Deterministic starfield simulation.
#[derive(Debug, Clone)]
pub struct Starfield {
    config: StarfieldConfig,
    rng: StdRng,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(config: &StarfieldConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let stars = (0..config.count)
            .map(|_| Self::random_star(&mut rng, config))
            .collect();
        Ok(Self {
            config: config.clone(),
            rng,
            stars,
        })
    }

    fn random_star(rng: &mut StdRng, config: &StarfieldConfig) -> Star {
        let s = config.spread_xy;
        let position = Vec3::new(
            rng.gen_range(-s..=s),
            rng.gen_range(-s..=s),
            rng.gen_range(-config.depth..=0.0),
        );
        let speed = rng.gen_range(config.min_speed..config.max_speed);
        Star { position, speed }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Advance every star by `dt` seconds. Returns how many were recycled.
    pub fn update(&mut self, dt: f32) -> usize {
        let mut recycled = 0;
        for star in self.stars.iter_mut() {
            star.position.z += dt * star.speed;
            if star.position.z > self.config.recycle_z {
                *star = Self::random_star(&mut self.rng, &self.config);
                star.position.z = self.config.respawn_z;
                recycled += 1;
            }
        }
        if recycled > 0 {
            log::trace!("Recycled {} stars", recycled);
        }
        recycled
    }

    /// Model matrix per star: translate to its position, then scale.
    pub fn model_matrices(&self) -> Vec<Mat4> {
        let scale = Vec3::splat(self.config.scale);
        self.stars
            .iter()
            .map(|s| Mat4::from_translation(s.position) * Mat4::from_scale(scale))
            .collect()
    }
}
