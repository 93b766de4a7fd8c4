//! Height-banded biome coloring.

use glam::Vec3;

use crate::error::{ProcgenError, Result};

/// Biome bands, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    DeepWater,
    ShallowWater,
    Sand,
    Grass,
    DarkGrass,
    Rock,
    DarkRock,
    Snow,
}

/// Color from 8-bit channels.
pub fn rgb(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// One palette band: heights up to and including `height` (as a fraction of the
/// mesh height) take `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainColor {
    pub height: f32,
    pub color: Vec3,
    pub biome: Biome,
}

impl TerrainColor {
    pub fn new(height: f32, color: Vec3, biome: Biome) -> Self {
        Self {
            height,
            color,
            biome,
        }
    }
}

/// Ascending list of bands. The last band also catches anything above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    bands: Vec<TerrainColor>,
}

impl ColorPalette {
    /// Build a palette; thresholds must strictly increase.
    pub fn new(bands: Vec<TerrainColor>) -> Result<Self> {
        if bands.is_empty() {
            return Err(ProcgenError::EmptyPalette);
        }
        for (i, pair) in bands.windows(2).enumerate() {
            // NaN thresholds fail this too.
            if !(pair[1].height > pair[0].height) {
                return Err(ProcgenError::PaletteNotAscending { index: i + 1 });
            }
        }
        Ok(Self { bands })
    }

    /// Water, sand, grass, rock and snow bands. Needs `0 < water_level < 0.15`.
    pub fn standard(water_level: f32) -> Result<Self> {
        if !(water_level > 0.0) {
            return Err(ProcgenError::invalid(
                "water_level",
                format!("must be positive, got {water_level}"),
            ));
        }
        Self::new(vec![
            TerrainColor::new(water_level * 0.5, rgb(60, 95, 190), Biome::DeepWater),
            TerrainColor::new(water_level, rgb(60, 100, 190), Biome::ShallowWater),
            TerrainColor::new(0.15, rgb(210, 215, 130), Biome::Sand),
            TerrainColor::new(0.30, rgb(95, 165, 30), Biome::Grass),
            TerrainColor::new(0.40, rgb(65, 115, 20), Biome::DarkGrass),
            TerrainColor::new(0.50, rgb(90, 65, 60), Biome::Rock),
            TerrainColor::new(0.80, rgb(75, 60, 55), Biome::DarkRock),
            TerrainColor::new(1.00, rgb(255, 255, 255), Biome::Snow),
        ])
    }

    pub fn bands(&self) -> &[TerrainColor] {
        &self.bands
    }

    /// First band whose scaled threshold is at or above `height`, else the last band.
    pub fn band_for(&self, height: f32, mesh_height: f32) -> &TerrainColor {
        self.bands
            .iter()
            .find(|band| height <= band.height * mesh_height)
            .unwrap_or_else(|| &self.bands[self.bands.len() - 1])
    }

    pub fn color_for(&self, height: f32, mesh_height: f32) -> Vec3 {
        self.band_for(height, mesh_height).color
    }
}

/// One color per vertex, from its Y coordinate.
pub fn colorize(positions: &[Vec3], palette: &ColorPalette, mesh_height: f32) -> Vec<Vec3> {
    positions
        .iter()
        .map(|p| palette.color_for(p.y, mesh_height))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ColorPalette {
        ColorPalette::standard(0.1).unwrap()
    }

    #[test]
    fn height_on_threshold_takes_that_band() {
        let p = palette();
        assert_eq!(p.band_for(0.30, 1.0).biome, Biome::Grass);
        assert_eq!(p.band_for(0.5, 1.0).biome, Biome::Rock);
        assert_eq!(p.band_for(1.0, 1.0).biome, Biome::Snow);
    }

    #[test]
    fn height_just_above_threshold_takes_next_band() {
        let p = palette();
        assert_eq!(p.band_for(0.31, 1.0).biome, Biome::DarkGrass);
        assert_eq!(p.band_for(0.0, 1.0).biome, Biome::DeepWater);
        assert_eq!(p.band_for(0.06, 1.0).biome, Biome::ShallowWater);
    }

    #[test]
    fn above_highest_threshold_falls_back_to_last() {
        let p = palette();
        assert_eq!(p.band_for(7.5, 1.0).biome, Biome::Snow);
        assert_eq!(p.color_for(7.5, 1.0), rgb(255, 255, 255));
    }

    #[test]
    fn thresholds_scale_with_mesh_height() {
        let p = palette();
        assert_eq!(p.band_for(2.9, 10.0).biome, Biome::Grass);
        assert_eq!(p.band_for(2.9, 1.0).biome, Biome::Snow);
    }

    #[test]
    fn colorize_is_parallel_to_positions() {
        let p = palette();
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.45, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ];
        let colors = colorize(&positions, &p, 1.0);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], rgb(60, 95, 190));
        assert_eq!(colors[1], rgb(90, 65, 60));
        assert_eq!(colors[2], rgb(255, 255, 255));
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let bands = vec![
            TerrainColor::new(0.5, Vec3::ONE, Biome::Rock),
            TerrainColor::new(0.5, Vec3::ONE, Biome::Snow),
        ];
        assert_eq!(
            ColorPalette::new(bands).unwrap_err(),
            ProcgenError::PaletteNotAscending { index: 1 }
        );
        assert_eq!(ColorPalette::new(Vec::new()).unwrap_err(), ProcgenError::EmptyPalette);
    }

    #[test]
    fn water_level_too_high_breaks_ordering() {
        assert!(matches!(
            ColorPalette::standard(0.2),
            Err(ProcgenError::PaletteNotAscending { index: 2 })
        ));
    }
}
