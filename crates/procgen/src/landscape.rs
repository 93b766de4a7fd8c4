//! Fractal landscape generation by recursive midpoint displacement ("plasma fractal").
//!
//! The grid keeps a flat zero border and a beach ring around a fractal interior:
//!
//! ```text
//! ring 0         all zeros
//! ring 1         beach: one third of the neighbouring fractal cell
//! ring 2 ..      fractal rectangle, corners pinned at zero
//! ```
//!
//! **Seed-based determinism:** the random perturbation stream comes from a
//! `StdRng` seeded with `config.seed`, so identical (rows, columns, roughness,
//! seed) always yields an identical grid.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ProcgenError, Result};

/// Marks a cell the generator has not reached yet.
pub const UNSET_ELEVATION: f64 = -10032.4775;

/// Smallest grid side that still leaves a cell inside the two insets.
pub const MIN_GRID_SIDE: usize = 5;

/// Row-major 2D array of heights addressed by (row, column).
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    rows: usize,
    columns: usize,
    cells: Vec<f64>,
}

impl ElevationGrid {
    /// New grid with every cell unset.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![UNSET_ELEVATION; rows * columns],
        }
    }

    /// Build a grid from a height function (handy for hand-made terrain).
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(f(row, column));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.cells[row * self.columns + column]
    }

    #[inline]
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        self.cells[row * self.columns + column] = value;
    }

    #[inline]
    fn is_unset(&self, row: usize, column: usize) -> bool {
        self.get(row, column) == UNSET_ELEVATION
    }

    /// First cell (row-major) still holding the sentinel.
    pub fn first_unset(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&h| h == UNSET_ELEVATION)
            .map(|i| (i / self.columns, i % self.columns))
    }

    pub fn is_populated(&self) -> bool {
        self.first_unset().is_none()
    }

    pub fn max_elevation(&self) -> f64 {
        self.cells.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min_elevation(&self) -> f64 {
        self.cells.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// Parameters for a fractal landscape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Grid rows (at least 5).
    pub rows: usize,
    /// Grid columns (at least 5).
    pub columns: usize,
    /// Perturbation coefficient (`rug`). 0 = flat, higher = more jagged.
    pub roughness: f64,
    /// Seed for the perturbation stream.
    pub seed: u64,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            rows: 33,
            columns: 33,
            roughness: 0.5,
            seed: 1,
        }
    }
}

impl LandscapeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_GRID_SIDE || self.columns < MIN_GRID_SIDE {
            return Err(ProcgenError::GridTooSmall {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if !self.roughness.is_finite() || self.roughness < 0.0 {
            return Err(ProcgenError::invalid(
                "roughness",
                format!("must be finite and >= 0, got {}", self.roughness),
            ));
        }
        Ok(())
    }
}

/// A fully generated landscape: read-only grid plus its highest point.
#[derive(Debug, Clone)]
pub struct FractalLandscape {
    pub config: LandscapeConfig,
    pub grid: ElevationGrid,
    /// Highest elevation after submerged cells were clamped to sea level.
    pub highest: f64,
}

impl FractalLandscape {
    /// Generate a landscape. Fails on an invalid config or if any cell is left unset.
    pub fn generate(config: &LandscapeConfig) -> Result<Self> {
        config.validate()?;

        let rows = config.rows;
        let columns = config.columns;
        let mut grid = ElevationGrid::new(rows, columns);
        let mut rng = StdRng::seed_from_u64(config.seed);

        // Flat outer border.
        for r in 0..rows {
            grid.set(r, 0, 0.0);
            grid.set(r, columns - 1, 0.0);
        }
        for c in 0..columns {
            grid.set(0, c, 0.0);
            grid.set(rows - 1, c, 0.0);
        }

        // Corners of the fractal rectangle, inset two cells.
        let (top, left, bottom, right) = (2, 2, rows - 3, columns - 3);
        grid.set(top, left, 0.0);
        grid.set(top, right, 0.0);
        grid.set(bottom, left, 0.0);
        grid.set(bottom, right, 0.0);

        let mut displacer = Displacer {
            grid: &mut grid,
            rng: &mut rng,
            rug: config.roughness,
        };
        displacer.subdivide(top, left, bottom, right);

        // Beach ring: one third of the fractal neighbour, columns first.
        for r in 2..rows - 2 {
            grid.set(r, 1, grid.get(r, 2) / 3.0);
            grid.set(r, columns - 2, grid.get(r, columns - 3) / 3.0);
        }
        for c in 1..columns - 1 {
            grid.set(1, c, grid.get(2, c) / 3.0);
            grid.set(rows - 2, c, grid.get(rows - 3, c) / 3.0);
        }

        if let Some((row, column)) = grid.first_unset() {
            return Err(ProcgenError::Unpopulated { row, column });
        }

        // Submerged land sits at sea level.
        let mut highest = 0.0_f64;
        for h in grid.cells.iter_mut() {
            if *h < 0.0 {
                *h = 0.0;
            }
            highest = highest.max(*h);
        }

        log::debug!(
            "Generated {}x{} landscape (rug {:.3}, seed {}), highest {:.3}",
            rows,
            columns,
            config.roughness,
            config.seed,
            highest
        );

        Ok(Self {
            config: config.clone(),
            grid,
            highest,
        })
    }
}

/// Recursive midpoint displacement over a borrowed grid.
struct Displacer<'a> {
    grid: &'a mut ElevationGrid,
    rng: &'a mut StdRng,
    rug: f64,
}

impl Displacer<'_> {
    /// Random offset centred on zero, proportional to the bisected span.
    fn perturb(&mut self, span: f64) -> f64 {
        self.rug * span * (self.rng.gen::<f64>() - 0.5)
    }

    /// Set a cell from its reference average unless a sibling already did.
    fn fill(&mut self, row: usize, column: usize, average: f64, span: f64) {
        if self.grid.is_unset(row, column) {
            let value = average + self.perturb(span);
            self.grid.set(row, column, value);
        }
    }

    /// Rows are `x`, columns are `y`; (x1, y1) and (x2, y2) are opposite corners.
    fn subdivide(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        let x3 = (x1 + x2) / 2;
        let y3 = (y1 + y2) / 2;
        let span_x = (x2 - x1) as f64;
        let span_y = (y2 - y1) as f64;
        let splits_x = x2 - x1 >= 2;
        let splits_y = y2 - y1 >= 2;

        if splits_y {
            let g = &*self.grid;
            let left = (g.get(x1, y1) + g.get(x1, y2)) / 2.0;
            let right = (g.get(x2, y1) + g.get(x2, y2)) / 2.0;
            self.fill(x1, y3, left, span_y);
            self.fill(x2, y3, right, span_y);
        }
        if splits_x {
            let g = &*self.grid;
            let near = (g.get(x1, y1) + g.get(x2, y1)) / 2.0;
            let far = (g.get(x1, y2) + g.get(x2, y2)) / 2.0;
            self.fill(x3, y1, near, span_x);
            self.fill(x3, y2, far, span_x);
        }
        if splits_x && splits_y {
            let g = &*self.grid;
            let centre = (g.get(x1, y1) + g.get(x2, y1) + g.get(x1, y2) + g.get(x2, y2)) / 4.0;
            self.fill(x3, y3, centre, span_x + span_y);
        }

        if x3 + 1 < x2 || y3 + 1 < y2 {
            self.subdivide(x1, y1, x3, y3);
            self.subdivide(x1, y3, x3, y2);
            self.subdivide(x3, y1, x2, y3);
            self.subdivide(x3, y3, x2, y2);
        }
    }
}
