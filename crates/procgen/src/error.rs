//! Error type shared by every generator in this crate.
//!
//! All inputs are construction-time parameters, so failures are reported up
//! front when a config is validated or a mesh is assembled. There is no
//! partial result to recover.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcgenError {
    /// Landscape grid too small to hold the boundary ring, beach ring and a fractal interior.
    #[error("grid {rows}x{columns} is too small (need at least 5x5)")]
    GridTooSmall { rows: usize, columns: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A cell still holds the unset sentinel after generation.
    #[error("elevation at ({row}, {column}) was never generated")]
    Unpopulated { row: usize, column: usize },

    #[error("palette thresholds must strictly increase (entry {index} is out of order)")]
    PaletteNotAscending { index: usize },

    #[error("palette has no entries")]
    EmptyPalette,

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Bounding box has no extent (empty mesh or a single point).
    #[error("mesh bounds are degenerate; cannot normalize")]
    DegenerateBounds,

    #[error("mesh has already been normalized")]
    AlreadyNormalized,
}

impl ProcgenError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcgenError>;
