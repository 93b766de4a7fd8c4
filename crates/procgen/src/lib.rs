//! Procedural terrain for the demo scenes: noise ground, fractal landscape and
//! starfield.
//!
//! Everything here produces plain data (positions, normals, colors, indices,
//! transforms). Uploading it and drawing it is the renderer's job.

pub mod biome;
pub mod error;
pub mod ground;
pub mod landscape;
pub mod mesh;
pub mod noise_field;
pub mod normalize;
pub mod normals;
pub mod starfield;
pub mod terrain;

pub use biome::*;
pub use error::ProcgenError;
pub use ground::*;
pub use landscape::*;
pub use mesh::*;
pub use noise_field::*;
pub use normalize::*;
pub use normals::*;
pub use starfield::*;
pub use terrain::*;
