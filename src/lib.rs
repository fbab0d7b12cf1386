pub mod error;
pub mod math;
pub mod member;
pub mod meshing;
pub mod placement;
pub mod profile;
pub mod segment;

pub use error::{Result, TaperMeshError};
