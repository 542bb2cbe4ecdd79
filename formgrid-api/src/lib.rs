//! Formgrid API - Shared form model types for the builder and its collaborators.

mod field;
mod geometry;
mod schema;

pub use field::*;
pub use geometry::*;
pub use schema::*;
