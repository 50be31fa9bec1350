//! Person collections
//!
//! The registry owning every person and the indices derived from it.

pub mod nomen;
pub mod registry;

pub use nomen::NomenIndex;
pub use registry::PersonRegistry;
