//! # Catalog objects
//!
//! The minimal objects a [`crate::selection::Selection`] can point to. They carry only what
//! the frame graph needs: a position provider and, for bodies and stars, a rotation model.

pub mod body;
pub mod deep_sky;
pub mod location;
pub mod star;

pub use body::Body;
pub use deep_sky::DeepSkyObject;
pub use location::Location;
pub use star::Star;
