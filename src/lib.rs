pub mod constants;
pub mod fixed_point;
pub mod frames;
pub mod jpl_ephem;
pub mod objects;
pub mod orbit;
pub mod rotation;
pub mod selection;
pub mod starframe_errors;
pub mod time;
pub mod time_cache;
pub mod universal_coord;

pub use frames::{FrameKind, FrameType, ReferenceFrame};
pub use selection::Selection;
pub use starframe_errors::StarframeError;
pub use universal_coord::UniversalCoord;
