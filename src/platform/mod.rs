//! Platform abstraction layer
//!
//! Browser events are mapped to game triggers here so the mapping can be
//! tested natively. Storage lives in `persistence`.

pub mod input;

pub use input::{InputAction, TiltTrigger};
