//! Style input model and declaration rendering.

pub mod model;
pub mod render;

pub use model::{
    CssValue, Declarations, FamilySource, FontFace, FontWeight, Keyframe, KeyframeOffset,
    PropertyValue, Style, StyleEntry,
};
pub use render::{render_declarations, HostCapabilities, SupportAll};
