//! Flat rule records, their content-derived identity, and extraction from
//! nested style descriptions.

pub mod element;
pub mod extract;
pub mod model;

pub use element::ElementStyle;
pub use extract::{compile, CompileError};
pub use model::{FontFaceRule, KeyframesRule, Rule, StyleRule};
