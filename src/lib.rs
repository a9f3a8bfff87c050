//! # stylehash
//!
//! Compile declarative, nested style descriptions into flat CSS rules, each
//! identified by a content-derived, order-independent hash, and deduplicate
//! them before they reach a live stylesheet or a server-side output buffer.
//!
//! A [`style::Style`] fully describes the CSS affecting one element: plain
//! declarations plus nested pseudo-selector and `@media` blocks. Compiling
//! it flattens the nesting into [`rule::Rule`] records whose hashes double
//! as class names, so identical styles on different elements share one rule
//! and re-renders map onto rules already in the sheet.
//!
//! ## Core Systems
//!
//! - **[`hash`]** — Keyed 64-bit hash primitive and the `RuleHash` identity
//! - **[`style`]** — Input model, compound font/keyframe values, declaration
//!   rendering with host capability filtering
//! - **[`rule`]** — Recursive extraction into flat style/font-face/keyframes
//!   rules with memoized identity and CSS text
//! - **[`emit`]** — Deduplicating emitters: in-memory record keeper for
//!   server-side rendering, stylesheet writer behind an adapter trait
//!
//! ## Example
//!
//! ```
//! use stylehash::emit::{Emitter, MemoryEmitter};
//! use stylehash::style::{Style, SupportAll};
//!
//! let button = Style::new()
//!     .set("color", "red")
//!     .set("margin", 0)
//!     .nest(":hover", Style::new().set("color", "blue"));
//!
//! let mut emitter = MemoryEmitter::new();
//! emitter.emit_style(&button).unwrap();
//! emitter.emit_style(&button).unwrap(); // no-op: same hashes
//!
//! assert_eq!(emitter.len(), 2);
//! let css = emitter.css_text(&SupportAll);
//! assert!(css.contains("color:red"));
//! assert!(css.contains(":hover{color:blue}"));
//! ```

// Foundation
pub mod hash;

// Core systems
pub mod style;
pub mod rule;

// Emission
pub mod emit;
