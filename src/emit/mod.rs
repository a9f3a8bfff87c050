//! Emitters: materialize compiled rules at most once per distinct hash.
//!
//! An emitter owns the deduplication cache for one rendering session. The
//! cache grows monotonically; duplicate emission is the expected steady
//! state and is always a silent no-op, never an error.

pub mod memory;
pub mod sheet;

pub use memory::MemoryEmitter;
pub use sheet::{SheetEmitter, StyleSheetTarget};

use crate::rule::extract::{compile, CompileError};
use crate::rule::model::Rule;
use crate::style::model::Style;

/// The emission contract: idempotent per distinct rule hash.
pub trait Emitter {
    /// Emit a single rule. Repeat sightings of the same hash are no-ops.
    fn emit_rule(&mut self, rule: &Rule);

    /// Compile a style description and emit every produced rule.
    fn emit_style(&mut self, style: &Style) -> Result<(), CompileError> {
        for rule in compile(style)? {
            self.emit_rule(&rule);
        }
        Ok(())
    }

    /// Emit an already-compiled rule list.
    fn emit_rules(&mut self, rules: &[Rule]) {
        for rule in rules {
            self.emit_rule(rule);
        }
    }
}
