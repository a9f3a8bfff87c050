//! Live-stylesheet emitter.
//!
//! Writes rule text into a stylesheet through the [`StyleSheetTarget`]
//! adapter on first sight of each hash. Rules are only ever appended, never
//! removed or replaced: among same-specificity selectors, precedence then
//! follows emission order, and an application without dynamic styles
//! approaches a fixed upper bound of rules it never exceeds.

use std::collections::HashSet;

use crate::emit::Emitter;
use crate::hash::RuleHash;
use crate::rule::model::Rule;
use crate::style::render::HostCapabilities;

/// Boundary to the physical stylesheet (a DOM `CSSStyleSheet`, a file, ...).
///
/// The emitter always passes `index == rule_count()`: insertion is
/// append-only at the end of the existing rule list.
pub trait StyleSheetTarget {
    /// Insert a rule's CSS text at the given index.
    fn insert_rule(&mut self, css_text: &str, index: usize);

    /// The current number of rules in the sheet.
    fn rule_count(&self) -> usize;
}

/// Emitter that renders each distinct rule once and hands its text to a
/// [`StyleSheetTarget`]. An already-inserted rule is never re-inserted or
/// mutated.
#[derive(Debug)]
pub struct SheetEmitter<T, H> {
    target: T,
    host: H,
    /// Hashes already inserted. The target offers no good interface for
    /// asking whether a particular rule is present, so we track it here.
    seen: HashSet<RuleHash>,
}

impl<T: StyleSheetTarget, H: HostCapabilities> SheetEmitter<T, H> {
    /// Create an emitter writing to `target`, rendering with `host`'s
    /// capability predicate.
    pub fn new(target: T, host: H) -> Self {
        SheetEmitter {
            target,
            host,
            seen: HashSet::new(),
        }
    }

    /// The underlying target, for inspection.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Consume the emitter and return the target.
    pub fn into_target(self) -> T {
        self.target
    }

    /// Number of distinct rules inserted so far.
    pub fn inserted(&self) -> usize {
        self.seen.len()
    }
}

impl<T: StyleSheetTarget, H: HostCapabilities> Emitter for SheetEmitter<T, H> {
    fn emit_rule(&mut self, rule: &Rule) {
        let hash = rule.hash();
        if self.seen.insert(hash) {
            let index = self.target.rule_count();
            self.target.insert_rule(&rule.css_text(&self.host), index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::model::{FontFace, Style};
    use crate::style::render::SupportAll;
    use pretty_assertions::assert_eq;

    /// A Vec-backed stylesheet double that records insertion indices.
    #[derive(Debug, Default)]
    struct FakeSheet {
        rules: Vec<String>,
        indices: Vec<usize>,
    }

    impl StyleSheetTarget for FakeSheet {
        fn insert_rule(&mut self, css_text: &str, index: usize) {
            self.indices.push(index);
            self.rules.insert(index, css_text.to_string());
        }

        fn rule_count(&self) -> usize {
            self.rules.len()
        }
    }

    #[test]
    fn test_first_sight_inserts_rendered_text() {
        let mut emitter = SheetEmitter::new(FakeSheet::default(), SupportAll);
        emitter.emit_style(&Style::new().set("color", "red")).unwrap();

        assert_eq!(
            emitter.target().rules,
            vec![".s29ec1a4d45b6d719{color:red}".to_string()]
        );
    }

    #[test]
    fn test_duplicate_emission_inserts_once() {
        let style = Style::new()
            .set("color", "red")
            .nest(":hover", Style::new().set("color", "blue"));

        let mut emitter = SheetEmitter::new(FakeSheet::default(), SupportAll);
        emitter.emit_style(&style).unwrap();
        emitter.emit_style(&style).unwrap();

        assert_eq!(emitter.target().rules.len(), 2);
        assert_eq!(emitter.inserted(), 2);
    }

    #[test]
    fn test_insertion_is_append_only() {
        let mut emitter = SheetEmitter::new(FakeSheet::default(), SupportAll);
        emitter.emit_style(&Style::new().set("color", "red")).unwrap();
        emitter.emit_style(&Style::new().set("color", "blue")).unwrap();
        emitter.emit_style(&Style::new().set("color", "green")).unwrap();

        // Each insertion lands at the then-current end of the rule list.
        assert_eq!(emitter.target().indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_auxiliary_rules_inserted_before_referencing_rule() {
        let style = Style::new()
            .set("fontFamily", FontFace::new("url(a)"))
            .set("color", "green");

        let mut emitter = SheetEmitter::new(FakeSheet::default(), SupportAll);
        emitter.emit_style(&style).unwrap();

        let rules = &emitter.target().rules;
        assert_eq!(rules.len(), 2);
        assert!(rules[0].starts_with("@font-face{"));
        assert!(rules[1].starts_with(".s"));
    }

    #[test]
    fn test_emit_rules_accepts_precompiled_lists() {
        let rules = crate::rule::compile(&Style::new().set("color", "red")).unwrap();

        let mut emitter = SheetEmitter::new(FakeSheet::default(), SupportAll);
        emitter.emit_rules(&rules);
        emitter.emit_rules(&rules);

        assert_eq!(emitter.target().rules.len(), 1);
    }

    #[test]
    fn test_host_filtering_applies_to_inserted_text() {
        struct NoAppearance;
        impl HostCapabilities for NoAppearance {
            fn property_is_supported(&self, property: &str) -> bool {
                property != "appearance"
            }
        }

        let style = Style::new().set("color", "red").set("appearance", "none");
        let mut emitter = SheetEmitter::new(FakeSheet::default(), NoAppearance);
        emitter.emit_style(&style).unwrap();

        let text = &emitter.target().rules[0];
        assert!(text.contains("color:red"));
        assert!(!text.contains("appearance"));
    }
}
