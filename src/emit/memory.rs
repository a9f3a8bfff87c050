//! In-memory record-keeping emitter, for server-side rendering and tests.

use indexmap::IndexMap;

use crate::emit::Emitter;
use crate::hash::RuleHash;
use crate::rule::model::Rule;
use crate::style::render::HostCapabilities;

/// Stores every emitted rule keyed by hash, in first-emission order.
///
/// Repeat emission of the same hash overwrites the stored rule; since
/// identical hashes carry identical content this is a no-op in practice.
/// The accumulated map is read-only from the outside: it is only modified
/// through [`Emitter::emit_rule`].
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    rules: IndexMap<RuleHash, Rule>,
}

impl MemoryEmitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        MemoryEmitter::default()
    }

    /// All rules emitted so far, keyed by hash, in first-emission order.
    pub fn rules(&self) -> &IndexMap<RuleHash, Rule> {
        &self.rules
    }

    /// Number of distinct rules seen.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render the accumulated rules to one CSS string, in emission order.
    /// This is the server-side rendering output.
    pub fn css_text(&self, host: &dyn HostCapabilities) -> String {
        self.rules
            .values()
            .map(|rule| rule.css_text(host))
            .collect()
    }
}

impl Emitter for MemoryEmitter {
    fn emit_rule(&mut self, rule: &Rule) {
        self.rules.insert(rule.hash(), rule.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::model::Style;
    use crate::style::render::SupportAll;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emit_style_records_each_rule_once() {
        let style = Style::new()
            .set("color", "red")
            .nest(":hover", Style::new().set("color", "blue"));

        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&style).unwrap();
        assert_eq!(emitter.len(), 2);
    }

    #[test]
    fn test_repeat_emission_is_a_no_op() {
        let style = Style::new().set("color", "red");

        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&style).unwrap();
        emitter.emit_style(&style).unwrap();
        emitter.emit_style(&style.clone()).unwrap();
        assert_eq!(emitter.len(), 1);
    }

    #[test]
    fn test_distinct_styles_accumulate() {
        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&Style::new().set("color", "red")).unwrap();
        emitter.emit_style(&Style::new().set("color", "blue")).unwrap();
        emitter.emit_style(&Style::new().set("color", "red")).unwrap();
        assert_eq!(emitter.len(), 2);
    }

    #[test]
    fn test_shared_rules_dedupe_across_styles() {
        // Two elements sharing the hover block produce three distinct rules.
        let hover = Style::new().set("color", "blue");
        let a = Style::new().set("color", "red").nest(":hover", hover.clone());
        let b = Style::new().set("color", "green").nest(":hover", hover);

        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&a).unwrap();
        emitter.emit_style(&b).unwrap();
        assert_eq!(emitter.len(), 3);
    }

    #[test]
    fn test_number_and_bare_string_rules_stored_separately() {
        // `margin: 1` renders `margin:1px`, `margin: "1"` renders
        // `margin:1`; both rules must survive emission intact.
        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&Style::new().set("margin", 1)).unwrap();
        emitter.emit_style(&Style::new().set("margin", "1")).unwrap();

        assert_eq!(emitter.len(), 2);
        let css = emitter.css_text(&SupportAll);
        assert!(css.contains("{margin:1px}"));
        assert!(css.contains("{margin:1}"));
    }

    #[test]
    fn test_css_text_concatenates_in_emission_order() {
        let mut emitter = MemoryEmitter::new();
        emitter.emit_style(&Style::new().set("color", "red")).unwrap();
        emitter.emit_style(&Style::new().set("color", "blue")).unwrap();

        let css = emitter.css_text(&SupportAll);
        assert!(css.starts_with(".s29ec1a4d45b6d719{color:red}"));
        let red = css.find("color:red").unwrap();
        let blue = css.find("color:blue").unwrap();
        assert!(red < blue);
    }

    #[test]
    fn test_empty_emitter() {
        let emitter = MemoryEmitter::new();
        assert!(emitter.is_empty());
        assert_eq!(emitter.css_text(&SupportAll), "");
    }
}
