//! Pre-compiled element styles.
//!
//! Tree-walking integrations replace an element's style attribute with the
//! class names generated for it. [`ElementStyle`] is the form they hold on
//! to: the compiled rule list for one element, with helpers for building
//! the class attribute. Compiling once and reusing the `ElementStyle` is
//! considerably cheaper than re-compiling the raw [`Style`] per render.

use crate::rule::extract::{compile, CompileError};
use crate::rule::model::Rule;
use crate::style::model::Style;

/// The compiled rule set of one element's style description.
#[derive(Debug, Clone)]
pub struct ElementStyle {
    rules: Vec<Rule>,
}

impl ElementStyle {
    /// Compile a style description.
    pub fn compile(style: &Style) -> Result<Self, CompileError> {
        Ok(ElementStyle {
            rules: compile(style)?,
        })
    }

    /// Wrap an already-compiled rule list.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        ElementStyle { rules }
    }

    /// The compiled rules, in traversal order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Class names of the style rules, in rule order. Font-face and
    /// keyframes rules have no class name and are skipped.
    pub fn class_names(&self) -> impl Iterator<Item = String> + '_ {
        self.rules.iter().filter_map(Rule::class_name)
    }

    /// The value for the element's class attribute: the generated class
    /// names space-joined, with any pre-existing class value prepended.
    pub fn class_attribute(&self, existing: Option<&str>) -> String {
        let generated: Vec<String> = self.class_names().collect();
        match existing {
            Some(existing) if !existing.is_empty() => {
                if generated.is_empty() {
                    existing.to_string()
                } else {
                    format!("{existing} {}", generated.join(" "))
                }
            }
            _ => generated.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::model::FontFace;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_class_names_skip_auxiliary_rules() {
        let style = Style::new()
            .set("fontFamily", FontFace::new("url(a)"))
            .set("color", "green")
            .nest(":hover", Style::new().set("color", "blue"));
        let element = ElementStyle::compile(&style).unwrap();

        assert_eq!(element.rules().len(), 3);
        let names: Vec<String> = element.class_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.iter().all(|n| n.starts_with('s')));
    }

    #[test]
    fn test_class_attribute_joins_with_spaces() {
        let style = Style::new()
            .set("color", "red")
            .nest(":hover", Style::new().set("color", "blue"));
        let element = ElementStyle::compile(&style).unwrap();
        let attribute = element.class_attribute(None);
        assert_eq!(attribute.split(' ').count(), 2);
    }

    #[test]
    fn test_class_attribute_preserves_existing_value() {
        let style = Style::new().set("color", "red");
        let element = ElementStyle::compile(&style).unwrap();
        let attribute = element.class_attribute(Some("icon-set"));
        assert!(attribute.starts_with("icon-set "));
        assert!(attribute.ends_with(&element.class_names().next().unwrap()));
    }

    #[test]
    fn test_class_attribute_empty_style() {
        let element = ElementStyle::compile(&Style::new()).unwrap();
        assert_eq!(element.class_attribute(None), "");
        assert_eq!(element.class_attribute(Some("existing")), "existing");
    }

    #[test]
    fn test_recompile_yields_identical_class_names() {
        let style = Style::new().set("color", "red").set("margin", 0);
        let first = ElementStyle::compile(&style).unwrap();
        let second = ElementStyle::compile(&style).unwrap();
        assert_eq!(
            first.class_names().collect::<Vec<_>>(),
            second.class_names().collect::<Vec<_>>()
        );
    }
}
