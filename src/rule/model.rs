//! Rule records: the three flat rule kinds, their hashes, and CSS text.
//!
//! A rule hash is a fold (xor) of keyed string hashes over the rule's
//! content. Declaration keys are sorted lexically before folding, so the
//! hash does not depend on the insertion order of the source map.
//! Conditions and suffixes fold in their accumulated sequence.

use std::cell::OnceCell;

use crate::hash::RuleHash;
use crate::style::model::{CssValue, Declarations, FontFace, Keyframe, KeyframeOffset};
use crate::style::render::{render_declarations, render_number, HostCapabilities, SupportAll};

/// Fold a declaration map into `hash`: each key in sorted order, followed
/// by its value(s). Numbers fold in their rendered form (unit suffix
/// applied), so a numeric value and a string value that render to
/// different CSS text never share a hash.
fn mix_declarations(hash: &mut RuleHash, declarations: &Declarations) {
    let mut keys: Vec<&String> = declarations.keys().collect();
    keys.sort();
    for key in keys {
        hash.mix(key);
        match &declarations[key.as_str()] {
            CssValue::Text(text) => hash.mix(text),
            CssValue::Number(n) => hash.mix(&render_number(key, *n)),
            CssValue::List(values) => {
                for value in values {
                    hash.mix(value);
                }
            }
        }
    }
}

/// Wrap `text` in the accumulated condition blocks, first condition
/// outermost: `cond1{cond2{text}}`.
fn wrap_with_conditions(conditions: &[String], text: String) -> String {
    conditions
        .iter()
        .rev()
        .fold(text, |inner, condition| format!("{condition}{{{inner}}}"))
}

/// A selector-scoped declaration block.
///
/// The class name is derived from the hash (`s<hash>`; the letter prefix
/// keeps it a valid CSS identifier). The hash is computed on first access
/// and memoized: a rule read once for cache membership and again for
/// rendering must yield the identical identity.
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// `@media` wrappers accumulated outermost-to-innermost.
    pub conditions: Vec<String>,
    /// Pseudo-selector suffixes, concatenated onto the class selector.
    pub suffixes: Vec<String>,
    pub declarations: Declarations,
    hash: OnceCell<RuleHash>,
}

impl StyleRule {
    pub fn new(conditions: Vec<String>, suffixes: Vec<String>, declarations: Declarations) -> Self {
        StyleRule {
            conditions,
            suffixes,
            declarations,
            hash: OnceCell::new(),
        }
    }

    /// The rule's content hash, computed lazily and memoized.
    pub fn hash(&self) -> RuleHash {
        *self.hash.get_or_init(|| {
            let mut hash = RuleHash::seed();
            mix_declarations(&mut hash, &self.declarations);
            for condition in &self.conditions {
                hash.mix(condition);
            }
            for suffix in &self.suffixes {
                hash.mix(suffix);
            }
            hash
        })
    }

    /// The generated class name: `s` + hash.
    pub fn class_name(&self) -> String {
        format!("s{}", self.hash())
    }

    /// The full CSS text: `.className<suffixes>{decls}` wrapped in the
    /// accumulated conditions.
    pub fn css_text(&self, host: &dyn HostCapabilities) -> String {
        let selector = format!(".{}{}", self.class_name(), self.suffixes.join(""));
        let block = format!(
            "{selector}{{{}}}",
            render_declarations(host, &self.declarations)
        );
        wrap_with_conditions(&self.conditions, block)
    }
}

/// A `@font-face` block. Referenced by its family name rather than a class
/// name; if the source declaration carried none, a `f-<hash>` name is
/// synthesized and stored in the declarations.
#[derive(Debug, Clone)]
pub struct FontFaceRule {
    pub declarations: Declarations,
    hash: RuleHash,
}

impl FontFaceRule {
    /// Build a rule from a font-face declaration and return it together
    /// with the family name callers should reference.
    ///
    /// The hash covers the declarations as supplied; a synthesized family
    /// name is appended after hashing so it does not feed back into its own
    /// identity.
    pub fn from_face(face: &FontFace) -> (Self, String) {
        let mut declarations = face.to_declarations();
        let mut hash = RuleHash::seed();
        mix_declarations(&mut hash, &declarations);

        let family = match &face.font_family {
            Some(family) => family.clone(),
            None => {
                let family = format!("f-{hash}");
                declarations.insert("fontFamily".to_string(), CssValue::Text(family.clone()));
                family
            }
        };

        (FontFaceRule { declarations, hash }, family)
    }

    pub fn hash(&self) -> RuleHash {
        self.hash
    }

    /// `@font-face{decls}`. Descriptors are never filtered by host
    /// capabilities: support probes only know normal style properties.
    pub fn css_text(&self) -> String {
        format!("@font-face{{{}}}", render_declarations(&SupportAll, &self.declarations))
    }
}

/// A `@keyframes` block, referenced by its generated animation name.
#[derive(Debug, Clone)]
pub struct KeyframesRule {
    pub keyframes: Vec<Keyframe>,
    hash: RuleHash,
}

impl KeyframesRule {
    /// Build a rule from an ordered keyframe list.
    ///
    /// Precondition: `keyframes` is non-empty; the extractor rejects empty
    /// lists before construction.
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        let mut hash = RuleHash::seed();
        for frame in &keyframes {
            hash.mix(&frame.offset.key_text());
            mix_declarations(&mut hash, &frame.declarations);
        }
        KeyframesRule { keyframes, hash }
    }

    pub fn hash(&self) -> RuleHash {
        self.hash
    }

    /// The generated animation name: `a-` + hash.
    pub fn animation_name(&self) -> String {
        format!("a-{}", self.hash)
    }

    /// `@keyframes <name>{<offset> {decls}...}`; numeric offsets get a `%`
    /// suffix, named offsets (`from`, `to`) pass through.
    pub fn css_text(&self, host: &dyn HostCapabilities) -> String {
        let mut block = String::new();
        for frame in &self.keyframes {
            let offset = match &frame.offset {
                KeyframeOffset::Percent(n) => format!("{n}%"),
                KeyframeOffset::Named(name) => name.clone(),
            };
            block.push_str(&format!(
                "{offset} {{{}}}",
                render_declarations(host, &frame.declarations)
            ));
        }
        format!("@keyframes {}{{{block}}}", self.animation_name())
    }
}

/// One flat, self-contained unit of CSS.
#[derive(Debug, Clone)]
pub enum Rule {
    Style(StyleRule),
    FontFace(FontFaceRule),
    Keyframes(KeyframesRule),
}

impl Rule {
    /// The content hash identifying this rule for deduplication.
    pub fn hash(&self) -> RuleHash {
        match self {
            Rule::Style(rule) => rule.hash(),
            Rule::FontFace(rule) => rule.hash(),
            Rule::Keyframes(rule) => rule.hash(),
        }
    }

    /// The generated class name, for style rules only. Font-face and
    /// keyframes rules are referenced by family/animation name instead.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Rule::Style(rule) => Some(rule.class_name()),
            Rule::FontFace(_) | Rule::Keyframes(_) => None,
        }
    }

    /// The rule's full CSS text, ready for stylesheet insertion.
    pub fn css_text(&self, host: &dyn HostCapabilities) -> String {
        match self {
            Rule::Style(rule) => rule.css_text(host),
            Rule::FontFace(rule) => rule.css_text(),
            Rule::Keyframes(rule) => rule.css_text(host),
        }
    }
}
