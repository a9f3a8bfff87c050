//! Rule extraction: compile a nested [`Style`] into a flat rule list.
//!
//! The extractor recurses through pseudo-selector and media-query blocks,
//! accumulating suffix and condition context, and collects plain
//! declarations at each level. Compound values (`fontFamily` font faces,
//! `animationName` keyframes) are hoisted into auxiliary rules; the
//! auxiliary rule is appended to the sink before the style rule that
//! references it, so emitters can define `@font-face`/`@keyframes` blocks
//! ahead of their first use.

use crate::rule::model::{FontFaceRule, KeyframesRule, Rule, StyleRule};
use crate::style::model::{CssValue, Declarations, FamilySource, PropertyValue, Style, StyleEntry};

/// Errors from compiling a style description.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("nested block under property key '{0}': only ':' and '@media' keys may nest")]
    BlockValue(String),
    #[error("pseudo/media key '{0}' requires a nested block value")]
    ExpectedBlock(String),
    #[error("font-face value supplied for property '{0}': only fontFamily accepts it")]
    FontFaceValue(String),
    #[error("keyframes value supplied for property '{0}': only animationName accepts it")]
    KeyframesValue(String),
    #[error("animationName keyframe list is empty")]
    EmptyKeyframes,
}

/// Compile a style description into its flat rule list.
///
/// Rule order follows the recursive traversal; auxiliary font-face and
/// keyframes rules appear at the point their owning property was processed.
pub fn compile(style: &Style) -> Result<Vec<Rule>, CompileError> {
    let mut rules = Vec::new();
    extract(&mut rules, style, &[], &[])?;
    Ok(rules)
}

/// Recursive worker. `rules` acts as the output sink threaded through all
/// levels; `conditions` and `suffixes` carry the accumulated context.
fn extract(
    rules: &mut Vec<Rule>,
    style: &Style,
    conditions: &[String],
    suffixes: &[String],
) -> Result<(), CompileError> {
    let mut declarations = Declarations::new();

    for (key, entry) in style.iter() {
        if key.starts_with(':') {
            // Pseudo classes and pseudo elements.
            let block = expect_block(key, entry)?;
            let suffixes = append(suffixes, key);
            extract(rules, block, conditions, &suffixes)?;
        } else if key.starts_with('@') {
            if key.starts_with("@media") {
                let block = expect_block(key, entry)?;
                let conditions = append(conditions, key);
                extract(rules, block, &conditions, suffixes)?;
            } else {
                // Legacy inline @keyframes/@font-face syntax is not part of
                // the grammar; compound property values replace it.
                tracing::warn!(key, "ignoring unsupported at-rule in style block");
            }
        } else {
            let value = process_value(rules, key, entry)?;
            declarations.insert(key.to_string(), value);
        }
    }

    if !declarations.is_empty() {
        rules.push(Rule::Style(StyleRule::new(
            conditions.to_vec(),
            suffixes.to_vec(),
            declarations,
        )));
    }

    Ok(())
}

fn append(items: &[String], item: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(items);
    out.push(item.to_string());
    out
}

fn expect_block<'a>(key: &str, entry: &'a StyleEntry) -> Result<&'a Style, CompileError> {
    match entry {
        StyleEntry::Block(style) => Ok(style),
        StyleEntry::Property(_) => Err(CompileError::ExpectedBlock(key.to_string())),
    }
}

/// Process a property value, hoisting compound values into auxiliary rules
/// appended to `rules`. Returns the plain value to store in the current
/// declaration map.
fn process_value(
    rules: &mut Vec<Rule>,
    key: &str,
    entry: &StyleEntry,
) -> Result<CssValue, CompileError> {
    let value = match entry {
        StyleEntry::Property(value) => value,
        StyleEntry::Block(_) => return Err(CompileError::BlockValue(key.to_string())),
    };

    match value {
        PropertyValue::Value(plain) => Ok(plain.clone()),

        PropertyValue::FontFace(face) => {
            if key != "fontFamily" {
                return Err(CompileError::FontFaceValue(key.to_string()));
            }
            let (rule, family) = FontFaceRule::from_face(face);
            rules.push(Rule::FontFace(rule));
            Ok(CssValue::Text(family))
        }

        PropertyValue::FontStack(stack) => {
            if key != "fontFamily" {
                return Err(CompileError::FontFaceValue(key.to_string()));
            }
            let mut families = Vec::with_capacity(stack.len());
            for source in stack {
                match source {
                    FamilySource::Name(name) => families.push(name.clone()),
                    FamilySource::Face(face) => {
                        let (rule, family) = FontFaceRule::from_face(face);
                        rules.push(Rule::FontFace(rule));
                        families.push(family);
                    }
                }
            }
            Ok(CssValue::List(families))
        }

        PropertyValue::Keyframes(keyframes) => {
            if key != "animationName" {
                return Err(CompileError::KeyframesValue(key.to_string()));
            }
            if keyframes.is_empty() {
                return Err(CompileError::EmptyKeyframes);
            }
            let rule = KeyframesRule::new(keyframes.clone());
            let name = rule.animation_name();
            rules.push(Rule::Keyframes(rule));
            Ok(CssValue::Text(name))
        }
    }
}
