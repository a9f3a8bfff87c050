//! Declaration rendering: flat declaration maps to CSS text.
//!
//! Property names are hyphenated from their camelCase spelling, numeric
//! values get a `px` suffix unless the property takes unitless numbers, and
//! list values expand into repeated declarations. Properties the host does
//! not support are dropped silently, with one exception: `src` is always
//! rendered because capability probes only know about normal style
//! properties, not `@font-face` descriptors.

use crate::style::model::{CssValue, Declarations};

/// The host environment in which rendered rules take effect.
pub trait HostCapabilities {
    /// Return `true` if the host supports the given camelCase CSS property.
    /// Must be referentially pure: the same answer for the same input over
    /// the process lifetime. Implementations are encouraged to cache if the
    /// probe is expensive.
    fn property_is_supported(&self, property: &str) -> bool;
}

/// A host that supports every property. Used for server-side rendering,
/// tests, and `@font-face` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportAll;

impl HostCapabilities for SupportAll {
    fn property_is_supported(&self, _property: &str) -> bool {
        true
    }
}

/// Properties whose numeric values are emitted without a `px` suffix.
///
/// The allow-list traces back through Aphrodite to React.
const UNITLESS: &[&str] = &[
    "animationIterationCount",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "boxFlex",
    "boxFlexGroup",
    "boxOrdinalGroup",
    "columnCount",
    "flex",
    "flexGrow",
    "flexPositive",
    "flexShrink",
    "flexNegative",
    "flexOrder",
    "gridRow",
    "gridColumn",
    "fontWeight",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
    // SVG-related properties.
    "fillOpacity",
    "floodOpacity",
    "stopOpacity",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
];

const VENDOR_PREFIXES: &[&str] = &["Webkit", "ms", "Moz", "O"];

/// Returns `true` if numeric values of `property` are emitted bare.
/// Vendor-prefixed variants (`WebkitFlex`, `msFlex`, ...) count too.
fn is_unitless(property: &str) -> bool {
    if UNITLESS.contains(&property) {
        return true;
    }
    for prefix in VENDOR_PREFIXES {
        if let Some(rest) = property.strip_prefix(prefix) {
            let mut chars = rest.chars();
            if let Some(first) = chars.next() {
                if first.is_ascii_uppercase() {
                    let base: String =
                        first.to_ascii_lowercase().to_string() + chars.as_str();
                    if UNITLESS.contains(&base.as_str()) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Hyphenate a camelCase property name to kebab-case.
///
/// A leading `ms` segment becomes the `-ms-` vendor prefix; other vendor
/// prefixes start with an uppercase letter and hyphenate on their own
/// (`WebkitFlex` -> `-webkit-flex`, `msTransform` -> `-ms-transform`).
pub fn hyphenate(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}

/// Render a numeric value, appending `px` to non-zero numbers of
/// properties that are not unitless. Rule identity hashes numbers in this
/// rendered form, so a number and its rendered string are the same value.
pub(crate) fn render_number(property: &str, value: f64) -> String {
    if value == 0.0 || is_unitless(property) {
        format!("{value}")
    } else {
        format!("{value}px")
    }
}

/// Render a declaration map to CSS text, e.g. `color:red;margin:1px`.
/// Declarations are `;`-joined with no trailing separator; list values
/// repeat the property once per element.
pub fn render_declarations(host: &dyn HostCapabilities, declarations: &Declarations) -> String {
    let mut out = String::new();

    let mut append = |out: &mut String, name: &str, value: &str| {
        if !out.is_empty() {
            out.push(';');
        }
        out.push_str(name);
        out.push(':');
        out.push_str(value);
    };

    for (property, value) in declarations {
        if property != "src" && !host.property_is_supported(property) {
            continue;
        }
        let name = hyphenate(property);
        match value {
            CssValue::Text(text) => append(&mut out, &name, text),
            CssValue::Number(n) => append(&mut out, &name, &render_number(property, *n)),
            CssValue::List(values) => {
                for v in values {
                    append(&mut out, &name, v);
                }
            }
        }
    }

    out
}
