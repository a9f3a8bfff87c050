//! The style description input model.
//!
//! A [`Style`] is a self-contained description of all CSS affecting one
//! element: plain declarations, pseudo-selector blocks (`:hover`, `::after`)
//! and media-query blocks (`@media ...`). Keys use the camelCase property
//! spelling (`fontFamily`, `zIndex`); they are hyphenated at render time.
//!
//! Two properties accept compound values that compile into auxiliary rules:
//! `fontFamily` may carry [`FontFace`] declarations (hoisted into
//! `@font-face` rules) and `animationName` may carry a [`Keyframe`] list
//! (hoisted into an `@keyframes` rule).

use indexmap::IndexMap;

/// A flat map of CSS property name to value. Insertion order is preserved
/// for rendering; rule identity sorts keys before hashing, so it does not
/// depend on this order.
pub type Declarations = IndexMap<String, CssValue>;

/// A plain CSS declaration value.
///
/// A `List` expands into one declaration per element with the same property
/// name; "same property, later wins" is the CSS mechanism for
/// progressive-enhancement fallback values.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    /// A bare number. Non-zero numbers get a `px` suffix at render time
    /// unless the property is in the unitless allow-list.
    Number(f64),
    /// A plain string value, passed through unchanged.
    Text(String),
    /// Multiple fallback values for one property.
    List(Vec<String>),
}

impl From<&str> for CssValue {
    fn from(value: &str) -> Self {
        CssValue::Text(value.to_string())
    }
}

impl From<String> for CssValue {
    fn from(value: String) -> Self {
        CssValue::Text(value)
    }
}

impl From<f64> for CssValue {
    fn from(value: f64) -> Self {
        CssValue::Number(value)
    }
}

impl From<i32> for CssValue {
    fn from(value: i32) -> Self {
        CssValue::Number(value.into())
    }
}

impl From<Vec<String>> for CssValue {
    fn from(values: Vec<String>) -> Self {
        CssValue::List(values)
    }
}

impl From<Vec<&str>> for CssValue {
    fn from(values: Vec<&str>) -> Self {
        CssValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// A font weight: a keyword (`bold`, `normal`) or a bare number. The
/// `font-weight` descriptor takes a single value, so fallback lists are
/// not representable here.
#[derive(Debug, Clone, PartialEq)]
pub enum FontWeight {
    Keyword(String),
    Number(f64),
}

impl From<&str> for FontWeight {
    fn from(keyword: &str) -> Self {
        FontWeight::Keyword(keyword.to_string())
    }
}

impl From<String> for FontWeight {
    fn from(keyword: String) -> Self {
        FontWeight::Keyword(keyword)
    }
}

impl From<f64> for FontWeight {
    fn from(value: f64) -> Self {
        FontWeight::Number(value)
    }
}

impl From<i32> for FontWeight {
    fn from(value: i32) -> Self {
        FontWeight::Number(value.into())
    }
}

impl FontWeight {
    fn to_value(&self) -> CssValue {
        match self {
            FontWeight::Keyword(keyword) => CssValue::Text(keyword.clone()),
            FontWeight::Number(value) => CssValue::Number(*value),
        }
    }
}

/// A `@font-face` declaration supplied as the value of `fontFamily`.
///
/// `src` is required ("url(...)" or "local(...)", one or several). If no
/// family name is given, one is synthesized from the rule hash (`f-<hash>`),
/// so the face can always be referenced by name.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub font_family: Option<String>,
    pub src: CssValue,
    pub font_style: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_variant: Option<String>,
}

impl FontFace {
    /// Create a font face from its required `src`.
    pub fn new(src: impl Into<CssValue>) -> Self {
        FontFace {
            font_family: None,
            src: src.into(),
            font_style: None,
            font_weight: None,
            font_variant: None,
        }
    }

    /// Set an explicit family name.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Set the font style (`normal`, `italic`, `oblique`).
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.font_style = Some(style.into());
        self
    }

    /// Set the font weight (keyword or number).
    pub fn with_weight(mut self, weight: impl Into<FontWeight>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    /// Set the font variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.font_variant = Some(variant.into());
        self
    }

    /// The face as a flat declaration map, in camelCase key spelling.
    /// The synthesized family name, if any, is appended by the rule
    /// constructor after hashing.
    pub(crate) fn to_declarations(&self) -> Declarations {
        let mut declarations = Declarations::new();
        if let Some(family) = &self.font_family {
            declarations.insert("fontFamily".to_string(), CssValue::Text(family.clone()));
        }
        declarations.insert("src".to_string(), self.src.clone());
        if let Some(style) = &self.font_style {
            declarations.insert("fontStyle".to_string(), CssValue::Text(style.clone()));
        }
        if let Some(weight) = &self.font_weight {
            declarations.insert("fontWeight".to_string(), weight.to_value());
        }
        if let Some(variant) = &self.font_variant {
            declarations.insert("fontVariant".to_string(), CssValue::Text(variant.clone()));
        }
        declarations
    }
}

/// One element of a `fontFamily` stack: a plain family name or an inline
/// font-face declaration that will be hoisted and referenced by name.
#[derive(Debug, Clone, PartialEq)]
pub enum FamilySource {
    Name(String),
    Face(FontFace),
}

impl From<&str> for FamilySource {
    fn from(name: &str) -> Self {
        FamilySource::Name(name.to_string())
    }
}

impl From<FontFace> for FamilySource {
    fn from(face: FontFace) -> Self {
        FamilySource::Face(face)
    }
}

/// A keyframe offset: a percentage or a named position (`from`, `to`).
#[derive(Debug, Clone, PartialEq)]
pub enum KeyframeOffset {
    Percent(f64),
    Named(String),
}

impl From<f64> for KeyframeOffset {
    fn from(value: f64) -> Self {
        KeyframeOffset::Percent(value)
    }
}

impl From<i32> for KeyframeOffset {
    fn from(value: i32) -> Self {
        KeyframeOffset::Percent(value.into())
    }
}

impl From<&str> for KeyframeOffset {
    fn from(value: &str) -> Self {
        KeyframeOffset::Named(value.to_string())
    }
}

impl KeyframeOffset {
    /// The offset as it participates in hashing and, for named offsets,
    /// rendering. Numeric offsets render with a `%` suffix but hash bare.
    pub(crate) fn key_text(&self) -> String {
        match self {
            KeyframeOffset::Percent(n) => format!("{n}"),
            KeyframeOffset::Named(name) => name.clone(),
        }
    }
}

/// One keyframe of an animation: an offset plus its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    pub offset: KeyframeOffset,
    pub declarations: Declarations,
}

impl Keyframe {
    /// Create a keyframe.
    pub fn new(offset: impl Into<KeyframeOffset>, declarations: Declarations) -> Self {
        Keyframe {
            offset: offset.into(),
            declarations,
        }
    }
}

/// The value of a single style key.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A plain value; valid for any property.
    Value(CssValue),
    /// A single font-face declaration; only valid for `fontFamily`.
    FontFace(FontFace),
    /// A family stack mixing names and font-face declarations; only valid
    /// for `fontFamily`.
    FontStack(Vec<FamilySource>),
    /// An ordered keyframe list; only valid for `animationName`.
    Keyframes(Vec<Keyframe>),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Value(value.into())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Value(value.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Value(value.into())
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Value(value.into())
    }
}

impl From<CssValue> for PropertyValue {
    fn from(value: CssValue) -> Self {
        PropertyValue::Value(value)
    }
}

impl From<Vec<&str>> for PropertyValue {
    fn from(values: Vec<&str>) -> Self {
        PropertyValue::Value(values.into())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Value(values.into())
    }
}

impl From<FontFace> for PropertyValue {
    fn from(face: FontFace) -> Self {
        PropertyValue::FontFace(face)
    }
}

impl From<Vec<FamilySource>> for PropertyValue {
    fn from(stack: Vec<FamilySource>) -> Self {
        PropertyValue::FontStack(stack)
    }
}

impl From<Vec<Keyframe>> for PropertyValue {
    fn from(keyframes: Vec<Keyframe>) -> Self {
        PropertyValue::Keyframes(keyframes)
    }
}

/// One entry in a style description: a property value, or a nested block
/// under a pseudo-selector or media-query key.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    Property(PropertyValue),
    Block(Style),
}

/// A nested style description: the raw compiler input.
///
/// Built with the consuming `set`/`nest` builders:
///
/// ```
/// use stylehash::style::Style;
///
/// let style = Style::new()
///     .set("color", "red")
///     .set("margin", 0)
///     .nest(":hover", Style::new().set("color", "blue"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: IndexMap<String, StyleEntry>,
}

impl Style {
    /// Create an empty style description.
    pub fn new() -> Self {
        Style::default()
    }

    /// Set a property value, replacing any previous entry for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, StyleEntry::Property(value.into()));
        self
    }

    /// Nest a block under a pseudo-selector or media-query key.
    pub fn nest(mut self, key: impl Into<String>, inner: Style) -> Self {
        self.insert(key, StyleEntry::Block(inner));
        self
    }

    /// Insert a raw entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: StyleEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns `true` if the style has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries at this nesting level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (key, value) in iter {
            style.insert(key, StyleEntry::Property(value.into()));
        }
        style
    }
}
