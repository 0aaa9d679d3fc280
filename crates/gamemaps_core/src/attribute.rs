//! Typed, validated metadata values attached to a map
//!
//! Attributes are defined by the codec that opened the map and are exposed as
//! an ordered list. Identity is positional: index 0 of one format has nothing
//! to do with index 0 of another.

use serde::{Deserialize, Serialize};

use crate::AttributeError;

/// The current value of an attribute, independent of its constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttrValue {
    Int(i64),
    /// Index into the option list of an enum attribute
    Enum(usize),
    Filename(String),
    Text(String),
}

impl AttrValue {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Enum(_) => "enum",
            AttrValue::Filename(_) => "filename",
            AttrValue::Text(_) => "text",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            AttrValue::Enum(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the string payload of a filename or text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Filename(s) | AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to serde_json::Value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttrValue::Int(v) => serde_json::json!(*v),
            AttrValue::Enum(i) => serde_json::json!(*i),
            AttrValue::Filename(s) | AttrValue::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

// ─── Variants ────────────────────────────────────────────────────────────────

/// Bounded integer. `min <= value <= max` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInt")]
pub struct IntAttribute {
    min: i64,
    max: i64,
    value: i64,
}

impl IntAttribute {
    pub fn new(min: i64, max: i64, value: i64) -> Result<Self, AttributeError> {
        if min > max {
            return Err(AttributeError::InvalidBounds { min, max });
        }
        let mut attr = Self {
            min,
            max,
            value: min,
        };
        attr.set(value)?;
        Ok(attr)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn get(&self) -> i64 {
        self.value
    }

    pub fn set(&mut self, value: i64) -> Result<(), AttributeError> {
        if value < self.min || value > self.max {
            return Err(AttributeError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        self.value = value;
        Ok(())
    }
}

/// Selection from a fixed, ordered option list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEnum")]
pub struct EnumAttribute {
    options: Vec<String>,
    index: usize,
}

impl EnumAttribute {
    pub fn new(options: Vec<String>, index: usize) -> Result<Self, AttributeError> {
        if index >= options.len() {
            return Err(AttributeError::InvalidIndex {
                index,
                len: options.len(),
            });
        }
        Ok(Self { options, index })
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn get(&self) -> usize {
        self.index
    }

    /// Text of the currently selected option
    pub fn selected(&self) -> &str {
        &self.options[self.index]
    }

    pub fn set(&mut self, index: usize) -> Result<(), AttributeError> {
        if index >= self.options.len() {
            return Err(AttributeError::InvalidIndex {
                index,
                len: self.options.len(),
            });
        }
        self.index = index;
        Ok(())
    }
}

/// Name of an external file, with an advisory extension filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameAttribute {
    value: String,
    /// Accepted extensions without the leading dot. Empty accepts anything.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extensions: Vec<String>,
}

impl FilenameAttribute {
    pub fn new(value: impl Into<String>, extensions: Vec<String>) -> Self {
        Self {
            value: value.into(),
            extensions,
        }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Check a candidate filename against the extension filter (case-insensitive)
    pub fn accepts(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let Some((_, ext)) = name.rsplit_once('.') else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Free text with an optional length limit, counted in characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawText")]
pub struct TextAttribute {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_len: Option<usize>,
}

impl TextAttribute {
    pub fn new(value: impl Into<String>, max_len: Option<usize>) -> Result<Self, AttributeError> {
        let mut attr = Self {
            value: String::new(),
            max_len,
        };
        attr.set(value)?;
        Ok(attr)
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn set(&mut self, value: impl Into<String>) -> Result<(), AttributeError> {
        let value = value.into();
        if let Some(max) = self.max_len {
            let len = value.chars().count();
            if len > max {
                return Err(AttributeError::TooLong { len, max });
            }
        }
        self.value = value;
        Ok(())
    }
}

// Deserialization goes through the validating constructors so a loaded
// attribute upholds the same invariants as a constructed one.

#[derive(Deserialize)]
struct RawInt {
    min: i64,
    max: i64,
    value: i64,
}

impl TryFrom<RawInt> for IntAttribute {
    type Error = AttributeError;

    fn try_from(raw: RawInt) -> Result<Self, Self::Error> {
        IntAttribute::new(raw.min, raw.max, raw.value)
    }
}

#[derive(Deserialize)]
struct RawEnum {
    options: Vec<String>,
    index: usize,
}

impl TryFrom<RawEnum> for EnumAttribute {
    type Error = AttributeError;

    fn try_from(raw: RawEnum) -> Result<Self, Self::Error> {
        EnumAttribute::new(raw.options, raw.index)
    }
}

#[derive(Deserialize)]
struct RawText {
    value: String,
    #[serde(default)]
    max_len: Option<usize>,
}

impl TryFrom<RawText> for TextAttribute {
    type Error = AttributeError;

    fn try_from(raw: RawText) -> Result<Self, Self::Error> {
        TextAttribute::new(raw.value, raw.max_len)
    }
}

// ─── Attribute ───────────────────────────────────────────────────────────────

/// The constrained value held by an [`Attribute`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    Int(IntAttribute),
    Enum(EnumAttribute),
    Filename(FilenameAttribute),
    Text(TextAttribute),
}

/// A named, described, validated metadata value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(default)]
    description: String,
    /// Set by a successful `set`
    #[serde(default)]
    changed: bool,
    kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            changed: false,
            kind,
        }
    }

    /// Create a bounded integer attribute
    pub fn int(
        name: impl Into<String>,
        description: impl Into<String>,
        min: i64,
        max: i64,
        value: i64,
    ) -> Result<Self, AttributeError> {
        let kind = AttributeKind::Int(IntAttribute::new(min, max, value)?);
        Ok(Self::new(name, description, kind))
    }

    /// Create an enum attribute from option labels
    pub fn enumeration<S: Into<String>>(
        name: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = S>,
        index: usize,
    ) -> Result<Self, AttributeError> {
        let options = options.into_iter().map(Into::into).collect();
        let kind = AttributeKind::Enum(EnumAttribute::new(options, index)?);
        Ok(Self::new(name, description, kind))
    }

    /// Create a filename attribute
    pub fn filename<S: Into<String>>(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
        extensions: impl IntoIterator<Item = S>,
    ) -> Self {
        let extensions = extensions.into_iter().map(Into::into).collect();
        let kind = AttributeKind::Filename(FilenameAttribute::new(value, extensions));
        Self::new(name, description, kind)
    }

    /// Create a text attribute
    pub fn text(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
        max_len: Option<usize>,
    ) -> Result<Self, AttributeError> {
        let kind = AttributeKind::Text(TextAttribute::new(value, max_len)?);
        Ok(Self::new(name, description, kind))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the value was set since the map was opened
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Get the current value
    pub fn get(&self) -> AttrValue {
        match &self.kind {
            AttributeKind::Int(a) => AttrValue::Int(a.get()),
            AttributeKind::Enum(a) => AttrValue::Enum(a.get()),
            AttributeKind::Filename(a) => AttrValue::Filename(a.get().to_string()),
            AttributeKind::Text(a) => AttrValue::Text(a.get().to_string()),
        }
    }

    /// Validate and store a new value. On error the old value is kept.
    pub fn set(&mut self, value: AttrValue) -> Result<(), AttributeError> {
        match (&mut self.kind, value) {
            (AttributeKind::Int(a), AttrValue::Int(v)) => a.set(v)?,
            (AttributeKind::Enum(a), AttrValue::Enum(i)) => a.set(i)?,
            (AttributeKind::Filename(a), AttrValue::Filename(s)) => a.set(s),
            (AttributeKind::Text(a), AttrValue::Text(s)) => a.set(s)?,
            (kind, value) => {
                return Err(AttributeError::TypeMismatch {
                    expected: kind_name(kind),
                    found: value.kind_name(),
                });
            }
        }
        self.changed = true;
        Ok(())
    }

    pub fn as_int(&self) -> Option<&IntAttribute> {
        match &self.kind {
            AttributeKind::Int(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumAttribute> {
        match &self.kind {
            AttributeKind::Enum(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_filename(&self) -> Option<&FilenameAttribute> {
        match &self.kind {
            AttributeKind::Filename(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAttribute> {
        match &self.kind {
            AttributeKind::Text(a) => Some(a),
            _ => None,
        }
    }
}

fn kind_name(kind: &AttributeKind) -> &'static str {
    match kind {
        AttributeKind::Int(_) => "int",
        AttributeKind::Enum(_) => "enum",
        AttributeKind::Filename(_) => "filename",
        AttributeKind::Text(_) => "text",
    }
}

// ─── AttributeList ───────────────────────────────────────────────────────────

/// Ordered attribute list owned by a map.
///
/// The order is fixed by the codec when the map is built. Values can change
/// through [`AttributeList::set`]; the list itself cannot be reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<Attribute>);

impl AttributeList {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self(attributes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.0.get(index)
    }

    /// Current value of the attribute at `index`
    pub fn value(&self, index: usize) -> Result<AttrValue, AttributeError> {
        self.get(index).map(Attribute::get).ok_or(AttributeError::NoSuchAttribute {
            index,
            len: self.0.len(),
        })
    }

    /// Set the attribute at `index`
    pub fn set(&mut self, index: usize, value: AttrValue) -> Result<(), AttributeError> {
        let len = self.0.len();
        self.0
            .get_mut(index)
            .ok_or(AttributeError::NoSuchAttribute { index, len })?
            .set(value)
    }

    /// First attribute with the given name, with its position
    pub fn find(&self, name: &str) -> Option<(usize, &Attribute)> {
        self.0.iter().enumerate().find(|(_, a)| a.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Whether any attribute was set since the map was opened
    pub fn any_changed(&self) -> bool {
        self.0.iter().any(Attribute::is_changed)
    }
}

impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_set_within_range() {
        let mut attr = IntAttribute::new(0, 10, 5).unwrap();
        assert_eq!(attr.set(15), Err(AttributeError::OutOfRange { value: 15, min: 0, max: 10 }));
        assert_eq!(attr.get(), 5);
        attr.set(7).unwrap();
        assert_eq!(attr.get(), 7);
    }

    #[test]
    fn test_int_bounds_inclusive() {
        let mut attr = IntAttribute::new(-3, 3, 0).unwrap();
        for v in -5..=5 {
            let ok = attr.set(v).is_ok();
            assert_eq!(ok, (-3..=3).contains(&v), "value {v}");
        }
        assert_eq!(attr.get(), 3);
    }

    #[test]
    fn test_int_rejects_bad_construction() {
        assert!(matches!(
            IntAttribute::new(5, 1, 3),
            Err(AttributeError::InvalidBounds { min: 5, max: 1 })
        ));
        assert!(IntAttribute::new(0, 1, 2).is_err());
    }

    #[test]
    fn test_enum_index() {
        let mut attr = EnumAttribute::new(vec!["Day".into(), "Night".into()], 0).unwrap();
        assert_eq!(attr.set(2), Err(AttributeError::InvalidIndex { index: 2, len: 2 }));
        assert_eq!(attr.get(), 0);
        attr.set(1).unwrap();
        assert_eq!(attr.selected(), "Night");
        assert!(EnumAttribute::new(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_text_length() {
        let mut attr = TextAttribute::new("hi", Some(4)).unwrap();
        assert_eq!(attr.set("hello"), Err(AttributeError::TooLong { len: 5, max: 4 }));
        assert_eq!(attr.get(), "hi");
        attr.set("héé!").unwrap();
        assert_eq!(attr.get(), "héé!");

        let mut unlimited = TextAttribute::new("", None).unwrap();
        unlimited.set("x".repeat(10_000)).unwrap();
    }

    #[test]
    fn test_filename_filter() {
        let attr = FilenameAttribute::new("tiles.til", vec!["til".into(), "TLS".into()]);
        assert!(attr.accepts("OTHER.TIL"));
        assert!(attr.accepts("x.tls"));
        assert!(!attr.accepts("x.png"));
        assert!(!attr.accepts("noext"));
        assert!(FilenameAttribute::new("", Vec::new()).accepts("anything"));
    }

    #[test]
    fn test_attribute_set_marks_changed() {
        let mut attr = Attribute::int("Level", "Level number", 1, 10, 1).unwrap();
        assert!(!attr.is_changed());

        assert!(attr.set(AttrValue::Int(11)).is_err());
        assert!(!attr.is_changed());

        attr.set(AttrValue::Int(4)).unwrap();
        assert!(attr.is_changed());
        assert_eq!(attr.get(), AttrValue::Int(4));
    }

    #[test]
    fn test_attribute_type_mismatch() {
        let mut attr = Attribute::text("Title", "", "Level 1", None).unwrap();
        let err = attr.set(AttrValue::Int(3)).unwrap_err();
        assert_eq!(
            err,
            AttributeError::TypeMismatch {
                expected: "text",
                found: "int"
            }
        );
        assert_eq!(attr.get(), AttrValue::Text("Level 1".into()));
    }

    #[test]
    fn test_list_positional_access() {
        let mut list: AttributeList = [
            Attribute::enumeration("Music", "", ["Song A", "Song B"], 0).unwrap(),
            Attribute::filename("Tileset", "", "ground.til", ["til"]),
        ]
        .into_iter()
        .collect();

        list.set(0, AttrValue::Enum(1)).unwrap();
        assert_eq!(list.value(0).unwrap(), AttrValue::Enum(1));
        assert_eq!(
            list.set(2, AttrValue::Int(0)),
            Err(AttributeError::NoSuchAttribute { index: 2, len: 2 })
        );
        assert_eq!(list.find("Tileset").map(|(i, _)| i), Some(1));
        assert!(list.any_changed());
    }

    #[test]
    fn test_value_json() {
        assert_eq!(AttrValue::Int(-2).to_json(), serde_json::json!(-2));
        assert_eq!(AttrValue::Text("a".into()).to_json(), serde_json::json!("a"));

        let attr = Attribute::int("Speed", "", 0, 9, 3).unwrap();
        let json = serde_json::to_string(&attr).unwrap();
        let parsed: Attribute = serde_json::from_str(&json).unwrap();
        assert_eq!(attr, parsed);

        let bad = r#"{"name":"Speed","kind":{"type":"int","min":0,"max":9,"value":12}}"#;
        assert!(serde_json::from_str::<Attribute>(bad).is_err());
    }
}
