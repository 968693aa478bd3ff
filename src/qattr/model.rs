//! Core data types: attribute definitions, definition sets, stored values and
//! resolved attributes.
//!
//! Definitions are free-form records. Three independent sources (question
//! types, question themes, plugins) contribute them, and each source carries
//! its own extra metadata, so a definition is kept as an ordered JSON object
//! with typed accessors for the keys the engine actually reads.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Well-known definition keys, spelled the way stored definitions spell them.
pub mod keys {
    pub const NAME: &str = "name";
    pub const INPUT_TYPE: &str = "inputtype";
    pub const CATEGORY: &str = "category";
    pub const I18N: &str = "i18n";
    pub const DEFAULT: &str = "default";
    pub const TYPES: &str = "types";
    pub const OPTIONS: &str = "options";
    pub const OPTION: &str = "option";
    pub const SORT_ORDER: &str = "sortorder";
    pub const VALUE: &str = "value";
}

/// Locale slot used for values that do not vary per language.
pub const NO_LOCALE: &str = "";

pub type QuestionId = u64;
pub type SurveyId = u64;

/// Loose emptiness, as stored definitions and values expect it.
///
/// Null, `false`, zero, `""`, `"0"` and empty collections are all empty.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// True for `[]` and `{}`: the shape empty XML nodes deserialize to.
pub fn is_empty_collection(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Replaces an empty collection with null, leaving everything else alone.
pub(crate) fn normalize_empty(value: Value) -> Value {
    if is_empty_collection(&value) {
        Value::Null
    } else {
        value
    }
}

/// Whether a raw key is positional (an index) rather than an attribute name.
///
/// Surrounding whitespace is ignored.
pub(crate) fn is_numeric_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty()
        && trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok()
}

/// One configurable property of a question type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeDefinition {
    fields: Map<String, Value>,
}

impl AttributeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a definition carrying only its name.
    pub fn named(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::new().with(keys::NAME, name)
    }

    /// Build a definition from a JSON value. Only objects qualify.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// The attribute name, if one can be determined.
    ///
    /// Numeric names are accepted and rendered in decimal form; null and
    /// every other shape count as "no name".
    pub fn name(&self) -> Option<String> {
        match self.fields.get(keys::NAME)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn input_type(&self) -> Option<&str> {
        self.fields.get(keys::INPUT_TYPE).and_then(Value::as_str)
    }

    /// False when the input type is absent or empty, which marks the
    /// attribute as suppressed by an override.
    pub fn has_input_type(&self) -> bool {
        self.fields
            .get(keys::INPUT_TYPE)
            .is_some_and(|v| !is_empty_value(v))
    }

    pub fn category(&self) -> Option<&str> {
        self.fields
            .get(keys::CATEGORY)
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
    }

    pub fn has_category(&self) -> bool {
        self.fields
            .get(keys::CATEGORY)
            .is_some_and(|v| !is_empty_value(v))
    }

    pub fn is_i18n(&self) -> bool {
        self.fields
            .get(keys::I18N)
            .is_some_and(|v| !is_empty_value(v))
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.fields.get(keys::DEFAULT)
    }

    pub fn applies_to_types(&self) -> Option<&Value> {
        self.fields.get(keys::TYPES).filter(|v| !v.is_null())
    }

    pub fn options(&self) -> Option<&Value> {
        self.fields.get(keys::OPTIONS).filter(|v| !v.is_null())
    }
}

impl From<Map<String, Value>> for AttributeDefinition {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl AsRef<AttributeDefinition> for AttributeDefinition {
    fn as_ref(&self) -> &AttributeDefinition {
        self
    }
}

/// Definitions keyed by attribute name, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeDefinitionSet {
    entries: IndexMap<String, AttributeDefinition>,
}

impl AttributeDefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Insert or replace. A replaced entry keeps its position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: AttributeDefinition,
    ) -> Option<AttributeDefinition> {
        self.entries.insert(name.into(), definition)
    }

    /// Remove an entry, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<AttributeDefinition> {
        self.entries.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeDefinition)> {
        self.entries.iter()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.entries.values()
    }

    pub fn definitions_mut(&mut self) -> impl Iterator<Item = &mut AttributeDefinition> {
        self.entries.values_mut()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&AttributeDefinition) -> bool) {
        self.entries.retain(|_, definition| keep(definition));
    }

    /// Stable sort by a key derived from each definition.
    pub fn sort_by_key<K: Ord>(&mut self, mut key: impl FnMut(&AttributeDefinition) -> K) {
        self.entries.sort_by(|_, a, _, b| key(a).cmp(&key(b)));
    }
}

impl FromIterator<(String, AttributeDefinition)> for AttributeDefinitionSet {
    fn from_iter<T: IntoIterator<Item = (String, AttributeDefinition)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AttributeDefinitionSet {
    type Item = (String, AttributeDefinition);
    type IntoIter = indexmap::map::IntoIter<String, AttributeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One unsanitized entry, tagged by how its source addressed it.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    /// Addressed by attribute name; the key wins over any `name` field.
    Keyed {
        key: String,
        definition: AttributeDefinition,
    },
    /// Addressed by position; only usable if it carries a `name` field.
    Positional { definition: AttributeDefinition },
}

impl RawEntry {
    /// Classify an entry by its key. Numeric keys are positions.
    pub fn from_key(key: impl Into<String>, definition: AttributeDefinition) -> Self {
        let key = key.into();
        if is_numeric_key(&key) {
            RawEntry::Positional { definition }
        } else {
            RawEntry::Keyed { key, definition }
        }
    }

    pub fn definition(&self) -> &AttributeDefinition {
        match self {
            RawEntry::Keyed { definition, .. } | RawEntry::Positional { definition } => definition,
        }
    }

    pub fn definition_mut(&mut self) -> &mut AttributeDefinition {
        match self {
            RawEntry::Keyed { definition, .. } | RawEntry::Positional { definition } => definition,
        }
    }
}

/// Definitions as a source delivered them: keyed, positional, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDefinitions {
    entries: Vec<RawEntry>,
}

impl RawDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read raw definitions out of an object (keyed or index-keyed) or an
    /// array (positional). Entries that are not objects are dropped.
    pub fn from_value(value: Value) -> Self {
        let mut raw = Self::new();
        match value {
            Value::Object(fields) => {
                for (key, entry) in fields {
                    match AttributeDefinition::from_value(entry) {
                        Some(definition) => raw.entries.push(RawEntry::from_key(key, definition)),
                        None => tracing::trace!(key = %key, "Dropping non-object definition"),
                    }
                }
            }
            Value::Array(items) => {
                for (position, entry) in items.into_iter().enumerate() {
                    match AttributeDefinition::from_value(entry) {
                        Some(definition) => raw.push(definition),
                        None => tracing::trace!(position, "Dropping non-object definition"),
                    }
                }
            }
            Value::Null => {}
            other => tracing::trace!(value = %other, "Ignoring scalar definition source"),
        }
        raw
    }

    pub fn push_keyed(&mut self, key: impl Into<String>, definition: AttributeDefinition) {
        self.entries.push(RawEntry::from_key(key, definition));
    }

    pub fn push(&mut self, definition: AttributeDefinition) {
        self.entries.push(RawEntry::Positional { definition });
    }

    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn definitions_mut(&mut self) -> impl Iterator<Item = &mut AttributeDefinition> {
        self.entries.iter_mut().map(RawEntry::definition_mut)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&AttributeDefinition) -> bool) {
        self.entries.retain(|entry| keep(entry.definition()));
    }
}

impl IntoIterator for RawDefinitions {
    type Item = RawEntry;
    type IntoIter = std::vec::IntoIter<RawEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<AttributeDefinitionSet> for RawDefinitions {
    fn from(set: AttributeDefinitionSet) -> Self {
        let mut raw = Self::new();
        for (name, definition) in set {
            raw.push_keyed(name, definition);
        }
        raw
    }
}

impl<'de> Deserialize<'de> for RawDefinitions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Stored values for one question: attribute name, then locale, then value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeValueSet {
    values: IndexMap<String, IndexMap<String, Value>>,
}

impl AttributeValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, locale: impl Into<String>, value: Value) {
        self.values
            .entry(name.into())
            .or_default()
            .insert(locale.into(), value);
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, locale: &str, value: impl Into<Value>) -> Self {
        self.insert(name, locale, value.into());
        self
    }

    /// The stored value for a locale slot. A stored null counts as missing.
    pub fn get(&self, name: &str, locale: &str) -> Option<&Value> {
        self.values
            .get(name)
            .and_then(|by_locale| by_locale.get(locale))
            .filter(|v| !v.is_null())
    }

    pub fn locale_independent(&self, name: &str) -> Option<&Value> {
        self.get(name, NO_LOCALE)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The value part of a resolved attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Single(Value),
    PerLocale(IndexMap<String, Value>),
}

/// A definition with its value(s) attached, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttribute {
    pub definition: AttributeDefinition,
    pub value: ResolvedValue,
}

impl ResolvedAttribute {
    /// The value of a non-localized attribute.
    pub fn value(&self) -> Option<&Value> {
        match &self.value {
            ResolvedValue::Single(value) => Some(value),
            ResolvedValue::PerLocale(_) => None,
        }
    }

    /// The value of a localized attribute for one locale.
    pub fn locale_value(&self, locale: &str) -> Option<&Value> {
        match &self.value {
            ResolvedValue::Single(_) => None,
            ResolvedValue::PerLocale(by_locale) => by_locale.get(locale),
        }
    }
}

impl AsRef<AttributeDefinition> for ResolvedAttribute {
    fn as_ref(&self) -> &AttributeDefinition {
        &self.definition
    }
}

// Flat shape: definition fields, then `value` or one `{locale: {value}}` per
// locale. Definition keys that collide with a value slot are shadowed.
impl Serialize for ResolvedAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = |key: &str| match &self.value {
            ResolvedValue::Single(_) => key == keys::VALUE,
            ResolvedValue::PerLocale(by_locale) => by_locale.contains_key(key),
        };
        let mut map = serializer.serialize_map(None)?;
        for (key, field) in self.definition.fields() {
            if !shadowed(key) {
                map.serialize_entry(key, field)?;
            }
        }
        match &self.value {
            ResolvedValue::Single(value) => map.serialize_entry(keys::VALUE, value)?,
            ResolvedValue::PerLocale(by_locale) => {
                for (locale, value) in by_locale {
                    let mut slot = Map::new();
                    slot.insert(keys::VALUE.to_string(), value.clone());
                    map.serialize_entry(locale, &slot)?;
                }
            }
        }
        map.end()
    }
}

/// Final output of a resolution: attribute name to resolved attribute.
pub type ResolvedAttributes = IndexMap<String, ResolvedAttribute>;

/// The question whose attributes are being resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default)]
    pub survey_id: Option<SurveyId>,
}

impl Question {
    pub fn new(id: QuestionId, question_type: impl Into<String>, survey_id: Option<SurveyId>) -> Self {
        Self {
            id,
            question_type: question_type.into(),
            survey_id,
        }
    }
}
