//! Type applicability filtering and category backfilling.
//!
//! Both run on sanitized sets and on raw plugin definitions (before
//! sanitization), so they are written against [`DefinitionRecords`].

use crate::model::{keys, AttributeDefinition, AttributeDefinitionSet, RawDefinitions};
use serde_json::Value;

/// Anything holding a sequence of definitions that can be filtered and edited.
pub trait DefinitionRecords {
    fn retain_definitions(&mut self, keep: &mut dyn FnMut(&AttributeDefinition) -> bool);
    fn for_each_definition(&mut self, visit: &mut dyn FnMut(&mut AttributeDefinition));
}

impl DefinitionRecords for AttributeDefinitionSet {
    fn retain_definitions(&mut self, keep: &mut dyn FnMut(&AttributeDefinition) -> bool) {
        self.retain(keep);
    }

    fn for_each_definition(&mut self, visit: &mut dyn FnMut(&mut AttributeDefinition)) {
        self.definitions_mut().for_each(visit);
    }
}

impl DefinitionRecords for RawDefinitions {
    fn retain_definitions(&mut self, keep: &mut dyn FnMut(&AttributeDefinition) -> bool) {
        self.retain(keep);
    }

    fn for_each_definition(&mut self, visit: &mut dyn FnMut(&mut AttributeDefinition)) {
        self.definitions_mut().for_each(visit);
    }
}

/// Whether a definition's `types` mentions the question type.
///
/// Matching is a case-insensitive substring test. A list of type strings
/// matches if any element does. Definitions without `types` never apply.
pub fn attribute_applies_to_type(definition: &AttributeDefinition, question_type: &str) -> bool {
    let needle = question_type.to_lowercase();
    let matches = |types: &str| types.to_lowercase().contains(&needle);
    match definition.applies_to_types() {
        Some(Value::String(types)) => matches(types.as_str()),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// Keep only definitions that apply to `question_type`.
pub fn filter_by_type<R: DefinitionRecords>(mut definitions: R, question_type: &str) -> R {
    definitions.retain_definitions(&mut |definition| {
        attribute_applies_to_type(definition, question_type)
    });
    definitions
}

/// Give every definition without a category the fallback one.
pub fn fill_missing_category<R: DefinitionRecords>(mut definitions: R, category: &str) -> R {
    definitions.for_each_definition(&mut |definition| {
        if !definition.has_category() {
            definition.set(keys::CATEGORY, Value::String(category.to_string()));
        }
    });
    definitions
}
