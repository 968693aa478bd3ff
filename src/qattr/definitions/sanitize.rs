//! Canonicalizes raw definitions into an [`AttributeDefinitionSet`].

use crate::model::{
    keys, normalize_empty, AttributeDefinition, AttributeDefinitionSet, RawDefinitions, RawEntry,
};
use serde_json::Value;

/// Turn raw definitions into a set keyed by attribute name.
///
/// - Keyed entries take their key as `name`, overwriting any `name` field.
/// - Positional entries without a usable `name` are dropped.
/// - Empty collections become null.
/// - `options: {option: [...]}` is unwrapped to `options: [...]`. A nested
///   `option` that is not a list is left where it is.
///
/// Later entries overwrite earlier ones with the same name, in place.
pub fn sanitize(raw: RawDefinitions) -> AttributeDefinitionSet {
    let mut sanitized = AttributeDefinitionSet::new();
    for entry in raw {
        let (name, mut definition) = match entry {
            RawEntry::Keyed {
                key,
                mut definition,
            } => {
                definition.set(keys::NAME, Value::String(key.clone()));
                (key, definition)
            }
            RawEntry::Positional { definition } => match definition.name() {
                Some(name) => (name, definition),
                None => {
                    tracing::trace!("Dropping positional definition without a name");
                    continue;
                }
            },
        };
        normalize_fields(&mut definition);
        unwrap_options(&mut definition);
        sanitized.insert(name, definition);
    }
    sanitized
}

/// Convenience for callers holding plain JSON.
pub fn sanitize_value(raw: Value) -> AttributeDefinitionSet {
    sanitize(RawDefinitions::from_value(raw))
}

fn normalize_fields(definition: &mut AttributeDefinition) {
    for field in definition.fields_mut().values_mut() {
        let value = std::mem::take(field);
        *field = normalize_empty(value);
    }
}

fn unwrap_options(definition: &mut AttributeDefinition) {
    let nested = match definition.get(keys::OPTIONS) {
        Some(Value::Object(options)) => options.get(keys::OPTION).cloned(),
        _ => None,
    };
    if let Some(list @ Value::Array(_)) = nested {
        definition.set(keys::OPTIONS, normalize_empty(list));
    }
}
