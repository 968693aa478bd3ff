//! Attaching stored values to definitions.

use crate::model::{
    normalize_empty, AttributeDefinition, AttributeDefinitionSet, AttributeValueSet,
    ResolvedAttribute, ResolvedAttributes, ResolvedValue,
};
use serde_json::Value;

/// Attach stored values (or defaults) to every definition.
///
/// Non-localized attributes read the locale-independent slot. Localized
/// attributes get one value per entry of `locales`, in that order, each
/// falling back to the default on its own.
pub fn fill_values<L: AsRef<str>>(
    definitions: AttributeDefinitionSet,
    values: &AttributeValueSet,
    locales: &[L],
) -> ResolvedAttributes {
    definitions
        .into_iter()
        .map(|(key, definition)| {
            let name = definition.name().unwrap_or_else(|| key.clone());
            let value = if definition.is_i18n() {
                ResolvedValue::PerLocale(
                    locales
                        .iter()
                        .map(|locale| {
                            let locale = locale.as_ref();
                            let stored = values.get(&name, locale);
                            (locale.to_string(), value_or_default(stored, &definition))
                        })
                        .collect(),
                )
            } else {
                ResolvedValue::Single(value_or_default(
                    values.locale_independent(&name),
                    &definition,
                ))
            };
            (key, ResolvedAttribute { definition, value })
        })
        .collect()
}

fn value_or_default(stored: Option<&Value>, definition: &AttributeDefinition) -> Value {
    let value = match stored {
        Some(value) => value.clone(),
        None => definition.default_value().cloned().unwrap_or(Value::Null),
    };
    normalize_empty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::sanitize::sanitize_value;
    use serde_json::json;

    const NO_LOCALES: &[&str] = &[];

    #[test]
    fn missing_value_falls_back_to_default() {
        let defs = sanitize_value(json!({"max": {"i18n": false, "default": 5}}));
        let resolved = fill_values(defs, &AttributeValueSet::new(), NO_LOCALES);
        assert_eq!(resolved["max"].value(), Some(&json!(5)));
    }

    #[test]
    fn falsy_stored_value_beats_default() {
        let defs = sanitize_value(json!({"max": {"i18n": false, "default": 5}}));
        let values = AttributeValueSet::new().with("max", "", 0);
        let resolved = fill_values(defs, &values, NO_LOCALES);
        assert_eq!(resolved["max"].value(), Some(&json!(0)));
    }

    #[test]
    fn stored_empty_collection_becomes_null() {
        let defs = sanitize_value(json!({"list": {"default": "x"}}));
        let values = AttributeValueSet::new().with("list", "", json!([]));
        let resolved = fill_values(defs, &values, NO_LOCALES);
        assert_eq!(resolved["list"].value(), Some(&Value::Null));
    }

    #[test]
    fn missing_default_is_null() {
        let defs = sanitize_value(json!({"bare": {"inputtype": "text"}}));
        let resolved = fill_values(defs, &AttributeValueSet::new(), NO_LOCALES);
        assert_eq!(resolved["bare"].value(), Some(&Value::Null));
    }

    #[test]
    fn localized_values_are_filled_per_locale() {
        let defs = sanitize_value(json!({"prefix": {"i18n": true, "default": "-"}}));
        let values = AttributeValueSet::new()
            .with("prefix", "en", "EUR")
            .with("prefix", "", "ignored");
        let resolved = fill_values(defs, &values, &["en", "fr"]);
        let prefix = &resolved["prefix"];
        assert_eq!(prefix.value(), None);
        assert_eq!(prefix.locale_value("en"), Some(&json!("EUR")));
        assert_eq!(prefix.locale_value("fr"), Some(&json!("-")));
        match &prefix.value {
            ResolvedValue::PerLocale(by_locale) => {
                assert_eq!(by_locale.keys().collect::<Vec<_>>(), vec!["en", "fr"]);
            }
            ResolvedValue::Single(_) => panic!("Expected per-locale values"),
        }
    }

    #[test]
    fn order_of_definitions_is_kept() {
        let defs = sanitize_value(json!({"b": {}, "a": {}, "c": {}}));
        let resolved = fill_values(defs, &AttributeValueSet::new(), NO_LOCALES);
        assert_eq!(resolved.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }
}
