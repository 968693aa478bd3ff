//! Layered merging of definition sets.
//!
//! A layer (theme, plugin) never repeats every field of an attribute: its
//! entries are completed from a [`DefaultTemplate`] and then replace the
//! inherited entry wholesale. An entry with an empty `inputtype` removes the
//! inherited attribute instead.

use crate::model::{AttributeDefinition, AttributeDefinitionSet};
use serde_json::json;

/// Field defaults used to complete partial override entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTemplate {
    template: AttributeDefinition,
}

impl DefaultTemplate {
    pub fn new(template: AttributeDefinition) -> Self {
        Self { template }
    }

    /// The stock defaults for a question attribute.
    pub fn standard() -> Self {
        let fields = json!({
            "name": null,
            "caption": "",
            "inputtype": "text",
            "options": null,
            "category": "Attribute",
            "default": "",
            "help": "",
            "sortorder": 1000,
            "i18n": false,
            "readonly": false,
            "readonly_when_active": false,
            "expression": null,
        });
        Self::new(AttributeDefinition::from_value(fields).unwrap_or_default())
    }

    pub fn definition(&self) -> &AttributeDefinition {
        &self.template
    }

    /// Overlay `partial` onto the template. Template keys keep their order;
    /// keys only `partial` has are appended.
    pub fn complete(&self, partial: &AttributeDefinition) -> AttributeDefinition {
        let mut completed = self.template.clone();
        for (key, value) in partial.fields() {
            completed.set(key.clone(), value.clone());
        }
        completed
    }
}

impl Default for DefaultTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

/// Folds extension layers onto a base set.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    template: DefaultTemplate,
}

impl Merger {
    pub fn new(template: DefaultTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &DefaultTemplate {
        &self.template
    }

    /// Apply `extension` on top of `base`.
    ///
    /// Overridden names keep their position in `base`; new names are
    /// appended in `extension` order. Entries without a name are skipped.
    pub fn merge(
        &self,
        base: AttributeDefinitionSet,
        extension: &AttributeDefinitionSet,
    ) -> AttributeDefinitionSet {
        let mut merged = base;
        for definition in extension.definitions() {
            let Some(name) = definition.name() else {
                tracing::trace!("Skipping extension entry without a name");
                continue;
            };

            if definition.has_input_type() {
                merged.insert(name, self.template.complete(definition));
            } else if merged.remove(&name).is_some() {
                tracing::trace!(attribute = %name, "Attribute suppressed by extension");
            }
        }
        merged
    }
}
