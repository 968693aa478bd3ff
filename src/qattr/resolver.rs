//! # Resolver
//!
//! [`AttributeResolver`] is the single entry point for turning a question into
//! its displayable attribute map. It owns no data: every input comes from an
//! [`AttributeSource`], and every intermediate set is built fresh per call, so
//! concurrent resolutions never share state.
//!
//! ## Pipeline
//!
//! 1. Require an owning survey (`MissingParent` otherwise).
//! 2. Fetch stored values.
//! 3. Pick the theme: override, else stored `question_template`, else the
//!    configured fallback.
//! 4. Merge question type definitions with the theme's.
//! 5. Merge the result with the plugin definitions for the question type.
//! 6. Order by category rank.
//! 7. Attach values for the requested locale, or all survey locales.
//!
//! ## Generic Over AttributeSource
//!
//! - Production: a host-specific source backed by its storage.
//! - Testing and the CLI: [`MemorySource`](crate::source::memory::MemorySource).

use crate::config::ResolverConfig;
use crate::definitions::{
    fill_missing_category, fill_values, filter_by_type, sanitize, sort_by_category, CategoryRank,
    DefaultTemplate, Merger,
};
use crate::error::{QattrError, Result};
use crate::model::{
    is_empty_value, AttributeDefinitionSet, AttributeValueSet, Question, ResolvedAttributes,
};
use crate::source::AttributeSource;
use serde_json::Value;

/// Stored attribute naming the question's theme.
pub const THEME_ATTRIBUTE: &str = "question_template";

/// Options for one resolution.
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    pub question: &'a Question,
    pub locale: Option<String>,
    pub theme_override: Option<String>,
    pub advanced_only: bool,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(question: &'a Question) -> Self {
        Self {
            question,
            locale: None,
            theme_override: None,
            advanced_only: false,
        }
    }

    /// Resolve a single locale instead of every survey locale.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Use this theme instead of the stored one.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme_override = Some(theme.into());
        self
    }

    /// Leave out general attributes.
    pub fn advanced_only(mut self, advanced_only: bool) -> Self {
        self.advanced_only = advanced_only;
        self
    }
}

/// Resolves question attributes against an [`AttributeSource`].
pub struct AttributeResolver<S: AttributeSource> {
    source: S,
    config: ResolverConfig,
    merger: Merger,
    ranking: Box<dyn CategoryRank + Send + Sync>,
}

impl<S: AttributeSource> AttributeResolver<S> {
    pub fn new(source: S, config: ResolverConfig) -> Self {
        let ranking = Box::new(config.category_precedence());
        Self {
            source,
            config,
            merger: Merger::default(),
            ranking,
        }
    }

    /// Replace the template used to complete partial layer entries.
    pub fn with_template(mut self, template: DefaultTemplate) -> Self {
        self.merger = Merger::new(template);
        self
    }

    /// Replace the category ordering.
    pub fn with_ranking(mut self, ranking: impl CategoryRank + Send + Sync + 'static) -> Self {
        self.ranking = Box::new(ranking);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve every attribute of `question` with its value(s).
    pub fn resolve(
        &self,
        question: &Question,
        locale: Option<&str>,
        theme_override: Option<&str>,
        advanced_only: bool,
    ) -> Result<ResolvedAttributes> {
        let missing_parent = || QattrError::MissingParent {
            question_id: question.id,
        };
        let survey_id = question.survey_id.ok_or_else(missing_parent)?;
        let survey_languages = self
            .source
            .survey_languages(survey_id)?
            .ok_or_else(missing_parent)?;

        let values = self.source.persisted_values(question.id)?;
        let theme = self.active_theme(&values, theme_override);
        let question_type = question.question_type.as_str();

        let type_definitions = self.source.type_definitions(question_type, advanced_only)?;
        let theme_definitions = sanitize(self.source.theme_definitions(&theme, question_type)?);
        let plugin_definitions = self.plugin_attributes(question_type)?;
        tracing::debug!(
            question_id = question.id,
            question_type,
            theme = %theme,
            type_count = type_definitions.len(),
            theme_count = theme_definitions.len(),
            plugin_count = plugin_definitions.len(),
            "Merging attribute layers"
        );

        let merged = self.merger.merge(type_definitions, &theme_definitions);
        let merged = self.merger.merge(merged, &plugin_definitions);
        let ordered = sort_by_category(merged, &*self.ranking);

        let locales = match locale {
            Some(locale) => vec![locale.to_string()],
            None => survey_languages,
        };
        tracing::debug!(
            question_id = question.id,
            attributes = ordered.len(),
            locales = locales.len(),
            "Filling attribute values"
        );

        Ok(fill_values(ordered, &values, &locales))
    }

    /// [`resolve`](Self::resolve) driven by a [`ResolveRequest`].
    pub fn resolve_request(&self, request: &ResolveRequest<'_>) -> Result<ResolvedAttributes> {
        self.resolve(
            request.question,
            request.locale.as_deref(),
            request.theme_override.as_deref(),
            request.advanced_only,
        )
    }

    /// Plugin-contributed definitions that apply to `question_type`, with
    /// categories backfilled and sanitized.
    pub fn plugin_attributes(&self, question_type: &str) -> Result<AttributeDefinitionSet> {
        let raw = self.source.plugin_definitions()?;
        if raw.is_empty() {
            return Ok(AttributeDefinitionSet::new());
        }
        let applicable = filter_by_type(raw, question_type);
        let categorized = fill_missing_category(applicable, &self.config.plugin_category);
        Ok(sanitize(categorized))
    }

    /// The theme whose definitions extend the question type.
    pub fn active_theme(&self, values: &AttributeValueSet, theme_override: Option<&str>) -> String {
        if let Some(theme) =
            theme_override.filter(|t| !is_empty_value(&Value::String(t.to_string())))
        {
            return theme.to_string();
        }
        let stored = values
            .locale_independent(THEME_ATTRIBUTE)
            .filter(|value| !is_empty_value(value));
        match stored {
            Some(Value::String(theme)) => theme.clone(),
            Some(Value::Number(theme)) => theme.to_string(),
            _ => {
                tracing::trace!(fallback = %self.config.fallback_theme, "Using fallback theme");
                self.config.fallback_theme.clone()
            }
        }
    }
}
