//! # Attribute Sources
//!
//! The resolver never fetches anything itself. Everything it needs from the
//! host (stored values, question type definitions, question theme
//! definitions, plugin definitions, survey languages) comes through the
//! [`AttributeSource`] trait.
//!
//! ## Why a trait
//!
//! - **Testing** runs against [`memory::MemorySource`], with no database.
//! - **Hosts** plug in whatever storage and theme discovery they have.
//! - The engine stays pure: fetch once, combine, return.
//!
//! ## Implementations
//!
//! - [`memory::MemorySource`]: in-memory fixtures, also loadable from a JSON
//!   bundle (used by the CLI).
//!
//! Fetch failures are reported as [`QattrError::Source`](crate::error::QattrError::Source)
//! and pass through the resolver untouched.

use crate::error::Result;
use crate::model::{
    AttributeDefinitionSet, AttributeValueSet, QuestionId, RawDefinitions, SurveyId,
};

pub mod memory;

/// Read-only collaborators consulted by one resolution.
pub trait AttributeSource {
    /// All stored values for a question, by attribute name then locale.
    fn persisted_values(&self, question_id: QuestionId) -> Result<AttributeValueSet>;

    /// Sanitized definitions intrinsic to a question type.
    ///
    /// With `advanced_only`, general attributes are left out.
    fn type_definitions(
        &self,
        question_type: &str,
        advanced_only: bool,
    ) -> Result<AttributeDefinitionSet>;

    /// Unsanitized definitions a question theme adds for a question type.
    fn theme_definitions(&self, theme: &str, question_type: &str) -> Result<RawDefinitions>;

    /// Unsanitized, type-agnostic definitions contributed by plugins.
    fn plugin_definitions(&self) -> Result<RawDefinitions>;

    /// Configured languages of a survey, or `None` if the survey is unknown.
    fn survey_languages(&self, survey_id: SurveyId) -> Result<Option<Vec<String>>>;
}

impl<S: AttributeSource + ?Sized> AttributeSource for &S {
    fn persisted_values(&self, question_id: QuestionId) -> Result<AttributeValueSet> {
        (**self).persisted_values(question_id)
    }

    fn type_definitions(
        &self,
        question_type: &str,
        advanced_only: bool,
    ) -> Result<AttributeDefinitionSet> {
        (**self).type_definitions(question_type, advanced_only)
    }

    fn theme_definitions(&self, theme: &str, question_type: &str) -> Result<RawDefinitions> {
        (**self).theme_definitions(theme, question_type)
    }

    fn plugin_definitions(&self) -> Result<RawDefinitions> {
        (**self).plugin_definitions()
    }

    fn survey_languages(&self, survey_id: SurveyId) -> Result<Option<Vec<String>>> {
        (**self).survey_languages(survey_id)
    }
}
