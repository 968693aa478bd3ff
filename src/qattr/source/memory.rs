use super::AttributeSource;
use crate::error::{QattrError, Result};
use crate::model::{
    AttributeDefinitionSet, AttributeValueSet, Question, QuestionId, RawDefinitions, SurveyId,
};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Category whose attributes are dropped when only advanced ones are asked for.
const GENERAL_CATEGORY: &str = "General";

/// In-memory source for tests and for the CLI's JSON bundles.
///
/// Bundle layout:
///
/// ```json
/// {
///   "question_types": { "T": { "<attr>": { ... } } },
///   "themes": { "<theme>": { "T": { "<attr>": { ... } } } },
///   "plugins": [ { "name": "...", "types": "T", ... } ],
///   "values": { "<question id>": { "<attr>": { "": ..., "en": ... } } },
///   "surveys": { "<survey id>": ["en", "fr"] },
///   "questions": [ { "id": 1, "type": "T", "survey_id": 10 } ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    question_types: IndexMap<String, AttributeDefinitionSet>,
    #[serde(default)]
    themes: IndexMap<String, IndexMap<String, RawDefinitions>>,
    #[serde(default)]
    plugins: RawDefinitions,
    #[serde(default)]
    values: IndexMap<QuestionId, AttributeValueSet>,
    #[serde(default)]
    surveys: IndexMap<SurveyId, Vec<String>>,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(skip)]
    simulate_failure: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a bundle from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let source = serde_json::from_str(&content)?;
        Ok(source)
    }

    /// Make every fetch fail, for testing error propagation.
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    pub fn with_type(mut self, question_type: &str, definitions: AttributeDefinitionSet) -> Self {
        self.question_types
            .insert(question_type.to_string(), definitions);
        self
    }

    pub fn with_theme(mut self, theme: &str, question_type: &str, definitions: RawDefinitions) -> Self {
        self.themes
            .entry(theme.to_string())
            .or_default()
            .insert(question_type.to_string(), definitions);
        self
    }

    pub fn with_plugins(mut self, definitions: RawDefinitions) -> Self {
        self.plugins = definitions;
        self
    }

    pub fn with_values(mut self, question_id: QuestionId, values: AttributeValueSet) -> Self {
        self.values.insert(question_id, values);
        self
    }

    pub fn with_survey<I, S>(mut self, survey_id: SurveyId, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.surveys
            .insert(survey_id, languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    fn check(&self) -> Result<()> {
        if self.simulate_failure {
            return Err(QattrError::Source("Simulated fetch failure".to_string()));
        }
        Ok(())
    }
}

impl AttributeSource for MemorySource {
    fn persisted_values(&self, question_id: QuestionId) -> Result<AttributeValueSet> {
        self.check()?;
        Ok(self.values.get(&question_id).cloned().unwrap_or_default())
    }

    fn type_definitions(
        &self,
        question_type: &str,
        advanced_only: bool,
    ) -> Result<AttributeDefinitionSet> {
        self.check()?;
        let mut definitions = self
            .question_types
            .get(question_type)
            .cloned()
            .unwrap_or_default();
        if advanced_only {
            definitions.retain(|definition| {
                !definition
                    .category()
                    .is_some_and(|c| c.eq_ignore_ascii_case(GENERAL_CATEGORY))
            });
        }
        Ok(definitions)
    }

    fn theme_definitions(&self, theme: &str, question_type: &str) -> Result<RawDefinitions> {
        self.check()?;
        Ok(self
            .themes
            .get(theme)
            .and_then(|by_type| by_type.get(question_type))
            .cloned()
            .unwrap_or_default())
    }

    fn plugin_definitions(&self) -> Result<RawDefinitions> {
        self.check()?;
        Ok(self.plugins.clone())
    }

    fn survey_languages(&self, survey_id: SurveyId) -> Result<Option<Vec<String>>> {
        self.check()?;
        Ok(self.surveys.get(&survey_id).cloned())
    }
}
