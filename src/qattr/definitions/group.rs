//! Category grouping and category-ranked ordering.

use crate::model::{AttributeDefinition, AttributeDefinitionSet};
use indexmap::IndexMap;

/// Orders categories for display. Lower ranks sort first.
pub trait CategoryRank {
    fn rank(&self, category: &str) -> usize;
}

impl<F: Fn(&str) -> usize> CategoryRank for F {
    fn rank(&self, category: &str) -> usize {
        self(category)
    }
}

/// A fixed precedence list. Unknown categories rank after every known one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPrecedence {
    order: Vec<String>,
}

impl CategoryPrecedence {
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
        }
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }
}

impl CategoryRank for CategoryPrecedence {
    fn rank(&self, category: &str) -> usize {
        self.order
            .iter()
            .position(|known| known.eq_ignore_ascii_case(category))
            .unwrap_or(usize::MAX)
    }
}

/// Stable sort by category rank. Ties keep their current order.
pub fn sort_by_category(
    mut definitions: AttributeDefinitionSet,
    ranking: &dyn CategoryRank,
) -> AttributeDefinitionSet {
    definitions.sort_by_key(|definition| ranking.rank(definition.category().unwrap_or_default()));
    definitions
}

/// Bucket items by category in a single pass.
///
/// Buckets appear in first-seen order and keep input order inside. Items
/// without a category land in the `""` bucket.
pub fn group_by_category<'a, T, I>(items: I) -> IndexMap<String, Vec<T>>
where
    T: AsRef<AttributeDefinition> + Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut groups: IndexMap<String, Vec<T>> = IndexMap::new();
    for item in items {
        let category = item.as_ref().category().unwrap_or_default().to_string();
        groups.entry(category).or_default().push(item.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::sanitize::sanitize_value;
    use serde_json::json;

    fn names(defs: &[AttributeDefinition]) -> Vec<String> {
        defs.iter().filter_map(AttributeDefinition::name).collect()
    }

    #[test]
    fn groups_in_first_seen_order() {
        let set = sanitize_value(json!({
            "A": {"category": "X"},
            "B": {"category": "Y"},
            "C": {"category": "X"}
        }));
        let groups = group_by_category(set.definitions());
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_eq!(names(&groups["X"]), vec!["A", "C"]);
        assert_eq!(names(&groups["Y"]), vec!["B"]);
    }

    #[test]
    fn uncategorized_items_share_a_bucket() {
        let set = sanitize_value(json!({"A": {}, "B": {"category": ""}}));
        let groups = group_by_category(set.definitions());
        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[""]), vec!["A", "B"]);
    }

    #[test]
    fn precedence_ranks_known_first_and_ignores_case() {
        let precedence = CategoryPrecedence::new(["General", "Display"]);
        assert_eq!(precedence.rank("general"), 0);
        assert_eq!(precedence.rank("Display"), 1);
        assert_eq!(precedence.rank("Unknown"), usize::MAX);
    }

    #[test]
    fn sort_is_stable_within_a_category() {
        let set = sanitize_value(json!({
            "z": {"category": "Other"},
            "b": {"category": "Display"},
            "y": {"category": "Mystery"},
            "a": {"category": "Display"},
            "x": {"category": "General"},
            "w": {}
        }));
        let precedence = CategoryPrecedence::new(["General", "Display", "Other"]);
        let sorted = sort_by_category(set, &precedence);
        assert_eq!(
            sorted.names().collect::<Vec<_>>(),
            vec!["x", "b", "a", "z", "y", "w"]
        );
    }

    #[test]
    fn closures_can_rank() {
        let set = sanitize_value(json!({
            "a": {"category": "long category"},
            "b": {"category": "short"}
        }));
        let by_length = |category: &str| category.len();
        let sorted = sort_by_category(set, &by_length);
        assert_eq!(sorted.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
