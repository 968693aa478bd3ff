use colored::Colorize;
use qattr::definitions::group_by_category;
use qattr::error::Result;
use qattr::model::{ResolvedAttribute, ResolvedAttributes, ResolvedValue};
use serde::Serialize;
use serde_json::Value;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 60;
const UNCATEGORIZED: &str = "Uncategorized";

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(super) fn print_grouped(resolved: &ResolvedAttributes) {
    if resolved.is_empty() {
        println!("No attributes.");
        return;
    }

    let groups = group_by_category(resolved.values());
    for (i, (category, attributes)) in groups.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let heading = if category.is_empty() {
            UNCATEGORIZED
        } else {
            category.as_str()
        };
        println!("{}", heading.bold());
        for attribute in attributes {
            print_attribute(attribute);
        }
    }
}

fn print_attribute(attribute: &ResolvedAttribute) {
    let name = attribute.definition.name().unwrap_or_default();
    let padding = NAME_WIDTH.saturating_sub(name.width());
    let rendered = match &attribute.value {
        ResolvedValue::Single(value) => format_value(value),
        ResolvedValue::PerLocale(by_locale) => by_locale
            .iter()
            .map(|(locale, value)| format!("{}: {}", locale, format_value(value)))
            .collect::<Vec<_>>()
            .join("  "),
    };
    let input_type = attribute.definition.input_type().unwrap_or_default();

    println!(
        "  {}{}{} {}",
        name.cyan(),
        " ".repeat(padding),
        truncate_to_width(&rendered, VALUE_WIDTH),
        format!("[{}]", input_type).dimmed()
    );
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "\"\"".to_string(),
        Value::String(s) => s.replace('\n', " "),
        other => other.to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncates_long_values() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn formats_values_for_listing() {
        assert_eq!(format_value(&Value::Null), "-");
        assert_eq!(format_value(&json!("")), "\"\"");
        assert_eq!(format_value(&json!("two\nlines")), "two lines");
        assert_eq!(format_value(&json!(5)), "5");
    }
}
