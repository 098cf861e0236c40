//! Per-format value strategies: raw stored strings coerced into typed domain
//! values, and the matching well-formedness checks.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};

use crate::errors::{ValidationIssue, codes};
use crate::format::FieldFormat;
use crate::paths::property_key;
use crate::types::{CustomField, ResourceDirectory, ResourceRef};

/// Date wire format shared by parsing and rendering.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rich-text value object. Serializes as `{"raw": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formattable {
    pub raw: String,
}

impl Formattable {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

/// A raw stored value coerced into its format's domain type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Formattable(Formattable),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Bool(bool),
    Resource(ResourceRef),
}

impl TypedValue {
    /// Display title used when the value is rendered as a link: the display
    /// name when the value has one, otherwise its string form.
    pub fn title(&self) -> String {
        match self {
            TypedValue::String(s) => s.clone(),
            TypedValue::Formattable(f) => f.raw.clone(),
            TypedValue::Int(i) => i.to_string(),
            TypedValue::Float(f) => f.to_string(),
            TypedValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            TypedValue::Bool(b) => b.to_string(),
            TypedValue::Resource(r) => r.name.clone(),
        }
    }

    /// JSON form used when the value is rendered as an inline property.
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::String(s) => Value::String(s.clone()),
            TypedValue::Formattable(f) => json!({ "raw": f.raw }),
            TypedValue::Int(i) => json!(i),
            TypedValue::Float(f) => json!(f),
            TypedValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            TypedValue::Bool(b) => Value::Bool(*b),
            TypedValue::Resource(r) => Value::String(r.name.clone()),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Coerce a raw stored value into a typed domain value.
///
/// Blank raw values yield `None`, as do values whose referenced target
/// (option, user, version) no longer resolves.
pub fn typed_value(field: &CustomField, raw: Option<&str>, directory: &dyn ResourceDirectory) -> Option<TypedValue> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    match field.format {
        FieldFormat::String => Some(TypedValue::String(raw.to_string())),
        FieldFormat::Text => Some(TypedValue::Formattable(Formattable::new(raw))),
        FieldFormat::Int => raw.parse::<i64>().ok().map(TypedValue::Int),
        FieldFormat::Float => raw.parse::<f64>().ok().map(TypedValue::Float),
        FieldFormat::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT).ok().map(TypedValue::Date),
        FieldFormat::Bool => parse_bool(raw).map(TypedValue::Bool),
        FieldFormat::User => raw
            .parse()
            .ok()
            .and_then(|id| directory.find_user(id))
            .map(TypedValue::Resource),
        FieldFormat::Version => raw
            .parse()
            .ok()
            .and_then(|id| directory.find_version(id))
            .map(TypedValue::Resource),
        FieldFormat::List => field
            .option_for_raw(raw)
            .map(|option| TypedValue::String(option.value.clone())),
    }
}

/// Check a raw stored value for well-formedness against its field.
///
/// An empty result means the value is acceptable. Blank values always pass;
/// requiredness is schema metadata enforced at persistence time. Issues carry
/// symbolic codes so callers can aggregate them into a multi-field response.
pub fn validate(field: &CustomField, raw: Option<&str>) -> Vec<ValidationIssue> {
    let key = property_key(field.id);
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    match field.format {
        FieldFormat::List => {
            if field.option_for_raw(raw).is_none() {
                issues.push(ValidationIssue::new(
                    key,
                    codes::INCLUSION,
                    "value is not one of the field's options",
                ));
            }
        }
        FieldFormat::Int => {
            if raw.parse::<i64>().is_err() {
                issues.push(ValidationIssue::new(key, codes::INVALID, "value is not an integer"));
            }
        }
        FieldFormat::Float => {
            if raw.parse::<f64>().is_err() {
                issues.push(ValidationIssue::new(key, codes::INVALID, "value is not a number"));
            }
        }
        FieldFormat::Date => {
            if NaiveDate::parse_from_str(raw, DATE_FORMAT).is_err() {
                issues.push(ValidationIssue::new(
                    key,
                    codes::INVALID,
                    format!("value is not a {DATE_FORMAT} date"),
                ));
            }
        }
        FieldFormat::Bool => {
            if parse_bool(raw).is_none() {
                issues.push(ValidationIssue::new(key, codes::INVALID, "value is not a boolean"));
            }
        }
        FieldFormat::User | FieldFormat::Version => {
            if raw.parse::<u64>().is_err() {
                issues.push(ValidationIssue::new(key, codes::INVALID, "value is not a resource id"));
            }
        }
        FieldFormat::String | FieldFormat::Text => {
            validate_string_constraints(field, raw, &key, &mut issues);
        }
    }
    issues
}

fn validate_string_constraints(field: &CustomField, raw: &str, key: &str, issues: &mut Vec<ValidationIssue>) {
    let len = raw.chars().count();
    if field.min_length > 0 && len < field.min_length as usize {
        issues.push(ValidationIssue::new(
            key,
            codes::LENGTH,
            format!("length must be at least {}", field.min_length),
        ));
    }
    if field.max_length > 0 && len > field.max_length as usize {
        issues.push(ValidationIssue::new(
            key,
            codes::LENGTH,
            format!("length must be at most {}", field.max_length),
        ));
    }
    if let Some(pattern) = &field.regular_expression
        && Regex::new(pattern).map(|regex| !regex.is_match(raw)).unwrap_or(false)
    {
        issues.push(ValidationIssue::new(
            key,
            codes::REGEX,
            format!("value does not match pattern {}", pattern),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomOption, ResourceId};

    struct EmptyDirectory;

    impl ResourceDirectory for EmptyDirectory {
        fn find_user(&self, _id: ResourceId) -> Option<ResourceRef> {
            None
        }

        fn find_version(&self, _id: ResourceId) -> Option<ResourceRef> {
            None
        }
    }

    fn list_field() -> CustomField {
        CustomField::new(1, "Category", FieldFormat::List).with_options(vec![
            CustomOption::new(11, "foo", 1),
            CustomOption::new(12, "bar", 2),
        ])
    }

    #[test]
    fn list_typed_value_is_the_option_label() {
        let field = list_field();
        let typed = typed_value(&field, Some("11"), &EmptyDirectory);
        assert_eq!(typed, Some(TypedValue::String("foo".into())));
    }

    #[test]
    fn list_typed_value_is_none_for_blank_and_nil() {
        let field = list_field();
        assert_eq!(typed_value(&field, Some(""), &EmptyDirectory), None);
        assert_eq!(typed_value(&field, None, &EmptyDirectory), None);
    }

    #[test]
    fn list_typed_value_is_none_for_unknown_option() {
        let field = list_field();
        assert_eq!(typed_value(&field, Some("99"), &EmptyDirectory), None);
    }

    #[test]
    fn list_validation_accepts_an_included_option() {
        let field = list_field();
        assert!(validate(&field, Some("11")).is_empty());
        assert!(validate(&field, Some("")).is_empty());
        assert!(validate(&field, None).is_empty());
    }

    #[test]
    fn list_validation_rejects_with_inclusion_code() {
        let field = list_field();
        let issues = validate(&field, Some("cat"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, codes::INCLUSION);
        assert_eq!(issues[0].field, "customField1");
    }

    #[test]
    fn scalar_formats_parse_with_format_rules() {
        let int = CustomField::new(2, "Estimate", FieldFormat::Int);
        assert_eq!(typed_value(&int, Some("42"), &EmptyDirectory), Some(TypedValue::Int(42)));
        assert_eq!(typed_value(&int, Some("4.2"), &EmptyDirectory), None);

        let date = CustomField::new(3, "Due", FieldFormat::Date);
        assert_eq!(
            typed_value(&date, Some("2017-03-28"), &EmptyDirectory),
            Some(TypedValue::Date(NaiveDate::from_ymd_opt(2017, 3, 28).unwrap()))
        );
        assert_eq!(typed_value(&date, Some("28/03/2017"), &EmptyDirectory), None);

        let flag = CustomField::new(4, "Billable", FieldFormat::Bool);
        assert_eq!(typed_value(&flag, Some("1"), &EmptyDirectory), Some(TypedValue::Bool(true)));
        assert_eq!(
            typed_value(&flag, Some("false"), &EmptyDirectory),
            Some(TypedValue::Bool(false))
        );
        assert_eq!(typed_value(&flag, Some("maybe"), &EmptyDirectory), None);
    }

    #[test]
    fn text_values_wrap_as_formattable() {
        let field = CustomField::new(5, "Notes", FieldFormat::Text);
        let typed = typed_value(&field, Some("some *text*"), &EmptyDirectory).unwrap();
        assert_eq!(typed.to_json(), json!({ "raw": "some *text*" }));
    }

    #[test]
    fn string_constraints_report_length_and_regex() {
        let field = CustomField::new(6, "Code", FieldFormat::String)
            .with_length_bounds(3, 5)
            .with_regular_expression("^[a-z]+$");

        assert!(validate(&field, Some("abc")).is_empty());

        let issues = validate(&field, Some("ab"));
        assert!(issues.iter().any(|issue| issue.code == codes::LENGTH));

        let issues = validate(&field, Some("ABCD"));
        assert!(issues.iter().any(|issue| issue.code == codes::REGEX));
    }

    #[test]
    fn nonpositive_length_bounds_are_unset() {
        let field = CustomField::new(7, "Free", FieldFormat::String).with_length_bounds(0, -1);
        assert!(validate(&field, Some("x")).is_empty());
    }
}
