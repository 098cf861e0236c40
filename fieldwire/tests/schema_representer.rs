mod support;

use fieldwire::{
    AllowedValue, CustomField, DerivedRepresenter, FieldFormat, ResourceRef, SchemaEntry, WireError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::{Directory, Work, list_field};

#[test]
fn basic_schema_reports_type_name_and_flags() {
    let field = CustomField::new(21, "Severity", FieldFormat::String)
        .required()
        .with_default_value("low")
        .with_length_bounds(2, 30)
        .with_regular_expression("^[a-z]+$");
    let work = Work::new("schema_basic", vec![field]);

    let rendered = DerivedRepresenter::schema(json!({}), &work)
        .unwrap()
        .render(&work, &Directory::new());

    assert_eq!(
        rendered["customField21"],
        json!({
            "type": "String",
            "name": "Severity",
            "required": true,
            "writable": true,
            "hasDefault": true,
            "minLength": 2,
            "maxLength": 30,
            "regularExpression": "^[a-z]+$",
        })
    );
}

#[test]
fn nonpositive_length_bounds_are_omitted() {
    let field = CustomField::new(22, "Notes", FieldFormat::Text).with_length_bounds(0, -1);
    let work = Work::new("schema_lengths", vec![field]);

    let rendered = DerivedRepresenter::schema(json!({}), &work)
        .unwrap()
        .render(&work, &Directory::new());

    let schema = &rendered["customField22"];
    assert_eq!(schema["type"], "Formattable");
    assert_eq!(schema["hasDefault"], false);
    assert!(schema.get("minLength").is_none());
    assert!(schema.get("maxLength").is_none());
    assert!(schema.get("regularExpression").is_none());
}

#[test]
fn version_schema_enumerates_allowed_values_with_links_and_embedded() {
    let field = CustomField::new(23, "Affected version", FieldFormat::Version);
    let work = Work::new("schema_version", vec![field]).with_assignable(
        23,
        vec![
            AllowedValue::Resource(ResourceRef::new(3, "1.0")),
            AllowedValue::Resource(ResourceRef::new(4, "2.0")),
        ],
    );

    let rendered = DerivedRepresenter::schema(json!({}), &work)
        .unwrap()
        .render(&work, &Directory::new());

    let schema = &rendered["customField23"];
    assert_eq!(schema["type"], "Version");
    assert_eq!(
        schema["_links"]["allowedValues"],
        json!([
            { "href": "/api/v3/versions/3", "title": "1.0" },
            { "href": "/api/v3/versions/4", "title": "2.0" },
        ])
    );
    assert_eq!(schema["_embedded"]["allowedValues"][0]["_type"], "Version");
    assert_eq!(schema["_embedded"]["allowedValues"][1]["name"], "2.0");
}

#[test]
fn list_schema_type_varies_with_multi_value() {
    let single = Work::new("schema_list_single", vec![list_field(24, "Category")]);
    let multi = Work::new("schema_list_multi", vec![list_field(25, "Tags").multi_valued()]);

    let rendered_single = DerivedRepresenter::schema(json!({}), &single)
        .unwrap()
        .render(&single, &Directory::new());
    let rendered_multi = DerivedRepresenter::schema(json!({}), &multi)
        .unwrap()
        .render(&multi, &Directory::new());

    assert_eq!(rendered_single["customField24"]["type"], "StringObject");
    assert_eq!(rendered_multi["customField25"]["type"], "[]StringObject");
}

#[test]
fn list_schema_enumerates_its_options() {
    let work = Work::new("schema_list_options", vec![list_field(26, "Category")]);

    let rendered = DerivedRepresenter::schema(json!({}), &work)
        .unwrap()
        .render(&work, &Directory::new());

    let schema = &rendered["customField26"];
    assert_eq!(
        schema["_links"]["allowedValues"],
        json!([
            { "href": "/api/v3/string_objects/10?value=foo", "title": "foo" },
            { "href": "/api/v3/string_objects/11?value=bar", "title": "bar" },
        ])
    );
    assert_eq!(schema["_embedded"]["allowedValues"][0]["value"], "foo");
}

#[test]
fn user_schema_links_to_the_projects_assignable_users() {
    let field = CustomField::new(27, "Reviewer", FieldFormat::User);
    let work = Work::new("schema_user", vec![field]).with_project(12);

    let rendered = DerivedRepresenter::schema(json!({}), &work)
        .unwrap()
        .render(&work, &Directory::new());

    assert_eq!(
        rendered["customField27"]["_links"]["allowedValues"],
        json!({ "href": "/api/v3/projects/12/available_assignees" })
    );
}

#[test]
fn link_shaped_schema_without_a_customizable_is_a_configuration_error() {
    let field = CustomField::new(28, "Affected version", FieldFormat::Version);

    let err = SchemaEntry::build(&field, None::<&Work>).unwrap_err();
    assert!(matches!(err, WireError::Configuration { .. }));
}

#[test]
fn basic_schema_builds_without_a_customizable() {
    let field = CustomField::new(29, "Severity", FieldFormat::String);

    let entry = SchemaEntry::build(&field, None::<&Work>).unwrap();
    assert_eq!(entry.wire_type, "String");
    assert_eq!(entry.name, "Severity");
}

#[test]
fn user_schema_without_a_project_is_a_configuration_error() {
    let field = CustomField::new(30, "Reviewer", FieldFormat::User);
    let work = Work::new("schema_user_no_project", vec![field]);

    let err = DerivedRepresenter::schema(json!({}), &work).unwrap_err();
    assert!(matches!(err, WireError::Configuration { .. }));
}
