//! Missing-translations command over record files and workspace settings.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use std::fs;

use googletest::prelude::*;
use rstest::*;
use tempfile::TempDir;
use translatable::config::{
    CONFIG_FILE_NAME,
    ConfigError,
};
use translatable::report::{
    self,
    ReportError,
    ReportOptions,
};

const SETTINGS: &str = r#"{
    "locales": ["en", "fr", "es"],
    "models": {"TestModel": {"attributes": ["name", "other_field"]}}
}"#;

fn workspace(records: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), SETTINGS).unwrap();
    fs::create_dir_all(temp_dir.path().join("records")).unwrap();
    fs::write(temp_dir.path().join("records/TestModel.json"), records).unwrap();
    temp_dir
}

fn options(workspace: &TempDir, attributes: &[&str]) -> ReportOptions {
    ReportOptions {
        model: "TestModel".to_string(),
        config_root: workspace.path().to_path_buf(),
        attributes: attributes.iter().map(ToString::to_string).collect(),
        ..ReportOptions::default()
    }
}

fn render(options: &ReportOptions) -> String {
    report::run(options).unwrap().to_string()
}

#[rstest]
fn lists_missing_translations() {
    let workspace = workspace(r#"[{"id": 42, "name": {"en": "Hello", "fr": "", "es": null}}]"#);

    let output = render(&options(&workspace, &["name"]));

    assert_that!(
        output,
        all![
            contains_substring("Checking model: TestModel"),
            contains_substring("Missing Translations"),
            contains_substring("42"),
            contains_substring("name"),
            contains_substring("fr, es"),
            not(contains_substring("en,")),
        ]
    );
}

#[rstest]
fn reports_complete_translations() {
    let workspace = workspace(r#"[{"id": 1, "name": {"en": "Hello", "fr": "Bonjour", "es": "Hola"}}]"#);

    let output = render(&options(&workspace, &["name"]));

    assert_that!(
        output,
        all![
            contains_substring("All translations are complete for model"),
            contains_substring("TestModel"),
            not(contains_substring("Missing Translations")),
        ]
    );
}

#[rstest]
fn checks_every_declared_attribute_by_default() {
    let workspace = workspace(
        r#"[{"id": 1, "name": {"en": "Hello"}}, {"id": 2, "name": {"en": "Hi", "fr": "Salut", "es": "Hola"}, "other_field": {"fr": "Monde"}}]"#,
    );

    let output = render(&options(&workspace, &[]));

    assert_that!(
        output,
        all![
            contains_substring("| 1  | name        | fr, es          |"),
            contains_substring("| 1  | other_field | en, fr, es      |"),
            contains_substring("| 2  | other_field | en, es          |"),
            not(contains_substring("| 2  | name")),
        ]
    );
}

#[rstest]
fn locales_default_to_the_configured_locales() {
    let workspace = workspace(r#"[{"id": 1, "name": {"en": "Hello"}}]"#);

    let default_locales = report::run(&options(&workspace, &["name"])).unwrap();
    let explicit_locales =
        report::run(&ReportOptions { locales: vec!["en".to_string()], ..options(&workspace, &["name"]) }).unwrap();

    assert_that!(default_locales.rows.len(), eq(1));
    assert_that!(default_locales.rows[0].missing_locales, elements_are![eq("fr"), eq("es")]);
    assert_that!(explicit_locales.is_complete(), eq(true));
}

#[rstest]
fn attribute_globs_select_declared_attributes() {
    let workspace = workspace(r#"[{"id": 1, "name": {"en": "Hello"}}]"#);

    let found = report::run(&options(&workspace, &["*_field"])).unwrap();

    assert_that!(found.rows.len(), eq(1));
    assert_that!(found.rows[0].attribute, eq("other_field"));
    assert_that!(found.rows[0].missing_locales, elements_are![eq("en"), eq("fr"), eq("es")]);
}

#[rstest]
fn attribute_patterns_matching_nothing_fail() {
    let workspace = workspace(r#"[{"id": 1, "name": {"en": "Hello"}}]"#);

    let result = report::run(&options(&workspace, &["nmae"]));

    assert!(matches!(
        result,
        Err(ReportError::NoMatchingAttributes { ref model, ref patterns }) if model == "TestModel" && patterns == &["nmae"]
    ));
    assert_that!(result.unwrap_err().to_string(), eq("No translatable attribute of TestModel matches `nmae`"));
}

#[rstest]
fn records_default_to_the_config_directory() {
    let workspace = workspace(r#"[{"id": 1, "name": {"en": "Hello"}}]"#);
    fs::write(workspace.path().join("TestModel.jsonl"), r#"{"id": 2, "name": {"en": "Hi", "fr": "Salut"}}"#)
        .unwrap();

    let from_config_dir = report::run(&options(&workspace, &["name"])).unwrap();
    let from_single_file = report::run(&ReportOptions {
        records: Some(workspace.path().join("records/TestModel.json")),
        ..options(&workspace, &["name"])
    })
    .unwrap();

    assert_that!(from_config_dir.checked, eq(2));
    assert_that!(from_single_file.checked, eq(1));
}

#[rstest]
fn unknown_model_is_a_config_error() {
    let workspace = workspace("[]");

    let result = report::run(&ReportOptions { model: "Unknown".to_string(), ..options(&workspace, &[]) });

    assert!(matches!(result, Err(ReportError::Config(ConfigError::UnknownModel(ref model))) if model == "Unknown"));
}

#[rstest]
fn fails_without_records() {
    let workspace = workspace("[]");

    let result = report::run(&options(&workspace, &["name"]));

    assert!(matches!(result, Err(ReportError::NoRecords { .. })));
    assert_that!(result.unwrap_err().to_string(), eq("No records found for model TestModel."));
}
