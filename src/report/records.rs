//! Loading entities from JSON record files.

use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;

use super::ReportError;
use crate::config::{
    RecordFileMatcher,
    RecordFilesConfig,
};
use crate::entity::Record;

/// Loads the records of `model` from `path`.
///
/// `path` may be a `.json` file holding one object or an array of objects, a `.jsonl`
/// file with one object per line, or a directory. In a directory, the record files
/// matching `files` whose stem equals the model name are read in path order.
pub fn load_records(model: &str, path: &Path, files: &RecordFilesConfig) -> Result<Vec<Record>, ReportError> {
    if !path.is_dir() {
        return load_file(model, path);
    }

    let mut records = Vec::new();
    for file in find_record_files(model, path, files)? {
        records.extend(load_file(model, &file)?);
    }
    Ok(records)
}

fn find_record_files(model: &str, root: &Path, files: &RecordFilesConfig) -> Result<Vec<PathBuf>, ReportError> {
    let matcher = RecordFileMatcher::new(root.to_path_buf(), files)?;
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root).hidden(false).git_ignore(true).follow_links(false).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            },
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_record_file(path) || path.file_stem().and_then(|s| s.to_str()) != Some(model) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    tracing::debug!(root = %root.display(), count = found_files.len(), "Found record files");
    Ok(found_files)
}

fn load_file(model: &str, path: &Path) -> Result<Vec<Record>, ReportError> {
    let content =
        fs::read_to_string(path).map_err(|source| ReportError::Io { path: path.to_path_buf(), source })?;

    let values = if path.extension().is_some_and(|ext| ext == "jsonl") {
        parse_lines(path, &content)?
    } else {
        match parse(path, &content)? {
            Value::Array(values) => values,
            value => vec![value],
        }
    };

    values
        .into_iter()
        .map(|value| {
            Record::from_json(model, value)
                .map_err(|source| ReportError::InvalidRecord { path: path.to_path_buf(), source })
        })
        .collect()
}

fn parse_lines(path: &Path, content: &str) -> Result<Vec<Value>, ReportError> {
    content.lines().filter(|line| !line.trim().is_empty()).map(|line| parse(path, line)).collect()
}

fn parse(path: &Path, content: &str) -> Result<Value, ReportError> {
    serde_json::from_str(content).map_err(|source| ReportError::Parse { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::entity::AttributeHost;

    #[fixture]
    fn workspace() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("2024")).unwrap();
        fs::write(
            temp_dir.path().join("Article.json"),
            r#"[{"id": 1, "name": {"en": "Hello"}}, {"id": 2, "name": {"en": "World"}}]"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("2024/Article.jsonl"), "{\"id\": 3}\n\n{\"id\": 4}\n").unwrap();
        fs::write(temp_dir.path().join("User.json"), r#"{"id": 9}"#).unwrap();
        temp_dir
    }

    #[rstest]
    fn load_records_from_directory_selects_model_files(workspace: TempDir) {
        let records = load_records("Article", workspace.path(), &RecordFilesConfig::default()).unwrap();

        let keys: Vec<_> = records.iter().map(AttributeHost::key).collect();
        assert_eq!(keys, vec![Some(3.into()), Some(4.into()), Some(1.into()), Some(2.into())]);
        assert_that!(records[0].model_name(), eq("Article"));
    }

    #[rstest]
    fn load_records_from_single_object_file(workspace: TempDir) {
        let records = load_records("User", &workspace.path().join("User.json"), &RecordFilesConfig::default())
            .unwrap();

        assert_that!(records.len(), eq(1));
    }

    #[rstest]
    fn load_records_reports_parse_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Article.json");
        fs::write(&path, "[{").unwrap();

        let result = load_records("Article", &path, &RecordFilesConfig::default());

        assert!(matches!(result, Err(ReportError::Parse { .. })));
    }

    #[rstest]
    fn load_records_rejects_non_object_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Article.json");
        fs::write(&path, "[1, 2]").unwrap();

        let result = load_records("Article", &path, &RecordFilesConfig::default());

        assert!(matches!(result, Err(ReportError::InvalidRecord { .. })));
    }

    #[rstest]
    fn load_records_missing_file_is_io_error() {
        let result = load_records("Article", Path::new("/nonexistent/Article.json"), &RecordFilesConfig::default());

        assert!(matches!(result, Err(ReportError::Io { .. })));
    }
}
