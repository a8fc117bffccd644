//! JSON email template

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::domain::campaigns::{LoadError, Template, TemplateSource};

/// Reads a `{"subject": ..., "body": ...}` template from a JSON file
#[derive(Debug, Clone)]
pub struct JsonTemplateSource {
    path: PathBuf,
}

impl JsonTemplateSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TemplateSource for JsonTemplateSource {
    fn load_template(&self) -> Result<Template, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    fn json_file(contents: &str) -> TestResult<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        file.write_all(contents.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_load_template() -> TestResult {
        let file = json_file(
            r#"{"subject": "Hello {Name}", "body": "Dear {Name},\n\n{Sender_Name}"}"#,
        )?;

        let template = JsonTemplateSource::new(file.path()).load_template()?;

        assert_eq!(template.subject_pattern, "Hello {Name}");
        assert_eq!(template.body_pattern, "Dear {Name},\n\n{Sender_Name}");

        Ok(())
    }

    #[test]
    fn test_missing_body_is_an_error() -> TestResult {
        let file = json_file(r#"{"subject": "Hello"}"#)?;

        let result = JsonTemplateSource::new(file.path()).load_template();

        assert!(matches!(result, Err(LoadError::UnknownError(_))));

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = JsonTemplateSource::new("/nonexistent/template.json").load_template();

        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }
}
