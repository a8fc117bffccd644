//! Email templates

use serde::Deserialize;

#[cfg(test)]
use mockall::mock;

use super::LoadError;

/// Subject and body patterns with `{field}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    /// Subject pattern
    #[serde(rename = "subject")]
    pub subject_pattern: String,

    /// Body pattern
    #[serde(rename = "body")]
    pub body_pattern: String,
}

impl Template {
    /// Create a new template
    pub fn new(subject_pattern: impl Into<String>, body_pattern: impl Into<String>) -> Self {
        Self {
            subject_pattern: subject_pattern.into(),
            body_pattern: body_pattern.into(),
        }
    }

    /// Both patterns must be non-empty for a batch to start
    pub fn is_usable(&self) -> bool {
        !self.subject_pattern.trim().is_empty() && !self.body_pattern.trim().is_empty()
    }
}

/// Source of the template for a batch
pub trait TemplateSource: Send + Sync {
    /// Load the template
    fn load_template(&self) -> Result<Template, LoadError>;
}

#[cfg(test)]
mock! {
    pub TemplateSource {}

    impl TemplateSource for TemplateSource {
        fn load_template(&self) -> Result<Template, LoadError>;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_deserialize_from_subject_and_body() -> TestResult {
        let template: Template =
            serde_json::from_str(r#"{"subject": "Hi {Name}", "body": "From {Sender_Name}"}"#)?;

        assert_eq!(template, Template::new("Hi {Name}", "From {Sender_Name}"));
        assert!(template.is_usable());

        Ok(())
    }

    #[test]
    fn test_blank_body_is_not_usable() {
        assert!(!Template::new("Hi", "  ").is_usable());
        assert!(!Template::new("", "Body").is_usable());
    }
}
