use thiserror::Error;

/// Failures `aggregate` can return. Narrative failures are never errors;
/// they are carried inside the record as [`crate::Narrative::Failed`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("User not found: {0}")]
    SubjectNotFound(String),
}

impl AnalyzeError {
    /// HTTP status this failure surfaces as.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyzeError::InvalidInput(_) => 400,
            AnalyzeError::SubjectNotFound(_) => 404,
        }
    }

    /// Message safe to show the caller.
    pub fn public_message(&self) -> String {
        match self {
            AnalyzeError::InvalidInput(reason) => reason.clone(),
            AnalyzeError::SubjectNotFound(_) => "User not found".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AnalyzeError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(AnalyzeError::SubjectNotFound("x".into()).status_code(), 404);
    }

    #[test]
    fn not_found_hides_upstream_detail() {
        let err = AnalyzeError::SubjectNotFound("API error (status 502): bad gateway".into());
        assert_eq!(err.public_message(), "User not found");
    }
}
