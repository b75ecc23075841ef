use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Planning error: {message}")]
    PlanError { message: String },

    #[error("Unknown template '{name}'")]
    UnknownTemplateError { name: String },

    #[error("Path conflict at '{path}': {reason}")]
    PathConflictError { path: String, reason: String },

    #[error("Failed to apply '{path}': {message}")]
    ApplyError { path: String, message: String },

    #[error("Verification failed: {failures} check(s) did not pass")]
    VerificationError { failures: usize },
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Planning,
    Filesystem,
    Verification,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScaffoldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::PlanError { .. } | Self::UnknownTemplateError { .. } => ErrorCategory::Planning,
            Self::IoError(_) | Self::PathConflictError { .. } | Self::ApplyError { .. } => {
                ErrorCategory::Filesystem
            }
            Self::VerificationError { .. } => ErrorCategory::Verification,
            Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::PlanError { .. }
            | Self::UnknownTemplateError { .. } => ErrorSeverity::Medium,
            Self::VerificationError { .. } => ErrorSeverity::High,
            Self::PathConflictError { .. } | Self::ApplyError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the manifest or command-line flags and fix the reported field".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            Self::MissingConfigError { field } => {
                format!("Add the missing field '{}' to the configuration", field)
            }
            Self::PlanError { .. } => {
                "Remove duplicate or unsafe paths from the layout lists".to_string()
            }
            Self::UnknownTemplateError { name } => {
                format!("'{}' is not a builtin template; check the manifest", name)
            }
            Self::PathConflictError { path, .. } => format!(
                "Move or remove '{}' so the scaffold can create the expected entry",
                path
            ),
            Self::ApplyError { .. } | Self::IoError(_) => {
                "Check filesystem permissions and free disk space, then re-run".to_string()
            }
            Self::VerificationError { .. } => {
                "Re-run the scaffold to restore the expected tree, then verify again".to_string()
            }
            Self::SerializationError(_) => {
                "This is likely a bug; re-run with --verbose and report the output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Planning => format!("Layout problem: {}", self),
            ErrorCategory::Filesystem => format!("Filesystem problem: {}", self),
            ErrorCategory::Verification => format!("Scaffold check failed: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_drives_exit_codes() {
        assert!(ErrorSeverity::Low < ErrorSeverity::Medium);
        assert!(ErrorSeverity::Medium < ErrorSeverity::High);
        assert!(ErrorSeverity::High < ErrorSeverity::Critical);
    }

    #[test]
    fn test_config_errors_are_medium_configuration() {
        let err = ScaffoldError::MissingConfigError {
            field: "layout.root".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("layout.root"));
    }

    #[test]
    fn test_path_conflict_is_high_filesystem() {
        let err = ScaffoldError::PathConflictError {
            path: "config".to_string(),
            reason: "a file exists where a directory is expected".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Filesystem problem"));
    }

    #[test]
    fn test_io_error_converts_and_is_critical() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ScaffoldError = io.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
