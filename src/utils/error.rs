use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File '{path}' is unreadable or malformed: {reason}")]
    UnreadableOrMalformed { path: String, reason: String },

    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("No recipe registered for capability {capability}")]
    UnregisteredCapability { capability: String },

    #[error("Capability {capability} depends on itself")]
    CyclicDependency { capability: String },

    #[error("Folder not found: {path}")]
    FolderNotFound { path: String },

    #[error("Folder is empty: {path}")]
    EmptyFolder { path: String },

    #[error("No chart has been rendered yet")]
    NothingRendered,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Format,
    Registry,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ChartError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ChartError::UnreadableOrMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::FileNotFound { .. }
            | ChartError::FolderNotFound { .. }
            | ChartError::EmptyFolder { .. }
            | ChartError::NothingRendered => ErrorCategory::Input,
            ChartError::UnreadableOrMalformed { .. }
            | ChartError::UnsupportedFormat { .. }
            | ChartError::CsvError(_)
            | ChartError::SerializationError(_) => ErrorCategory::Format,
            ChartError::UnregisteredCapability { .. } | ChartError::CyclicDependency { .. } => {
                ErrorCategory::Registry
            }
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. }
            | ChartError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ChartError::IoError(_) | ChartError::SqliteError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Format | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Registry | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ChartError::FileNotFound { .. } => "Check that the selected file still exists",
            ChartError::UnreadableOrMalformed { .. } => {
                "Make sure the file matches its format: a SQLite table, a JSON object with a \"data\" array, or a CSV with Key and Value columns"
            }
            ChartError::UnsupportedFormat { .. } => "Select a .sqlite, .json or .csv file",
            ChartError::UnregisteredCapability { .. } | ChartError::CyclicDependency { .. } => {
                "Register a recipe for every chart dependency before rendering"
            }
            ChartError::FolderNotFound { .. } => "Check the folder path",
            ChartError::EmptyFolder { .. } => "Pick a folder that contains data files",
            ChartError::NothingRendered => "Select a data file before exporting",
            ChartError::IoError(_) => "Check file permissions and free disk space",
            ChartError::SqliteError(_) => "Make sure the database is not locked or corrupted",
            ChartError::CsvError(_) => "Check the CSV line structure",
            ChartError::SerializationError(_) => "Check the JSON syntax",
            ChartError::ConfigError { .. }
            | ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. }
            | ChartError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChartError::FileNotFound { path } => format!("The file '{}' does not exist", path),
            ChartError::UnreadableOrMalformed { path, .. } => {
                format!("An error occurred while checking the file '{}'", path)
            }
            ChartError::UnsupportedFormat { .. } => "Unsupported file type".to_string(),
            ChartError::UnregisteredCapability { .. } | ChartError::CyclicDependency { .. } => {
                "Unable to create the chart object".to_string()
            }
            ChartError::FolderNotFound { .. } => "The selected folder does not exist".to_string(),
            ChartError::EmptyFolder { .. } => "The selected folder is empty".to_string(),
            ChartError::NothingRendered => "There is no chart to export".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
