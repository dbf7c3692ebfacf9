//! Error types for building examples from documents.

/// Errors that can occur while turning a YAML/JSON document into an example.
#[derive(Debug, thiserror::Error)]
pub enum ExampleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Expected a mapping at {path}")]
    NotAMapping { path: String },

    #[error("Missing or empty nodeTags at {path}")]
    MissingTypeTag { path: String },
}

pub type Result<T> = std::result::Result<T, ExampleError>;
