//! Error types for scene composition and loading.
//!
//! Every variant is contained inside the decorative layer: callers degrade to
//! "no 3D scene" rather than propagating further.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SceneError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A focus set named a body the registry does not know.
    #[error("Body not found in registry: {id}")]
    NotFound { id: String },

    /// Invalid scene configuration, field recipe or body catalog.
    #[error("Invalid scene configuration: {message}")]
    Configuration { message: String },

    /// The scene module behind a lazy boundary failed to resolve.
    #[error("Scene module failed to load: {message}")]
    ModuleLoad { message: String },
}

impl SceneError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn module_load(message: impl Into<String>) -> Self {
        Self::ModuleLoad { message: message.into() }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::config(format!("JSON error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SceneError::not_found("pluto");
        assert_eq!(err.to_string(), "Body not found in registry: pluto");
        let err = SceneError::config("fov must be positive");
        assert!(err.to_string().contains("fov must be positive"));
    }

    #[test]
    fn json_errors_become_configuration_errors() {
        let err: SceneError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, SceneError::Configuration { .. }));
    }
}
