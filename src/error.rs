use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Output sink rejected a write")]
    Format(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Cache limit '{name}' must be greater than zero")]
    InvalidCacheLimit { name: &'static str },

    #[error("Invalid property '{arg}'. Expected NAME=VALUE")]
    InvalidProperty { arg: String },
}

impl From<toml::de::Error> for TemplateError {
    fn from(error: toml::de::Error) -> Self {
        TemplateError::Config(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
