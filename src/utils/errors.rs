use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShiboriError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Build error: {message}")]
    Build { message: String },

    #[error("Minify error in {file}: {message}")]
    Minify { file: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShiboriError {
    /// Bundler invocation failure. Fatal: nothing is minified after this.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Minifier failure on a single chunk. Aborts the remaining chunks.
    pub fn minify(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Minify {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ShiboriError>;

impl From<regex::Error> for ShiboriError {
    fn from(err: regex::Error) -> Self {
        ShiboriError::config(format!("Invalid mangle pattern: {}", err))
    }
}

impl From<anyhow::Error> for ShiboriError {
    fn from(err: anyhow::Error) -> Self {
        ShiboriError::build(err.to_string())
    }
}
