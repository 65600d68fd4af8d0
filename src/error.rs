use crate::config::ConfigError;
use crate::dialogs::DialogError;
use thiserror::Error;

/// Errors that end the program.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dialog registry error: {0}")]
    Dialog(#[from] DialogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => format!("Could not load settings: {}", e),
            AppError::Dialog(DialogError::Unregistered(name)) => {
                format!("Tried to open a dialog that does not exist: {}", name)
            }
            AppError::Io(e) => format!("Terminal error: {}", e),
        }
    }
}
