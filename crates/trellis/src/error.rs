use trellis_egui::BackendError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("application is already initialized")]
    AlreadyInitialized,
    #[error("application is not initialized")]
    NotInitialized,
    #[error("application is closed")]
    Closed,
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
