use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] circle_config::ConfigError),

    #[error("{0}")]
    Sse(#[from] circle_sse::SseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Camera(#[from] circle_camera::CameraError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
