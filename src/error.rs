use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildingCheckError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Common(#[from] building_check_common::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, BuildingCheckError>;
