use sweeper_core::{GameError, GameId, SaveError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no save found for game {0}")]
    NotFound(GameId),
    #[error("cannot create game: {0}")]
    Game(#[from] GameError),
    #[error("corrupt save: {0}")]
    Save(#[from] SaveError),
    #[error("could not read settings: {0}")]
    SettingsFormat(#[from] toml::de::Error),
    #[error("could not write settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("could not decode save contents: {0}")]
    Cipher(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = core::result::Result<T, StoreError>;
