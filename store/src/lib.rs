//! Persistence for games: an injected repository instead of a global save
//! store, so the engine itself never touches the filesystem.

pub use cipher::*;
pub use error::*;
pub use file::*;
pub use memory::*;
pub use repository::*;
pub use settings::*;

mod cipher;
mod error;
mod file;
mod memory;
mod repository;
mod settings;
