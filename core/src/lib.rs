use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use board::*;
pub use cell::*;
pub use command::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use message::*;
pub use save::{load, save};
pub use types::*;

mod analysis;
mod board;
mod cell;
mod command;
mod engine;
mod error;
mod generator;
mod message;
mod save;
mod types;

/// Size and mine count of a game to be created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, bombs: CellCount) -> Self {
        Self { size, bombs }
    }

    /// Checks that the board is non-empty and leaves at least one safe cell.
    pub fn new(size: Coord2, bombs: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, bombs);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let cells = self.total_cells();
        if self.bombs >= cells {
            return Err(GameError::TooManyMines {
                mines: self.bombs,
                cells,
            });
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}
