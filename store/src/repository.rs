use core::fmt;

use sweeper_core::{CellCount, Coord, Game, GameConfig, GameId, GameStatus};

use crate::Result;

/// Where games are kept between sessions.
pub trait GameRepository {
    /// An id no stored game uses yet.
    fn next_id(&self) -> GameId;

    fn save(&mut self, game: &Game) -> Result<()>;

    /// Loads a game. An id that cannot be loaded is dropped from the listing.
    fn load(&mut self, id: GameId) -> Result<Game>;

    fn list_ids(&self) -> Vec<GameId>;
}

/// Creates a game under a fresh id and stores it right away.
pub fn create_game<R: GameRepository + ?Sized>(repo: &mut R, config: GameConfig) -> Result<Game> {
    let id = repo.next_id();
    let (width, height) = config.size;
    let game = Game::new(id, width, height, config.bombs)?;
    repo.save(&game)?;
    log::debug!("created game {} ({}x{}, {} mines)", id, width, height, config.bombs);
    Ok(game)
}

/// One line of the saved games listing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub id: GameId,
    pub width: Coord,
    pub height: Coord,
    pub bombs: CellCount,
    pub status: GameStatus,
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        let (width, height) = game.size();
        Self {
            id: game.id(),
            width,
            height,
            bombs: game.bombs_num(),
            status: game.status(),
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Game {}: {} x {}, {} bomb{} {}",
            self.id,
            self.width,
            self.height,
            self.bombs,
            if self.bombs == 1 { "" } else { "s" },
            self.status
        )
    }
}

/// Summaries of every loadable game. Games that fail to load are skipped
/// (and, per [`GameRepository::load`], forgotten).
pub fn summaries<R: GameRepository + ?Sized>(repo: &mut R) -> Vec<GameSummary> {
    let mut out = Vec::new();
    for id in repo.list_ids() {
        match repo.load(id) {
            Ok(game) => out.push(GameSummary::from(&game)),
            Err(err) => log::warn!("skipping game {}: {}", id, err),
        }
    }
    out
}
