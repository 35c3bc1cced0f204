use std::collections::BTreeMap;

use sweeper_core::{Game, GameId};

use crate::{GameRepository, Result, Settings, StoreError};

/// Keeps save lines in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    settings: Settings,
    saves: BTreeMap<GameId, String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored save line for `id`, as written.
    pub fn raw(&self, id: GameId) -> Option<&str> {
        self.saves.get(&id).map(String::as_str)
    }

    /// Stores a save line without parsing it.
    pub fn insert_raw(&mut self, id: GameId, save: impl Into<String>) {
        self.saves.insert(id, save.into());
        self.settings.register(id);
    }
}

impl GameRepository for MemoryRepository {
    fn next_id(&self) -> GameId {
        self.settings.next_id()
    }

    fn save(&mut self, game: &Game) -> Result<()> {
        self.insert_raw(game.id(), game.to_save());
        Ok(())
    }

    fn load(&mut self, id: GameId) -> Result<Game> {
        let loaded = match self.saves.get(&id) {
            Some(save) => Game::from_save(save).map_err(StoreError::from),
            None => Err(StoreError::NotFound(id)),
        };
        if loaded.is_err() {
            self.settings.remove(id);
            self.saves.remove(&id);
        }
        loaded
    }

    fn list_ids(&self) -> Vec<GameId> {
        self.settings.ids().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameConfig, GameStatus};

    use crate::{create_game, summaries};

    #[test]
    fn create_save_and_load() {
        let mut repo = MemoryRepository::new();
        let game = create_game(&mut repo, GameConfig::new((4, 4), 3).unwrap()).unwrap();
        assert_eq!(game.id(), 0);
        assert_eq!(repo.next_id(), 1);
        assert_eq!(repo.list_ids(), vec![0]);

        let loaded = repo.load(0).unwrap();
        assert_eq!(loaded.board(), game.board());
        assert_eq!(loaded.status(), GameStatus::NotStarted);
    }

    #[test]
    fn resaving_keeps_id() {
        let mut repo = MemoryRepository::new();
        let mut game = create_game(&mut repo, GameConfig::new((3, 3), 1).unwrap()).unwrap();
        game.process_command(0, 0, "open");
        repo.save(&game).unwrap();
        assert_eq!(repo.list_ids(), vec![0]);
        assert_eq!(repo.next_id(), 1);
        assert_eq!(repo.raw(0), Some(game.to_save().as_str()));
    }

    #[test]
    fn broken_saves_are_forgotten() {
        let mut repo = MemoryRepository::new();
        repo.insert_raw(0, "not a save");
        repo.insert_raw(1, "1 3 1 2 0 0,0;#0,0;#");

        assert!(matches!(repo.load(0), Err(StoreError::Save(_))));
        assert!(matches!(repo.load(5), Err(StoreError::NotFound(5))));
        assert_eq!(repo.list_ids(), vec![1]);

        let listed = summaries(&mut repo);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].to_string(), "Game 1: 1 x 2, 0 bombs NOT STARTED");
    }

    #[test]
    fn bad_config_is_refused() {
        let mut repo = MemoryRepository::new();
        let config = GameConfig::new_unchecked((2, 2), 4);
        assert!(matches!(create_game(&mut repo, config), Err(StoreError::Game(_))));
        assert!(repo.list_ids().is_empty());
    }
}
