use serde::{Deserialize, Serialize};
use sweeper_core::GameId;

use crate::{Result, StoreError};

/// Name of the directory saves go into when no other is given.
pub const DEFAULT_SAVES_DIR: &str = "minesweeper-saves";

/// File inside the saves directory holding the [`Settings`] index.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Index of known saves.
///
/// ```toml
/// games_created = 3
/// games_ids = [0, 2]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    games_created: GameId,
    games_ids: Vec<GameId>,
}

impl Settings {
    pub fn parse(text: &str) -> Result<Self> {
        let mut settings: Self = toml::from_str(text)?;
        settings.games_ids.sort_unstable();

        if let Some(pair) = settings.games_ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(StoreError::InvalidSettings(format!(
                "game id {} listed twice",
                pair[0]
            )));
        }

        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn games_created(&self) -> GameId {
        self.games_created
    }

    /// Listed ids, ascending.
    pub fn ids(&self) -> &[GameId] {
        &self.games_ids
    }

    pub fn contains(&self, id: GameId) -> bool {
        self.games_ids.binary_search(&id).is_ok()
    }

    /// An id not used by any listed save.
    pub fn next_id(&self) -> GameId {
        let after_last = self.games_ids.last().map_or(0, |&id| id.saturating_add(1));
        self.games_created.max(after_last)
    }

    /// Records a save for `id`, counting it as created if it is new.
    pub fn register(&mut self, id: GameId) {
        if let Err(pos) = self.games_ids.binary_search(&id) {
            self.games_ids.insert(pos, id);
            self.games_created = self.games_created.saturating_add(1);
        }
    }

    pub fn remove(&mut self, id: GameId) -> bool {
        match self.games_ids.binary_search(&id) {
            Ok(pos) => {
                self.games_ids.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_fresh_settings() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.next_id(), 0);
    }

    #[test]
    fn parses_and_writes_back() {
        let settings = Settings::parse("games_created = 3\ngames_ids = [2, 0]\n").unwrap();
        assert_eq!(settings.games_created(), 3);
        assert_eq!(settings.ids(), &[0, 2]);
        assert_eq!(Settings::parse(&settings.to_toml().unwrap()).unwrap(), settings);
    }

    #[test]
    fn rejects_unknown_keys_and_code() {
        assert!(matches!(
            Settings::parse("games_created = 1\ncolor = \"red\"\n"),
            Err(StoreError::SettingsFormat(_))
        ));
        assert!(matches!(
            Settings::parse("games_created=__import__('os')\n"),
            Err(StoreError::SettingsFormat(_))
        ));
        assert!(matches!(
            Settings::parse("games_ids = [1, 1]\n"),
            Err(StoreError::InvalidSettings(_))
        ));
    }

    #[test]
    fn register_counts_new_ids_once() {
        let mut settings = Settings::default();
        settings.register(0);
        settings.register(0);
        assert_eq!(settings.games_created(), 1);
        assert_eq!(settings.next_id(), 1);

        settings.register(7);
        assert_eq!(settings.games_created(), 2);
        assert_eq!(settings.next_id(), 8);

        assert!(settings.remove(7));
        assert!(!settings.remove(7));
        assert_eq!(settings.ids(), &[0]);
        assert_eq!(settings.next_id(), 2);
    }
}
