use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sweeper_core::{Game, GameId};

use crate::*;

/// One file per game plus a settings index, all inside one directory.
#[derive(Debug)]
pub struct FileRepository<C: SaveCipher = Plaintext> {
    dir: PathBuf,
    settings: Settings,
    cipher: C,
}

impl FileRepository {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_cipher(dir, Plaintext)
    }

    /// Opens [`DEFAULT_SAVES_DIR`] in the working directory.
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_SAVES_DIR)
    }
}

impl<C: SaveCipher> FileRepository<C> {
    /// Opens (creating if needed) the saves directory and reads its index.
    pub fn with_cipher(dir: impl Into<PathBuf>, cipher: C) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let settings = match fs::read_to_string(dir.join(SETTINGS_FILE)) {
            Ok(text) => Settings::parse(&text)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
            Err(err) => return Err(err.into()),
        };
        log::debug!(
            "opened {} with {} saved games",
            dir.display(),
            settings.ids().len()
        );

        Ok(Self {
            dir,
            settings,
            cipher,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn save_path(&self, id: GameId) -> PathBuf {
        self.dir.join(format!("save_{id}"))
    }

    fn write_settings(&self) -> Result<()> {
        fs::write(self.dir.join(SETTINGS_FILE), self.settings.to_toml()?)?;
        Ok(())
    }

    fn read_game(&self, id: GameId) -> Result<Game> {
        let sealed = match fs::read(self.save_path(id)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };
        let plaintext = self.cipher.open(&sealed)?;
        Ok(Game::from_save(&plaintext)?)
    }
}

impl<C: SaveCipher> GameRepository for FileRepository<C> {
    fn next_id(&self) -> GameId {
        self.settings.next_id()
    }

    fn save(&mut self, game: &Game) -> Result<()> {
        let sealed = self.cipher.seal(&game.to_save());
        fs::write(self.save_path(game.id()), sealed)?;
        self.settings.register(game.id());
        self.write_settings()
    }

    fn load(&mut self, id: GameId) -> Result<Game> {
        let loaded = self.read_game(id);
        if let Err(err) = &loaded {
            log::warn!("dropping game {} from the index: {}", id, err);
            if self.settings.remove(id) {
                if let Err(write_err) = self.write_settings() {
                    log::warn!("could not update settings: {}", write_err);
                }
            }
        }
        loaded
    }

    fn list_ids(&self) -> Vec<GameId> {
        self.settings.ids().to_vec()
    }
}
