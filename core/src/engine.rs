use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Started,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Numeric code used by the save format.
    pub const fn code(self) -> u8 {
        match self {
            Self::Started => 0,
            Self::Lost => 1,
            Self::Won => 2,
            Self::NotStarted => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Started),
            1 => Some(Self::Lost),
            2 => Some(Self::Won),
            3 => Some(Self::NotStarted),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT STARTED",
            Self::Started => "STARTED",
            Self::Won => "WON",
            Self::Lost => "LOST",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a successful turn led to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    Won,
    Lost,
}

impl From<TurnOutcome> for MessageKind {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::Continue => MessageKind::SuccessTurn,
            TurnOutcome::Won => MessageKind::Won,
            TurnOutcome::Lost => MessageKind::Lost,
        }
    }
}

type Turn = core::result::Result<TurnOutcome, FailReason>;

fn fresh_seed() -> u64 {
    rand::random()
}

/// A single game of minesweeper: the board plus the rules acting on it.
///
/// Mines are placed on construction but only as a placeholder; the first
/// `open` re-rolls them so that the opened cell is never a mine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    bombs_num: CellCount,
    status: GameStatus,
    board: Board,
    #[serde(skip, default = "fresh_seed")]
    seed: u64,
}

impl Game {
    pub fn new(id: GameId, width: Coord, height: Coord, bombs: CellCount) -> Result<Self> {
        let config = GameConfig::new((width, height), bombs)?;
        Ok(Self::with_seed(id, config, fresh_seed()))
    }

    /// Deterministic constructor: the same seed and first click always yield
    /// the same layout.
    pub fn with_seed(id: GameId, config: GameConfig, seed: u64) -> Self {
        let board = RandomPlacement::new(seed, None).place(config);
        Self {
            id,
            bombs_num: config.bombs,
            status: GameStatus::NotStarted,
            board,
            seed,
        }
    }

    /// A game already in progress on a fixed layout.
    pub fn from_layout(id: GameId, board: Board) -> Self {
        let bombs_num = board.bomb_count();
        Self::from_parts(id, GameStatus::Started, bombs_num, board)
    }

    /// Reassembles a game from stored parts without checking that the state
    /// is reachable.
    pub fn from_parts(id: GameId, status: GameStatus, bombs_num: CellCount, board: Board) -> Self {
        Self {
            id,
            bombs_num,
            status,
            board,
            seed: fresh_seed(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn bombs_num(&self) -> CellCount {
        self.bombs_num
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Replaces the seed used for the first-open re-roll.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.board.size(), self.bombs_num)
    }

    pub fn current_state(&self) -> Message<'_> {
        let kind = match self.status {
            GameStatus::Lost => MessageKind::Lost,
            GameStatus::Won => MessageKind::Won,
            GameStatus::NotStarted | GameStatus::Started => MessageKind::Initial,
        };
        Message::new(kind, &self.board)
    }

    /// Runs one player command. `x` and `y` are taken raw so that anything
    /// out of range is refused here rather than by the caller.
    pub fn process_command(&mut self, x: i64, y: i64, command: &str) -> Message<'_> {
        let turn = self.try_command(x, y, command);
        self.message(turn)
    }

    /// Applies one deduced move, if there is one.
    pub fn hint(&mut self) -> Message<'_> {
        let turn = self.try_hint();
        self.message(turn)
    }

    fn try_command(&mut self, x: i64, y: i64, command: &str) -> Turn {
        let (width, height) = self.board.size();
        let x = Coord::try_from(x)
            .ok()
            .filter(|&x| x < width)
            .ok_or(FailReason::InvalidX)?;
        let y = Coord::try_from(y)
            .ok()
            .filter(|&y| y < height)
            .ok_or(FailReason::InvalidY)?;
        let command = command.parse()?;
        self.execute((x, y), command)
    }

    fn try_hint(&mut self) -> Turn {
        self.check_not_finished()?;
        let suggestion = suggest(&self.board).ok_or(FailReason::NoSuggestions)?;
        log::debug!("game {}: hint {:?}", self.id, suggestion);
        self.execute(suggestion.coords, suggestion.command)
    }

    fn execute(&mut self, coords: Coord2, command: Command) -> Turn {
        self.check_not_finished()?;
        match command {
            Command::Flag => self.flag_cell(coords),
            Command::Open => {
                if self.status == GameStatus::NotStarted {
                    self.start(coords);
                }
                self.open_cell(coords)
            }
        }
    }

    fn start(&mut self, safe: Coord2) {
        self.board = RandomPlacement::new(self.seed, Some(safe)).place(self.config());
        self.status = GameStatus::Started;
        log::debug!("game {}: started at {:?}", self.id, safe);
    }

    fn flag_cell(&mut self, coords: Coord2) -> Turn {
        let cell = self.board.cell_mut(coords);
        cell.state = match cell.state {
            CellState::Opened => return Err(FailReason::FlagOpened),
            CellState::Flagged => CellState::Closed,
            CellState::Closed => CellState::Flagged,
        };
        Ok(self.settle())
    }

    fn open_cell(&mut self, coords: Coord2) -> Turn {
        if self.board[coords].is_opened() {
            return Err(FailReason::AlreadyOpened);
        }

        self.reveal(coords);

        if self.board[coords].is_bomb {
            self.status = GameStatus::Lost;
            log::debug!("game {}: lost at {:?}", self.id, coords);
            Ok(TurnOutcome::Lost)
        } else {
            Ok(self.settle())
        }
    }

    /// Opens `start` and, while zero cells are uncovered, everything around
    /// them. Opened cells are never queued again.
    fn reveal(&mut self, start: Coord2) {
        self.board.cell_mut(start).state = CellState::Opened;
        if self.board.adjacent_bomb_count(start) != 0 {
            return;
        }

        let mut to_visit = VecDeque::from([start]);
        while let Some(visit_coords) = to_visit.pop_front() {
            for pos in self.board.neighbors(visit_coords) {
                if self.board[pos].is_opened() {
                    continue;
                }
                self.board.cell_mut(pos).state = CellState::Opened;
                if self.board.adjacent_bomb_count(pos) == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Every mine flagged and every safe cell opened.
    pub fn is_win(&self) -> bool {
        self.board.coords().all(|coords| {
            let cell = self.board[coords];
            if cell.is_bomb {
                cell.is_flagged()
            } else {
                cell.is_opened()
            }
        })
    }

    fn settle(&mut self) -> TurnOutcome {
        if self.is_win() {
            self.status = GameStatus::Won;
            log::debug!("game {}: won", self.id);
            TurnOutcome::Won
        } else {
            TurnOutcome::Continue
        }
    }

    fn check_not_finished(&self) -> core::result::Result<(), FailReason> {
        match self.status {
            GameStatus::Lost => Err(FailReason::AlreadyLost),
            GameStatus::Won => Err(FailReason::AlreadyWon),
            GameStatus::NotStarted | GameStatus::Started => Ok(()),
        }
    }

    fn message(&self, turn: Turn) -> Message<'_> {
        let kind = match turn {
            Ok(outcome) => outcome.into(),
            Err(reason) => MessageKind::FailedTurn(reason),
        };
        Message::new(kind, &self.board)
    }
}
