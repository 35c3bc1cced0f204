use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Closed,
    Flagged,
    Opened,
}

impl CellState {
    /// Numeric code used by the save format.
    pub const fn code(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Flagged => 1,
            Self::Opened => 2,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Closed),
            1 => Some(Self::Flagged),
            2 => Some(Self::Opened),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub state: CellState,
    pub is_bomb: bool,
}

impl Cell {
    pub const fn new(state: CellState, is_bomb: bool) -> Self {
        Self { state, is_bomb }
    }

    pub const fn bomb() -> Self {
        Self::new(CellState::Closed, true)
    }

    pub const fn is_closed(self) -> bool {
        matches!(self.state, CellState::Closed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self.state, CellState::Opened)
    }
}

/// Everything a renderer needs to draw one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_opened: bool,
    pub is_flagged: bool,
    pub is_bomb: bool,
    pub adjacent_bombs: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_match_save_format() {
        for state in [CellState::Closed, CellState::Flagged, CellState::Opened] {
            assert_eq!(CellState::from_code(state.code()), Some(state));
        }
        assert_eq!(CellState::Opened.code(), 2);
        assert_eq!(CellState::from_code(3), None);
    }

    #[test]
    fn default_cell_is_closed_and_safe() {
        let cell = Cell::default();
        assert!(cell.is_closed());
        assert!(!cell.is_bomb);
    }
}
