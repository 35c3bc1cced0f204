use thiserror::Error;

use crate::Board;

/// Why a turn was refused. None of these are faults; they are reported back
/// to the player as part of a [`Message`].
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailReason {
    #[error("Invalid X coordinate value")]
    InvalidX,
    #[error("Invalid Y coordinate value")]
    InvalidY,
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Sorry, you have already lost.")]
    AlreadyLost,
    #[error("You have already won, congrats!")]
    AlreadyWon,
    #[error("You can't flag opened cell")]
    FlagOpened,
    #[error("This cell is already opened")]
    AlreadyOpened,
    #[error("No helping suggestions")]
    NoSuggestions,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    SuccessTurn,
    FailedTurn(FailReason),
    Lost,
    Won,
    Initial,
}

impl MessageKind {
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::FailedTurn(_))
    }

    pub const fn fail_reason(self) -> Option<FailReason> {
        match self {
            Self::FailedTurn(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Result of a command together with the board it left behind.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Message<'a> {
    pub kind: MessageKind,
    pub board: &'a Board,
}

impl<'a> Message<'a> {
    pub const fn new(kind: MessageKind, board: &'a Board) -> Self {
        Self { kind, board }
    }
}
