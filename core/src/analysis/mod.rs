use serde::{Deserialize, Serialize};

pub use groups::*;

use crate::*;

mod groups;

/// A move that follows from the visible numbers alone, together with the
/// group that proves it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub coords: Coord2,
    pub command: Command,
    pub reason: Group,
}

/// Deduces one certainly-safe cell to open or one certain mine to flag.
pub fn suggest(board: &Board) -> Option<Suggestion> {
    let groups = close(build_groups(board));

    groups.into_iter().find_map(|group| {
        if group.is_safe() {
            return Some(Suggestion {
                coords: group.cells[0],
                command: Command::Open,
                reason: group,
            });
        }

        if group.is_all_mines() {
            let coords = group
                .cells
                .iter()
                .copied()
                .find(|&coords| !board[coords].is_flagged())?;
            return Some(Suggestion {
                coords,
                command: Command::Flag,
                reason: group,
            });
        }

        None
    })
}
