use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FailReason;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Open,
    Flag,
}

impl FromStr for Command {
    type Err = FailReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("open") {
            Ok(Self::Open)
        } else if s.eq_ignore_ascii_case("flag") {
            Ok(Self::Flag)
        } else {
            Err(FailReason::InvalidCommand)
        }
    }
}

/// Splits a `"<x> <y> <command>"` line into its tokens.
///
/// Only the shape is checked here: exactly three tokens, the first two
/// integers. Range and command checks are left to [`Game::process_command`].
///
/// [`Game::process_command`]: crate::Game::process_command
pub fn parse_move(line: &str) -> Option<(i64, i64, &str)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let command = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((x, y, command))
}
