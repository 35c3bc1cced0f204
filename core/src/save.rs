//! Plaintext save format.
//!
//! A save is a single line:
//!
//! ```text
//! <id> <status> <width> <height> <bombs> <field>
//! ```
//!
//! `field` holds one block per row, each terminated by `#`. A row block is the
//! row's cells in increasing `x`, each written as `<state>,<is_bomb>;`.

use core::fmt::Write;
use core::str::FromStr;

use ndarray::Array2;

use crate::*;

/// Encodes a game into its save line.
pub fn save(game: &Game) -> String {
    let board = game.board();
    let (width, height) = board.size();
    let mut out = format!(
        "{} {} {} {} {} ",
        game.id(),
        game.status().code(),
        width,
        height,
        game.bombs_num()
    );

    for y in 0..height {
        for cell in board.row(y) {
            // writing into a String cannot fail
            let _ = write!(out, "{},{};", cell.state.code(), u8::from(cell.is_bomb));
        }
        out.push('#');
    }

    out
}

/// Decodes a save line. Nothing is re-validated beyond the shape of the data:
/// status and mine count are taken as written.
pub fn load(save: &str) -> core::result::Result<Game, SaveError> {
    let mut tokens = save.split_whitespace();

    let id: GameId = number(tokens.next(), "id")?;
    let status_code: u8 = number(tokens.next(), "status")?;
    let status = GameStatus::from_code(status_code).ok_or(SaveError::UnknownStatus(status_code))?;
    let width: Coord = number(tokens.next(), "width")?;
    let height: Coord = number(tokens.next(), "height")?;
    let bombs_num: CellCount = number(tokens.next(), "bombs")?;
    let field = tokens.next().ok_or(SaveError::MissingField("field"))?;

    if tokens.next().is_some() {
        return Err(SaveError::TrailingData);
    }
    if width == 0 || height == 0 {
        return Err(SaveError::ZeroSize);
    }

    let mut blocks: Vec<&str> = field.split('#').collect();
    if blocks.pop() != Some("") {
        return Err(SaveError::UnterminatedRow { row: blocks.len() });
    }
    if blocks.len() != usize::from(height) {
        return Err(SaveError::RowCount {
            expected: height,
            actual: blocks.len(),
        });
    }

    let mut cells: Array2<Cell> = Array2::default((width, height).to_nd_index());
    for (y, block) in blocks.into_iter().enumerate() {
        let body = block
            .strip_suffix(';')
            .ok_or_else(|| SaveError::MalformedCell(block.to_owned()))?;
        let tokens: Vec<&str> = body.split(';').collect();
        if tokens.len() != usize::from(width) {
            return Err(SaveError::ColumnCount {
                row: y,
                expected: width,
                actual: tokens.len(),
            });
        }
        for (x, token) in tokens.into_iter().enumerate() {
            cells[[x, y]] = cell(token)?;
        }
    }

    Ok(Game::from_parts(id, status, bombs_num, Board::from_cells(cells)))
}

fn number<T: FromStr>(token: Option<&str>, field: &'static str) -> core::result::Result<T, SaveError> {
    let token = token.ok_or(SaveError::MissingField(field))?;
    token.parse().map_err(|_| SaveError::InvalidNumber {
        field,
        value: token.to_owned(),
    })
}

fn cell(token: &str) -> core::result::Result<Cell, SaveError> {
    let malformed = || SaveError::MalformedCell(token.to_owned());

    let (state, is_bomb) = token.split_once(',').ok_or_else(malformed)?;
    let state: u8 = state.parse().map_err(|_| malformed())?;
    let state = CellState::from_code(state).ok_or(SaveError::UnknownCellState(state))?;
    let is_bomb = match is_bomb {
        "0" => false,
        "1" => true,
        _ => return Err(malformed()),
    };

    Ok(Cell::new(state, is_bomb))
}

impl Game {
    pub fn to_save(&self) -> String {
        save(self)
    }

    pub fn from_save(save: &str) -> core::result::Result<Self, SaveError> {
        load(save)
    }
}
