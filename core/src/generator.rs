use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use crate::*;

pub trait BombPlacer {
    fn place(self, config: GameConfig) -> Board;
}

/// Uniformly random placement, optionally keeping one cell free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPlacement {
    seed: u64,
    safe: Option<Coord2>,
}

impl RandomPlacement {
    pub fn new(seed: u64, safe: Option<Coord2>) -> Self {
        Self { seed, safe }
    }
}

impl BombPlacer for RandomPlacement {
    fn place(self, config: GameConfig) -> Board {
        let (width, height) = config.size;
        let total_cells = usize::from(config.total_cells());
        let mut board = Board::empty(config.size);

        let safe = self.safe.and_then(|coords| board.validate_coords(coords));
        let safe_index = safe.map(|(x, y)| usize::from(y) * usize::from(width) + usize::from(x));
        let free_cells = total_cells - usize::from(safe_index.is_some());

        let mut bombs = usize::from(config.bombs);
        if bombs > free_cells {
            log::warn!(
                "Board cannot fit {} mines with {} free cells, placing {} instead",
                bombs,
                free_cells,
                free_cells
            );
            bombs = free_cells;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for mut i in index::sample(&mut rng, free_cells, bombs).into_iter() {
            // skip over the reserved cell so it can never be picked
            if safe_index.is_some_and(|safe_index| i >= safe_index) {
                i += 1;
            }
            let coords = ((i % usize::from(width)) as Coord, (i / usize::from(width)) as Coord);
            board.cell_mut(coords).is_bomb = true;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board (safe cell: {:?})",
            bombs,
            width,
            height,
            safe
        );
        board
    }
}
