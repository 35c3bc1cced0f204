use std::collections::BTreeSet;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Sorted, duplicate-free set of cells. A group starts as the closed
/// neighborhood of one clue, so it never holds more than eight cells.
pub type CellSet = SmallVec<[Coord2; 8]>;

/// Constraint "exactly `mines` of `cells` are mines".
///
/// Ordering is by cell list first, which gives group sets a canonical
/// iteration order independent of how they were built.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Group {
    pub cells: CellSet,
    pub mines: i16,
}

impl Group {
    pub fn new(cells: impl IntoIterator<Item = Coord2>, mines: i16) -> Self {
        let mut cells: CellSet = cells.into_iter().collect();
        cells.sort_unstable();
        cells.dedup();
        Self { cells, mines }
    }

    /// Every cell is safe.
    pub fn is_safe(&self) -> bool {
        self.mines == 0 && !self.cells.is_empty()
    }

    /// Every cell is a mine.
    pub fn is_all_mines(&self) -> bool {
        self.mines > 0 && self.cells.len() == self.mines as usize
    }

    fn without(&self, other: &Self) -> Self {
        Self {
            cells: difference(&self.cells, &other.cells),
            mines: self.mines - other.mines,
        }
    }
}

/// One group per opened clue that still touches closed cells.
///
/// Zeros take part too: after a cascade they never touch closed cells, but a
/// loaded board may hold a zero next to cells that were never opened.
pub fn build_groups(board: &Board) -> BTreeSet<Group> {
    let mut groups = BTreeSet::new();

    for clue in board.coords() {
        if !board[clue].is_opened() {
            continue;
        }

        let clue_mines = board.adjacent_bomb_count(clue);
        let group = Group::new(
            board.neighbors(clue).filter(|&pos| !board[pos].is_opened()),
            clue_mines.into(),
        );
        if !group.cells.is_empty() {
            groups.insert(group);
        }
    }

    groups
}

/// Applies the subset and overlap-split rules until neither fires.
///
/// Every rule application replaces a group by strictly smaller ones, so the
/// loop ends once the closed cells run out of ways to be split.
pub fn close(groups: BTreeSet<Group>) -> BTreeSet<Group> {
    let mut groups: Vec<Group> = groups.into_iter().collect();
    let mut pass = 0;

    loop {
        pass += 1;
        let mut changed = false;

        // groups only shrink within a pass, so partners found through the
        // starting cells are a superset of the real ones
        let mut by_cell: HashMap<Coord2, Vec<usize>> = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for &cell in &group.cells {
                by_cell.entry(cell).or_default().push(idx);
            }
        }

        for i in 0..groups.len() {
            let partners: BTreeSet<usize> = groups[i]
                .cells
                .iter()
                .filter_map(|cell| by_cell.get(cell))
                .flatten()
                .copied()
                .filter(|&j| j > i)
                .collect();

            for j in partners {
                changed |= reduce_pair(&mut groups, i, j);
            }
        }

        let deduped: BTreeSet<Group> = groups.into_iter().collect();
        log::trace!("closure pass {}: {} groups", pass, deduped.len());
        if !changed {
            return deduped;
        }
        groups = deduped.into_iter().collect();
    }
}

/// Tries both rules on groups `i` and `j`, returning whether anything changed.
fn reduce_pair(groups: &mut Vec<Group>, i: usize, j: usize) -> bool {
    let (a, b) = (&groups[i], &groups[j]);

    if a.cells != b.cells {
        if is_subset(&a.cells, &b.cells) {
            groups[j] = b.without(a);
            return true;
        }
        if is_subset(&b.cells, &a.cells) {
            groups[i] = a.without(b);
            return true;
        }
    }

    if a == b {
        return false;
    }

    let shared = intersection(&a.cells, &b.cells);
    if shared.is_empty() {
        return false;
    }

    let (small, large) = if a.mines > b.mines { (j, i) } else { (i, j) };
    let (small_group, large_group) = (&groups[small], &groups[large]);
    let outside = (small_group.cells.len() - shared.len()) as i16;

    // only the case where the intersection carries all of the larger
    // group's mines
    if small_group.mines - outside != large_group.mines {
        return false;
    }

    let rest = Group {
        cells: difference(&large_group.cells, &shared),
        mines: 0,
    };
    groups[large] = Group {
        cells: shared,
        mines: large_group.mines,
    };
    groups.push(rest);
    true
}

fn is_subset(small: &[Coord2], large: &[Coord2]) -> bool {
    let mut large = large.iter();
    small
        .iter()
        .all(|cell| large.by_ref().any(|other| other == cell))
}

fn intersection(a: &[Coord2], b: &[Coord2]) -> CellSet {
    a.iter().filter(|cell| b.binary_search(cell).is_ok()).copied().collect()
}

fn difference(a: &[Coord2], b: &[Coord2]) -> CellSet {
    a.iter().filter(|cell| b.binary_search(cell).is_err()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(size: Coord2, bombs: &[Coord2], open: &[Coord2]) -> Board {
        let mut board = Board::from_bomb_coords(size, bombs).unwrap();
        for &coords in open {
            board.cell_mut(coords).state = CellState::Opened;
        }
        board
    }

    #[test]
    fn set_helpers_work_on_sorted_cells() {
        let a = [(0, 0), (1, 0)];
        let b = [(0, 0), (1, 0), (2, 0)];
        assert!(is_subset(&a, &b));
        assert!(!is_subset(&b, &a));
        assert!(!is_subset(&[(0, 1)], &b));
        assert_eq!(intersection(&a, &[(1, 0), (3, 0)]).as_slice(), &[(1, 0)]);
        assert_eq!(difference(&b, &a).as_slice(), &[(2, 0)]);
    }

    #[test]
    fn builds_one_group_per_numbered_clue() {
        // . 1 ?
        let board = opened((3, 1), &[(2, 0)], &[(0, 0), (1, 0)]);
        let groups = build_groups(&board);
        assert_eq!(groups.len(), 1);
        let group = groups.first().unwrap();
        assert_eq!(group.cells.as_slice(), &[(2, 0)]);
        assert_eq!(group.mines, 1);
    }

    #[test]
    fn zero_clue_next_to_closed_cells_is_a_group() {
        let board = opened((3, 1), &[], &[(1, 0)]);
        let groups = build_groups(&board);
        assert_eq!(groups, BTreeSet::from([Group::new([(0, 0), (2, 0)], 0)]));
    }

    #[test]
    fn identical_groups_collapse() {
        // two clues seeing the same two closed cells
        let board = opened((2, 3), &[(0, 2)], &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        let groups = build_groups(&board);
        // (0,1) and (1,1) both see {(0,2), (1,2)} with one mine
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.first().unwrap().cells.as_slice(), &[(0, 2), (1, 2)]);
    }

    #[test]
    fn subset_rule_subtracts() {
        let groups = BTreeSet::from([
            Group::new([(0, 0), (1, 0)], 1),
            Group::new([(0, 0), (1, 0), (2, 0)], 2),
        ]);
        let closed = close(groups);
        assert!(closed.contains(&Group::new([(2, 0)], 1)));
        assert!(closed.contains(&Group::new([(0, 0), (1, 0)], 1)));
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn subset_rule_chains_to_fixed_point() {
        let groups = BTreeSet::from([
            Group::new([(0, 0)], 0),
            Group::new([(0, 0), (1, 0)], 1),
            Group::new([(0, 0), (1, 0), (2, 0)], 1),
        ]);
        let closed = close(groups);
        assert!(closed.contains(&Group::new([(0, 0)], 0)));
        assert!(closed.contains(&Group::new([(1, 0)], 1)));
        assert!(closed.contains(&Group::new([(2, 0)], 0)));
    }

    #[test]
    fn disjoint_groups_are_left_alone() {
        let groups = BTreeSet::from([Group::new([(0, 0), (1, 0)], 1), Group::new([(5, 5)], 1)]);
        assert_eq!(close(groups.clone()), groups);
    }

    #[test]
    fn partial_overlap_outside_the_narrow_case_is_kept() {
        let groups = BTreeSet::from([
            Group::new([(0, 0), (1, 0)], 1),
            Group::new([(1, 0), (2, 0), (3, 0)], 2),
        ]);
        assert_eq!(close(groups.clone()), groups);
    }

    #[test]
    fn contradictory_equal_sets_do_not_loop() {
        let groups = BTreeSet::from([Group::new([(0, 0), (1, 0)], 1), Group::new([(0, 0), (1, 0)], 2)]);
        assert_eq!(close(groups.clone()), groups);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let members = [
            Group::new([(0, 1), (1, 1), (2, 1)], 1),
            Group::new([(1, 1), (2, 1)], 1),
            Group::new([(2, 1), (3, 1), (4, 1)], 2),
            Group::new([(3, 1), (4, 1)], 1),
        ];
        let forward = close(members.iter().cloned().collect());
        let backward = close(members.iter().rev().cloned().collect());
        assert_eq!(forward, backward);
        assert!(forward.contains(&Group::new([(0, 1)], 0)));
        assert!(forward.contains(&Group::new([(2, 1)], 1)));
    }

    #[test]
    fn group_predicates() {
        assert!(Group::new([(0, 0)], 0).is_safe());
        assert!(!Group::new(Vec::<Coord2>::new(), 0).is_safe());
        assert!(Group::new([(0, 0), (1, 0)], 2).is_all_mines());
        assert!(!Group::new([(0, 0), (1, 0)], 1).is_all_mines());
    }
}
