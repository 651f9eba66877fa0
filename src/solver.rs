use std::sync::Mutex;

use itertools::Itertools;
use log::{debug, trace};
use rayon::Scope;

use crate::grid::{Cell, Direction, Grid, Path, Pos};

/// Exhaustive branch-and-prune traversal. Every admissible branch runs as a
/// task on the rayon pool; the grid's visit bounds cut branches that cannot
/// improve on a path already through their cell.
pub struct Solver {
    solutions: Vec<Path>,
}

impl Solver {
    /// Consumes the grid: traversal narrows its visit bounds in place, so it
    /// is spent once the solve returns.
    pub fn solve(grid: Grid) -> Self {
        let solutions = Mutex::new(Vec::new());
        rayon::scope(|scope| {
            explore(scope, &grid, grid.start(), Vec::new(), None, &solutions);
        });
        let solutions = solutions.into_inner().unwrap();
        debug!("traversal done: {} complete path(s)", solutions.len());
        Self { solutions }
    }

    /// Every start-to-end path the traversal completed, in no particular
    /// order (branch scheduling varies run to run).
    pub fn solutions(&self) -> &[Path] {
        &self.solutions
    }

    /// Shortest discovered path. Among equal-length solutions the winner is
    /// whichever was appended first, which is not deterministic.
    pub fn shortest_solution(&self) -> Option<&Path> {
        self.solutions
            .iter()
            .position_min_by_key(|p| p.len())
            .map(|i| &self.solutions[i])
    }
}

/// How one branch ended at the cell it stood on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchEnd {
    OffGrid,
    Wall,
    Pruned,
    Solution,
    Forked,
}

fn explore<'s>(
    scope: &Scope<'s>,
    grid: &'s Grid,
    pos: Pos,
    path: Path,
    came_from: Option<Pos>,
    solutions: &'s Mutex<Vec<Path>>,
) -> BranchEnd {
    let cell = match grid.cell_at(pos) {
        Some(cell) => cell,
        None => return BranchEnd::OffGrid,
    };
    match cell {
        Cell::End => {
            debug!("solution with {} move(s)", path.len());
            solutions.lock().unwrap().push(path);
            BranchEnd::Solution
        }
        Cell::Wall => BranchEnd::Wall,
        Cell::Open | Cell::Start | Cell::VisitedAt(_) => {
            // only a strictly shorter path may re-enter a visited cell; the
            // bound is committed before any neighbor is spawned
            if !grid.try_enter(pos, path.len()) {
                return BranchEnd::Pruned;
            }
            for dir in Direction::ALL {
                let next = pos.step(dir);
                // skip the immediate one-step backtrack; longer detours
                // through the previous cell stay legal and are left to the
                // visit-bound pruning
                if came_from == Some(next) {
                    continue;
                }
                let mut branch = path.clone();
                branch.push(dir);
                scope.spawn(move |scope| {
                    let ended = explore(scope, grid, next, branch, Some(pos), solutions);
                    trace!("branch at {next} ended: {ended:?}");
                });
            }
            BranchEnd::Forked
        }
    }
}
