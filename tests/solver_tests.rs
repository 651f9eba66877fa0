use mazer::client::MazeDescription;
use mazer::grid::{path_code, Cell, Direction, GridError, Pos};
use mazer::{Grid, Solver};
use pretty_assertions::assert_eq;

// Walk the reported moves over a fresh, unmutated grid: every step must stay
// on passable cells and the walk must finish exactly on the end cell.
fn replay(grid: &Grid, path: &[Direction]) {
    let mut pos = grid.start();
    for (i, dir) in path.iter().enumerate() {
        pos = pos.step(*dir);
        match grid.cell_at(pos) {
            Some(Cell::Open | Cell::Start | Cell::End) => {}
            other => panic!("move {i} ({dir}) lands on {other:?} at {pos}"),
        }
    }
    assert_eq!(grid.cell_at(pos), Some(Cell::End), "walk must finish on the end cell");
}

#[test]
fn adjacent_start_and_end_take_one_move() {
    let solver = Solver::solve(Grid::parse("AB").unwrap());
    assert_eq!(path_code(solver.shortest_solution().unwrap()), "E");

    let solver = Solver::solve(Grid::parse("A\nB").unwrap());
    assert_eq!(path_code(solver.shortest_solution().unwrap()), "S");
}

#[test]
fn walled_off_end_reports_no_solution() {
    let solver = Solver::solve(Grid::parse("A X B").unwrap());
    assert!(solver.shortest_solution().is_none());
    assert!(solver.solutions().is_empty());
}

#[test]
fn competing_routes_resolve_to_the_minimum() {
    // direct route east is 2 moves; the detour through the lower row is 4
    let text = "A B\n   ";
    let solver = Solver::solve(Grid::parse(text).unwrap());
    let shortest = solver.shortest_solution().unwrap();
    assert_eq!(shortest.len(), 2);
    replay(&Grid::parse(text).unwrap(), shortest);
}

#[test]
fn dogleg_around_two_walls_takes_four_moves() {
    // equal-length routes exist, so assert only length and replay validity
    let text = "A X\n  X\nX B";
    let solver = Solver::solve(Grid::parse(text).unwrap());
    let shortest = solver.shortest_solution().unwrap();
    assert_eq!(shortest.len(), 4);
    replay(&Grid::parse(text).unwrap(), shortest);
}

#[test]
fn start_on_end_cell_yields_empty_path() {
    let rows = ["B"];
    let solver = Solver::solve(Grid::from_rows(&rows, Pos { x: 0, y: 0 }).unwrap());
    let shortest = solver.shortest_solution().expect("a zero-move solution exists");
    assert_eq!(path_code(shortest), "");
}

#[test]
fn open_lattice_full_of_cycles_terminates() {
    let text = "A    \n     \n     \n     \n    B";
    let solver = Solver::solve(Grid::parse(text).unwrap());
    let shortest = solver.shortest_solution().unwrap();
    assert_eq!(shortest.len(), 8);
    replay(&Grid::parse(text).unwrap(), shortest);
}

#[test]
fn repeated_fresh_solves_agree_on_length() {
    let text = "A X\n  X\nX B";
    let first = Solver::solve(Grid::parse(text).unwrap());
    let second = Solver::solve(Grid::parse(text).unwrap());
    assert_eq!(
        first.shortest_solution().unwrap().len(),
        second.shortest_solution().unwrap().len()
    );
}

#[test]
fn malformed_grids_fail_at_construction() {
    assert_eq!(Grid::parse("A  ").unwrap_err(), GridError::MissingEnd);
    assert_eq!(Grid::parse("AA B").unwrap_err(), GridError::DuplicateStart(2));
    assert_eq!(Grid::parse("AB B").unwrap_err(), GridError::DuplicateEnd(2));
    assert_eq!(
        Grid::parse("A?B").unwrap_err(),
        GridError::UnknownMarker { marker: '?', x: 1, y: 0 }
    );
    assert_eq!(Grid::parse("   ").unwrap_err(), GridError::MissingStart);

    let rows = ["X B"];
    assert_eq!(
        Grid::from_rows(&rows, Pos { x: 0, y: 0 }).unwrap_err(),
        GridError::StartOnWall(Pos { x: 0, y: 0 })
    );
    assert_eq!(
        Grid::from_rows(&rows, Pos { x: 5, y: 0 }).unwrap_err(),
        GridError::StartOutOfBounds(Pos { x: 5, y: 0 })
    );

    let rows = ["A B"];
    assert_eq!(
        Grid::from_rows(&rows, Pos { x: 2, y: 0 }).unwrap_err(),
        GridError::StartMismatch(Pos { x: 0, y: 0 }, Pos { x: 2, y: 0 })
    );
}

#[test]
fn maze_description_decodes_and_solves() {
    let json = r#"{
        "name": "Maze #1 (3x3)",
        "mazePath": "/mazebot/race/abc",
        "startingPosition": [0, 0],
        "endingPosition": [2, 2],
        "map": [["A", " ", "X"], [" ", " ", "X"], ["X", " ", "B"]]
    }"#;
    let maze: MazeDescription = serde_json::from_str(json).unwrap();
    let solver = Solver::solve(maze.to_grid().unwrap());
    assert_eq!(solver.shortest_solution().unwrap().len(), 4);
}

#[test]
fn maze_description_accepts_string_rows() {
    let json = r#"{"startingPosition": [0, 0], "map": ["A B"]}"#;
    let maze: MazeDescription = serde_json::from_str(json).unwrap();
    let solver = Solver::solve(maze.to_grid().unwrap());
    assert_eq!(path_code(solver.shortest_solution().unwrap()), "EE");
}
