use mazer::grid::{path_code, Cell, Pos};
use mazer::{Grid, Solver};
use pretty_assertions::assert_eq;

#[test]
fn parse_and_solve_straight_corridor() {
    let g = Grid::parse("A  B").unwrap();
    assert_eq!(g.start(), Pos { x: 0, y: 0 });
    let solver = Solver::solve(g);
    let shortest = solver.shortest_solution().expect("corridor has a path");
    assert_eq!(path_code(shortest), "EEE");
}

#[test]
fn display_round_trips_the_layout() {
    let text = "A X\n  X\nX B";
    let g = Grid::parse(text).unwrap();
    assert_eq!(g.to_string(), text);
}

#[test]
fn visit_bounds_only_narrow() {
    let g = Grid::parse("A  B").unwrap();
    let p = Pos { x: 1, y: 0 };
    assert_eq!(g.cell_at(p), Some(Cell::Open));

    g.mark(p, 5);
    assert_eq!(g.cell_at(p), Some(Cell::VisitedAt(5)));

    // equal-length re-entry is refused, strictly shorter is let through
    assert!(!g.try_enter(p, 5));
    assert!(g.try_enter(p, 3));
    assert_eq!(g.cell_at(p), Some(Cell::VisitedAt(3)));

    // a longer visit never widens an existing bound
    g.mark(p, 9);
    assert_eq!(g.cell_at(p), Some(Cell::VisitedAt(3)));
}

#[test]
fn off_grid_and_ragged_rows_are_out_of_bounds() {
    let g = Grid::parse("A  B\nXX").unwrap();
    assert_eq!(g.cell_at(Pos { x: -1, y: 0 }), None);
    assert_eq!(g.cell_at(Pos { x: 0, y: 2 }), None);
    // second row is shorter; columns past its end are off the grid, not walls
    assert_eq!(g.cell_at(Pos { x: 2, y: 1 }), None);
    assert_eq!(g.cell_at(Pos { x: 1, y: 1 }), Some(Cell::Wall));
}
