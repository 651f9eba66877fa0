pub mod client;
pub mod grid;
pub mod race;
pub mod solver;

pub use grid::{Cell, Direction, Grid, GridError, Path, Pos};
pub use solver::Solver;
