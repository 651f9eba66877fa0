use anyhow::{bail, Context, Result};
use log::info;

use crate::client::MazebotClient;
use crate::grid::path_code;
use crate::solver::Solver;

#[derive(Debug, Clone)]
pub struct RaceOutcome {
    pub message: String,
    pub certificate_url: Option<String>,
    pub mazes_solved: usize,
}

/// Race until the mazebot reports `finished`: fetch a maze, solve it, submit
/// the shortest path, move on to whatever it points at next.
pub fn run(client: &MazebotClient, login: &str) -> Result<RaceOutcome> {
    let start = client.start_race(login)?;
    let mut maze_path = start.next_maze;
    let mut solved = 0usize;
    loop {
        let maze = client.fetch_maze(&maze_path)?;
        let grid = maze.to_grid().with_context(|| format!("building grid for {maze_path}"))?;
        let solver = Solver::solve(grid);
        let shortest = solver
            .shortest_solution()
            .with_context(|| format!("{maze_path}: maze has no solution"))?;
        info!(
            "{}: submitting {} move(s)",
            maze.name.as_deref().unwrap_or(&maze_path),
            shortest.len()
        );
        let outcome = client.submit_solution(&maze_path, &path_code(shortest))?;
        match outcome.result.as_str() {
            "success" => {
                solved += 1;
                maze_path = outcome.next_maze.context("success response missing nextMaze")?;
            }
            "finished" => {
                solved += 1;
                return Ok(RaceOutcome {
                    message: outcome.message.unwrap_or_default(),
                    certificate_url: outcome.certificate.map(|c| client.absolute_url(&c)),
                    mazes_solved: solved,
                });
            }
            other => bail!(
                "mazebot rejected the solution ({other}): {}",
                outcome.message.unwrap_or_default()
            ),
        }
    }
}
