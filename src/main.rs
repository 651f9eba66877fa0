use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use mazer::client::{MazebotClient, DEFAULT_BASE_URL};
use mazer::grid::path_code;
use mazer::race;
use mazer::{Grid, Solver};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "mazer", version, about = "Concurrent maze solver with a mazebot race mode")]
struct Cli {
    /// Worker threads for branch exploration (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a maze read from a file and print the move sequence
    Solve {
        /// Path to a maze file (A start, B end, X wall, space open). If omitted, reads from stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Race the Noops Challenge mazebot until it hands out a certificate
    Race {
        /// Login name reported to the mazebot
        #[arg(short, long)]
        login: String,

        /// API base URL
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        url: String,
    },
}

fn read_maze(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn solve_one(input: &Option<PathBuf>) -> Result<()> {
    let text = read_maze(input)?;
    let grid = Grid::parse(&text).context("parse maze")?;
    println!("{grid}\n");
    let solver = Solver::solve(grid);
    let shortest = solver.shortest_solution().context("maze has no path from start to end")?;
    println!(
        "{} {} ({} moves, {} complete paths found)",
        "shortest:".green().bold(),
        path_code(shortest),
        shortest.len(),
        solver.solutions().len()
    );
    Ok(())
}

fn run_race(login: &str, url: &str) -> Result<()> {
    let client = MazebotClient::new(url)?;
    let outcome = race::run(&client, login)?;
    println!("{} {}", "finished:".green().bold(), outcome.message);
    println!("mazes solved: {}", outcome.mazes_solved);
    if let Some(cert) = outcome.certificate_url {
        println!("certificate: {}", cert.cyan());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("configuring worker pool")?;
    }
    match cli.command {
        Command::Solve { input } => solve_one(&input),
        Command::Race { login, url } => run_race(&login, &url),
    }
}
