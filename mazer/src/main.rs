//! Command-line maze solver.
//!
//! Reads a text maze, finds the shortest path from the start marker to the
//! finish marker with breadth-first search, and reports the step count.
//!
//! Run: cargo run -- mazer/data/maze.txt --print-maze

mod render;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use mazer_core::{Alphabet, Grid};
use mazer_paths::Pathfinder;

/// Find the shortest path through a text maze.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the maze file.
    maze_file: PathBuf,

    /// Print the maze with the found path marked.
    #[arg(long)]
    print_maze: bool,

    /// Character that blocks movement.
    #[arg(long, default_value_t = Alphabet::default().wall)]
    wall_char: char,

    /// Character for walkable cells.
    #[arg(long, default_value_t = Alphabet::default().free)]
    free_char: char,

    /// Character marking the start cell.
    #[arg(long, default_value_t = Alphabet::default().start)]
    start_char: char,

    /// Character marking the finish cell.
    #[arg(long, default_value_t = Alphabet::default().finish)]
    finish_char: char,
}

impl Args {
    fn alphabet(&self) -> Alphabet {
        Alphabet {
            wall: self.wall_char,
            free: self.free_char,
            start: self.start_char,
            finish: self.finish_char,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let alphabet = args.alphabet();

    let text = fs::read_to_string(&args.maze_file)
        .with_context(|| format!("reading {}", args.maze_file.display()))?;
    let rows: Vec<&str> = text.lines().collect();
    let mut grid = Grid::parse(&rows, &alphabet).context("parsing maze")?;

    let solution = Pathfinder::new(&mut grid).solve()?;

    println!("Solution:");
    println!("Total steps: {}", solution.steps);
    println!("method: {}", solution.method);
    if args.print_maze {
        print!("{}", render::render(&grid, &alphabet));
    }
    Ok(())
}
