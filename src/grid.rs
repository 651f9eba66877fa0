use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use itertools::Itertools;
use thiserror::Error;

pub const STARTING_MARKER: char = 'A';
pub const ENDING_MARKER: char = 'B';
pub const OPEN_MARKER: char = ' ';
pub const WALL_MARKER: char = 'X';

// visit bound for a cell no path has entered yet
const UNVISITED: usize = usize::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn step(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];

    pub fn code(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

pub type Path = Vec<Direction>;

pub fn path_code(path: &[Direction]) -> String {
    path.iter().map(|d| d.code()).collect()
}

/// What a reader observes at one grid location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Start,
    End,
    VisitedAt(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tile {
    Open,
    Wall,
    Start,
    End,
}

impl Tile {
    fn from_marker(ch: char) -> Option<Self> {
        match ch {
            OPEN_MARKER => Some(Tile::Open),
            WALL_MARKER => Some(Tile::Wall),
            STARTING_MARKER => Some(Tile::Start),
            ENDING_MARKER => Some(Tile::End),
            _ => None,
        }
    }

    fn marker(self) -> char {
        match self {
            Tile::Open => OPEN_MARKER,
            Tile::Wall => WALL_MARKER,
            Tile::Start => STARTING_MARKER,
            Tile::End => ENDING_MARKER,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("unknown marker {marker:?} at column {x}, row {y}")]
    UnknownMarker { marker: char, x: usize, y: usize },
    #[error("maze has no start marker")]
    MissingStart,
    #[error("maze has no end marker")]
    MissingEnd,
    #[error("maze has {0} start markers")]
    DuplicateStart(usize),
    #[error("maze has {0} end markers")]
    DuplicateEnd(usize),
    #[error("start marker at {0} does not match starting position {1}")]
    StartMismatch(Pos, Pos),
    #[error("starting position {0} is outside the maze")]
    StartOutOfBounds(Pos),
    #[error("starting position {0} is on a wall")]
    StartOnWall(Pos),
}

/// One maze, owned by a single solve. The tile layout never changes; the
/// per-cell visit bounds are atomics so concurrent branches share the grid
/// directly.
#[derive(Debug)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    bounds: Vec<Vec<AtomicUsize>>,
    start: Pos,
}

impl Grid {
    /// Rows from lines of text; the unique `A` marker is the start.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = text.lines().collect();
        let start = rows
            .iter()
            .enumerate()
            .find_map(|(y, row)| {
                row.chars()
                    .position(|ch| ch == STARTING_MARKER)
                    .map(|x| Pos { x: x as i32, y: y as i32 })
            })
            .ok_or(GridError::MissingStart)?;
        Self::from_rows(&rows, start)
    }

    /// Rows plus an explicit starting coordinate, the shape mazes arrive in
    /// over the wire. A start marker is optional here; the starting position
    /// may sit directly on the end cell (the solution is then empty).
    pub fn from_rows<S: AsRef<str>>(rows: &[S], start: Pos) -> Result<Self, GridError> {
        let mut tiles = Vec::with_capacity(rows.len());
        let mut starts = Vec::new();
        let mut ends = 0usize;
        for (y, row) in rows.iter().enumerate() {
            let mut cells = Vec::new();
            for (x, ch) in row.as_ref().chars().enumerate() {
                let tile =
                    Tile::from_marker(ch).ok_or(GridError::UnknownMarker { marker: ch, x, y })?;
                match tile {
                    Tile::Start => starts.push(Pos { x: x as i32, y: y as i32 }),
                    Tile::End => ends += 1,
                    _ => {}
                }
                cells.push(tile);
            }
            tiles.push(cells);
        }
        match ends {
            0 => return Err(GridError::MissingEnd),
            1 => {}
            n => return Err(GridError::DuplicateEnd(n)),
        }
        match starts.as_slice() {
            [] => {}
            [only] if *only == start => {}
            [only] => return Err(GridError::StartMismatch(*only, start)),
            many => return Err(GridError::DuplicateStart(many.len())),
        }
        let bounds = tiles
            .iter()
            .map(|row| row.iter().map(|_| AtomicUsize::new(UNVISITED)).collect())
            .collect();
        let grid = Self { tiles, bounds, start };
        match grid.tile(start) {
            None => Err(GridError::StartOutOfBounds(start)),
            Some(Tile::Wall) => Err(GridError::StartOnWall(start)),
            Some(_) => Ok(grid),
        }
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    fn tile(&self, pos: Pos) -> Option<Tile> {
        if pos.y < 0 || pos.y as usize >= self.tiles.len() {
            return None;
        }
        let row = &self.tiles[pos.y as usize];
        if pos.x < 0 || pos.x as usize >= row.len() {
            return None;
        }
        Some(row[pos.x as usize])
    }

    fn bound_slot(&self, pos: Pos) -> Option<&AtomicUsize> {
        self.tile(pos)?;
        Some(&self.bounds[pos.y as usize][pos.x as usize])
    }

    /// `None` means the position is off the grid: rows may differ in length,
    /// and a column beyond a row's actual length is out of bounds, not a wall.
    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        let tile = self.tile(pos)?;
        let cell = match tile {
            Tile::Wall => Cell::Wall,
            Tile::End => Cell::End,
            Tile::Open | Tile::Start => {
                match self.bounds[pos.y as usize][pos.x as usize].load(Ordering::Acquire) {
                    UNVISITED if tile == Tile::Start => Cell::Start,
                    UNVISITED => Cell::Open,
                    n => Cell::VisitedAt(n),
                }
            }
        };
        Some(cell)
    }

    /// Record a visit of length `len`. Bounds only ever narrow: a longer
    /// visit never widens an already-recorded one.
    pub fn mark(&self, pos: Pos, len: usize) {
        if let Some(slot) = self.bound_slot(pos) {
            slot.fetch_min(len, Ordering::AcqRel);
        }
    }

    /// Check-and-mark in one atomic step: succeeds only when `len` is
    /// strictly below the cell's current visit bound, committing `len` as the
    /// new bound. Concurrent branches racing for the same cell see a
    /// consistent winner.
    pub fn try_enter(&self, pos: Pos, len: usize) -> bool {
        match self.bound_slot(pos) {
            Some(slot) => slot.fetch_min(len, Ordering::AcqRel) > len,
            None => false,
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self
            .tiles
            .iter()
            .map(|row| row.iter().map(|t| t.marker()).collect::<String>())
            .join("\n");
        write!(f, "{}", s)
    }
}
