use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::blocking::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, GridError, Pos};

pub const DEFAULT_BASE_URL: &str = "https://api.noopschallenge.com";

#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    login: &'a str,
}

#[derive(Debug, Serialize)]
struct SolutionRequest<'a> {
    directions: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceStart {
    pub next_maze: String,
}

/// A maze as the mazebot hands it out. Some endpoints send map rows as
/// strings, others as arrays of one-character cells; both are accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeDescription {
    #[serde(default)]
    pub name: Option<String>,
    pub starting_position: [i32; 2],
    #[serde(default)]
    pub ending_position: Option<[i32; 2]>,
    pub map: Vec<MapRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MapRow {
    Text(String),
    Cells(Vec<String>),
}

impl MapRow {
    fn text(&self) -> String {
        match self {
            MapRow::Text(s) => s.clone(),
            MapRow::Cells(cells) => cells.concat(),
        }
    }
}

impl MazeDescription {
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        let rows: Vec<String> = self.map.iter().map(MapRow::text).collect();
        let [x, y] = self.starting_position;
        Grid::from_rows(&rows, Pos { x, y })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResult {
    pub result: String,
    #[serde(default)]
    pub next_maze: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub certificate: Option<String>,
    #[serde(default)]
    pub shortest_solution_length: Option<usize>,
    #[serde(default)]
    pub elapsed: Option<f64>,
}

pub struct MazebotClient {
    http: HttpClient,
    base_url: String,
}

impl MazebotClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder().build().context("building http client")?;
        Ok(Self { http, base_url: base_url.into() })
    }

    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn start_race(&self, login: &str) -> Result<RaceStart> {
        self.post("/mazebot/race/start", &StartRequest { login })
    }

    pub fn fetch_maze(&self, path: &str) -> Result<MazeDescription> {
        let url = self.absolute_url(path);
        info!("GET {path}");
        let response = self.http.get(&url).send().with_context(|| format!("GET {url}"))?;
        debug!("HTTP {}", response.status());
        response.json().with_context(|| format!("decoding maze from {path}"))
    }

    pub fn submit_solution(&self, path: &str, directions: &str) -> Result<SolveResult> {
        self.post(path, &SolutionRequest { directions })
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.absolute_url(path);
        info!("POST {path}");
        debug!("{}", serde_json::to_string_pretty(body).unwrap_or_default());
        let response =
            self.http.post(&url).json(body).send().with_context(|| format!("POST {url}"))?;
        debug!("HTTP {}", response.status());
        response.json().with_context(|| format!("decoding response from {path}"))
    }
}
