//! Driver configuration.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;
use serde::de;
use thiserror::Error;
use tracing::info;

use crate::Coord;
use crate::writer::Format;

/// What to build and where to write it. Every key is optional; missing keys fall back to the
/// built-in sample (a 16x16 grid with four points).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Side length of the grid. Must be a power of two.
    pub width: Coord,

    /// Points to insert, in order
    #[serde(deserialize_with = "deserialize_points")]
    pub points: Vec<[Coord; 2]>,

    /// Output file. `-` writes to stdout. Defaults to `mxquadtree.<format extension>`.
    pub output: Option<PathBuf>,

    pub format: Format,

    /// Pretty print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 16,
            points: vec![[3, 4], [10, 10], [12, 14], [5, 8]],
            output: None,
            format: Format::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;

        info!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Where the document goes. Without an explicit `output`, the file is named after the
    /// format.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => PathBuf::from(format!("mxquadtree.{}", self.format.extension())),
        }
    }
}

/// Points are written as `[x, y]`. Anything but exactly two coordinates is rejected.
fn deserialize_points<'de, D>(deserializer: D) -> Result<Vec<[Coord; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Vec<Coord>> = Vec::deserialize(deserializer)?;

    raw.into_iter()
        .map(|p| match p[..] {
            [x, y] => Ok([x, y]),
            _ => Err(de::Error::invalid_length(p.len(), &"a point `[x, y]`")),
        })
        .collect()
}

/// Parse a point given as `x,y`. Whitespace around either coordinate is ignored.
pub fn parse_point(s: &str) -> Result<[Coord; 2], String> {
    let Some((x, y)) = s.split_once(',') else {
        return Err(format!("expected `x,y`, got \"{s}\""));
    };

    let x = x.trim().parse().map_err(|e| format!("bad x coordinate: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y coordinate: {e}"))?;

    Ok([x, y])
}
