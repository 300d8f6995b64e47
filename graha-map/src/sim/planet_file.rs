//! TOML description of a planet and its scripted mothership events.
//!
//! ```toml
//! name = "Hawkeye"
//!
//! [start]
//! x = 0
//! y = 0
//! direction = 0
//!
//! [[paths]]
//! start = { x = 0, y = 0, direction = 0 }
//! end = { x = 0, y = 1, direction = 180 }
//! weight = 1
//!
//! [[targets]]
//! after = 6
//! x = 0
//! y = 1
//! ```
//!
//! Scripted events fire once the mothership has received `after` client
//! messages. Drift entries make the rover report a wrong node on the given
//! arrival (1 = first drive).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Endpoint, Node, Weight};
use crate::error::{Error, Result};
use crate::planet::Planet;

/// Endpoint in flat form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointEntry {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl From<EndpointEntry> for Endpoint {
    fn from(entry: EndpointEntry) -> Self {
        Node::new(entry.x, entry.y).towards(entry.direction)
    }
}

impl From<Endpoint> for EndpointEntry {
    fn from(endpoint: Endpoint) -> Self {
        Self {
            x: endpoint.node.x,
            y: endpoint.node.y,
            direction: endpoint.direction,
        }
    }
}

/// One path of the planet; `weight = -1` puts an obstacle on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub start: EndpointEntry,
    pub end: EndpointEntry,
    pub weight: Weight,
}

/// Target assignment sent after `after` client messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedTarget {
    pub after: usize,
    pub x: i32,
    pub y: i32,
}

/// Path unveiled after `after` client messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedUnveil {
    pub after: usize,
    pub start: EndpointEntry,
    pub end: EndpointEntry,
    pub weight: Weight,
}

/// Forced direction answering the first selection after `after` client messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedOverride {
    pub after: usize,
    pub direction: Direction,
}

/// Wrong odometry node reported on arrival number `arrival`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftEntry {
    pub arrival: usize,
    pub x: i32,
    pub y: i32,
}

fn default_finish_on_target() -> bool {
    true
}

/// Planet description file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetFile {
    /// Planet name
    pub name: String,

    /// Send `done` when a target is reached.
    /// Default: true
    #[serde(default = "default_finish_on_target")]
    pub finish_on_target: bool,

    /// Start node and heading
    pub start: EndpointEntry,

    #[serde(default)]
    pub paths: Vec<PathEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<ScriptedTarget>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unveils: Vec<ScriptedUnveil>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ScriptedOverride>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drift: Vec<DriftEntry>,
}

impl PlanetFile {
    /// Load and validate a planet file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: PlanetFile =
            toml::from_str(contents).map_err(|e| Error::PlanetFile(e.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::PlanetFile(e.to_string()))
    }

    /// Write as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml_string()?)?;
        Ok(())
    }

    /// Describe a discovered planet, without scripted events.
    pub fn from_planet(name: impl Into<String>, start: Endpoint, planet: &Planet) -> Self {
        Self {
            name: name.into(),
            finish_on_target: true,
            start: start.into(),
            paths: planet
                .iter_paths()
                .map(|(start, end, weight)| PathEntry {
                    start: start.into(),
                    end: end.into(),
                    weight,
                })
                .collect(),
            targets: Vec::new(),
            unveils: Vec::new(),
            overrides: Vec::new(),
            drift: Vec::new(),
        }
    }

    /// Check names and weights.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::PlanetFile("planet name is empty".to_string()));
        }

        let weights = self
            .paths
            .iter()
            .map(|path| (path.start, path.weight))
            .chain(self.unveils.iter().map(|unveil| (unveil.start, unveil.weight)));
        for (start, weight) in weights {
            if weight == 0 || weight < -1 {
                return Err(Error::PlanetFile(format!(
                    "path from ({}, {}) has invalid weight {}",
                    start.x, start.y, weight
                )));
            }
        }
        Ok(())
    }

    /// Start endpoint.
    pub fn start_endpoint(&self) -> Endpoint {
        self.start.into()
    }

    /// The true planet.
    pub fn planet(&self) -> Planet {
        let mut planet = Planet::new();
        for path in &self.paths {
            planet.add_path(path.start.into(), path.end.into(), path.weight);
        }
        planet
    }
}
