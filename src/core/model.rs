//! Flow data model
//!
//! Flow, Task and Subtask records as exported by the operations console.
//! The report pipeline only reads these; it never fetches or mutates them.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

/// Record identifier.
///
/// Ids travel as text or as JSON numbers but are ordered numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it parses as a number
    pub fn numeric(&self) -> Option<f64> {
        self.0
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| !n.is_nan())
    }

    /// Ordering used for tasks and subtasks.
    ///
    /// Numeric ids compare by value; non-numeric ids sort after all numeric
    /// ones and compare lexically among themselves.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Id(s),
            Raw::Int(n) => Id(n.to_string()),
            Raw::Float(n) => Id(n.to_string()),
        })
    }
}

/// Status shared by flows, tasks and subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Created,
    Running,
    Waiting,
    Finished,
    Failed,
    /// Any status this build does not know about
    Unknown,
}

impl Status {
    /// Glyph shown in front of headings and TOC entries.
    ///
    /// Anchors are derived from the glyph-prefixed text, so changing a glyph
    /// changes every generated link.
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Created | Status::Unknown => "📝",
            Status::Running => "⚡",
            Status::Waiting => "⏳",
            Status::Finished => "✅",
            Status::Failed => "❌",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(Status::Created),
            "running" => Ok(Status::Running),
            "waiting" => Ok(Status::Waiting),
            "finished" => Ok(Status::Finished),
            "failed" => Ok(Status::Failed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // null, numbers and unrecognized names all map to Unknown
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Value::String(name)) => name.parse().unwrap_or(Status::Unknown),
            _ => Status::Unknown,
        })
    }
}

/// Top-level automation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Status,
}

/// Unit of work inside a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Status,

    /// Markdown authored upstream; headings get re-leveled on compile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Markdown inserted verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

/// Step inside a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Input document read by the CLI: an optional flow plus its tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl FlowReport {
    /// Parse a flow report from JSON.
    ///
    /// Accepts either `{ "flow": ..., "tasks": [...] }` or a bare task array.
    pub fn from_json(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).context("Invalid flow report JSON")?;
        if value.is_array() {
            let tasks: Vec<Task> = serde_json::from_value(value).context("Invalid task list")?;
            Ok(FlowReport { flow: None, tasks })
        } else {
            serde_json::from_value(value).context("Invalid flow report")
        }
    }

    /// Read and parse a flow report file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read flow report: {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse {:?}", path))
    }
}

/// Shallow copy of `items` sorted by ascending numeric id
pub fn sorted_by_id<T>(items: &[T], id: impl Fn(&T) -> &Id) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| id(a).sort_cmp(id(b)));
    sorted
}
