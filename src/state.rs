use std::borrow::Cow;

use serde::Deserialize;

pub const DEFAULT_STATE_COLOR: &str = "#757575";

/// Lifecycle state of a task as reported by the API.
///
/// Parsing is case-insensitive and never fails: anything that isn't one of the
/// known states is kept, lowercased, in `Unknown` so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<String>")]
pub enum TaskState {
    New,
    InProgress,
    Finished,
    Delayed,
    Canceled,
    Unknown(String),
}

impl TaskState {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "new" => Self::New,
            "inprogress" | "in_progress" | "in progress" => Self::InProgress,
            "finished" => Self::Finished,
            "delayed" => Self::Delayed,
            "canceled" => Self::Canceled,
            _ => Self::Unknown(normalized),
        }
    }

    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::New => "New".into(),
            Self::InProgress => "Inprogress".into(),
            Self::Finished => "Finished".into(),
            Self::Delayed => "Delayed".into(),
            Self::Canceled => "Canceled".into(),
            Self::Unknown(raw) if raw.is_empty() => "Unknown".into(),
            Self::Unknown(raw) => capitalize(raw).into(),
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::New => "#2196f3",
            Self::InProgress => "#ff9800",
            Self::Finished => "#4caf50",
            Self::Delayed => "#f44336",
            Self::Canceled => "#9e9e9e",
            Self::Unknown(_) => DEFAULT_STATE_COLOR,
        }
    }

    /// Position of the state in summaries, active work first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::InProgress => 1,
            Self::Delayed => 2,
            Self::Finished => 3,
            Self::Canceled => 4,
            Self::Unknown(_) => 5,
        }
    }
}

impl Default for TaskState {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<Option<String>> for TaskState {
    fn from(raw: Option<String>) -> Self {
        raw.map(|raw| Self::parse(&raw)).unwrap_or_default()
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
