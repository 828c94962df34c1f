//! Wire shapes returned by the API.
//!
//! The serde attributes below are the only place where wire field names are
//! mapped onto our field names. The task endpoint capitalizes its columns
//! (`Headline`, `State`, `Author`) while the others don't, so both spellings
//! are accepted.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::state::TaskState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// One row per (task, author) pair.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskRow {
    #[serde(
        rename = "Headline",
        alias = "headline",
        default,
        deserialize_with = "null_as_default"
    )]
    pub headline: String,
    #[serde(rename = "State", alias = "state", default)]
    pub state: TaskState,
    #[serde(
        rename = "Author",
        alias = "author",
        default,
        deserialize_with = "null_as_default"
    )]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonRow {
    pub id: PersonId,
    #[serde(default)]
    pub boss_id: Option<PersonId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthorDetails {
    #[serde(flatten)]
    pub person: PersonRow,
    #[serde(default)]
    pub boss_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subordinates_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorTask {
    #[serde(alias = "Headline", default, deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(alias = "State", default)]
    pub state: TaskState,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default, deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
