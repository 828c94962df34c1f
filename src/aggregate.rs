use std::collections::HashMap;

use crate::models::{Comment, TaskRow};
use crate::state::TaskState;

/// A task with every author that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub headline: String,
    pub state: TaskState,
    pub owners: Vec<String>,
    pub comments: Vec<Comment>,
}

/// Collapses the per-author rows returned by the API into one task per
/// headline.
///
/// Tasks come out in the order their headline first appears, and owners in the
/// order they first appear for that headline. State and comments are taken
/// from the first row of each headline; later rows only contribute owners.
pub fn aggregate<I>(rows: I) -> Vec<Task>
where
    I: IntoIterator<Item = TaskRow>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut tasks: Vec<Task> = Vec::new();

    for row in rows {
        let existing = slots.get(&row.headline).copied();
        let slot = match existing {
            Some(slot) => slot,
            None => {
                slots.insert(row.headline.clone(), tasks.len());
                tasks.push(Task {
                    headline: row.headline,
                    state: row.state,
                    owners: Vec::new(),
                    comments: row.comments,
                });
                tasks.len() - 1
            }
        };

        let owners = &mut tasks[slot].owners;
        if !owners.contains(&row.author) {
            owners.push(row.author);
        }
    }

    tasks
}
