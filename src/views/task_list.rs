use askama::Template;
use itertools::Itertools;
use poem::{
    handler,
    web::{Data, Html},
};

use crate::aggregate::{aggregate, Task};
use crate::api::ApiClient;
use crate::error::ViewError;
use crate::views::utils::render;
use crate::{get_context_for, BaseContext};

#[derive(Debug, PartialEq)]
struct StateCount {
    label: String,
    color: &'static str,
    count: usize,
}

#[derive(Template)]
#[template(path = "tasks.html")]
struct TaskListContext<'a> {
    base: BaseContext<'a>,
    tasks: Vec<Task>,
    summary: Vec<StateCount>,
}

#[handler]
pub async fn task_list(Data(api): Data<&ApiClient>) -> Result<Html<String>, ViewError> {
    let rows = api.tasks().await?;
    let row_count = rows.len();
    let tasks = aggregate(rows);
    tracing::debug!(rows = row_count, tasks = tasks.len(), "grouped task rows");

    render(&TaskListContext {
        base: get_context_for("tasks"),
        summary: summarize(&tasks),
        tasks,
    })
}

fn summarize(tasks: &[Task]) -> Vec<StateCount> {
    tasks
        .iter()
        .map(|task| (task.state.rank(), task.state.label(), task.state.color()))
        .sorted()
        .group_by(|key| key.clone())
        .into_iter()
        .map(|((_, label, color), group)| StateCount {
            label: label.into_owned(),
            color,
            count: group.count(),
        })
        .collect()
}
