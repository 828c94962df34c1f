use askama::Template;
use poem::{
    handler,
    web::{Data, Html, Query},
};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::config::OrgSettings;
use crate::error::ViewError;
use crate::models::PersonId;
use crate::org_tree::{build_tree, build_tree_from_root, OrgTree, OrgTreeError};
use crate::views::utils::render;
use crate::{get_context_for, BaseContext};

const INDENT_PX: usize = 28;

#[derive(Debug, Deserialize)]
pub struct OrgChartParams {
    root: Option<PersonId>,
    focus: Option<PersonId>,
}

struct ChartRow {
    id: PersonId,
    name: String,
    depth: usize,
    reports: usize,
    focused: bool,
}

impl ChartRow {
    fn indent(&self) -> usize {
        self.depth * INDENT_PX
    }
}

#[derive(Template)]
#[template(path = "org_chart.html")]
struct OrgChartContext<'a> {
    base: BaseContext<'a>,
    rows: Vec<ChartRow>,
    people: usize,
    levels: usize,
    notices: Vec<String>,
}

struct LoadedTree {
    tree: OrgTree,
    unplaced: usize,
}

#[handler]
pub async fn org_chart(
    Data(api): Data<&ApiClient>,
    Data(settings): Data<&OrgSettings>,
    Query(params): Query<OrgChartParams>,
) -> Result<Html<String>, ViewError> {
    let root_id = params.root.unwrap_or(settings.root_id);

    let mut ctx = OrgChartContext {
        base: get_context_for("org_chart"),
        rows: Vec::new(),
        people: 0,
        levels: 0,
        notices: Vec::new(),
    };

    match load_tree(api, settings, root_id).await? {
        Ok(LoadedTree { tree, unplaced }) => {
            if unplaced > 0 {
                ctx.notices.push(format!(
                    "{} people returned by the API do not report into this chart.",
                    unplaced
                ));
            }
            if let Some(focus) = params.focus {
                if tree.find(focus).is_none() {
                    ctx.notices
                        .push(format!("Person {} is not part of this chart.", focus));
                }
            }
            ctx.people = tree.node_count();
            ctx.levels = tree.depth() + 1;
            ctx.rows = chart_rows(&tree, params.focus);
        }
        Err(err) => {
            tracing::warn!(%root_id, %err, "cannot draw org chart");
            ctx.notices.push(match err {
                OrgTreeError::RootNotFound(_) => format!("No person with id {} was found.", root_id),
                OrgTreeError::Cyclic(_) => format!("The reporting lines are inconsistent: {}.", err),
            });
        }
    }

    render(&ctx)
}

/// Fetches the root person and its subordinates and assembles the tree.
///
/// The outer error is a failed fetch; the inner one means the data came back
/// but doesn't form a drawable tree. `unplaced` counts fetched rows that don't
/// connect to the root, which happens when the level range skips a level.
async fn load_tree(
    api: &ApiClient,
    settings: &OrgSettings,
    root_id: PersonId,
) -> Result<Result<LoadedTree, OrgTreeError>, ViewError> {
    let root = match api.author(root_id).await? {
        Some(root) => root,
        None => return Ok(Err(OrgTreeError::RootNotFound(root_id))),
    };
    let rows = api
        .subordinates(&root.person.name, settings.start_level, settings.end_level)
        .await?;
    let fetched = rows.len();

    let root_listed = rows.iter().any(|row| row.id == root_id);
    let tree = if root_listed {
        build_tree(rows, root_id)
    } else {
        build_tree_from_root(root.person, rows)
    };

    Ok(tree.map(|tree| {
        let placed = if root_listed {
            tree.node_count()
        } else {
            tree.node_count() - 1
        };
        let unplaced = fetched.saturating_sub(placed);
        tracing::debug!(
            root = %tree.root().person.name,
            fetched,
            unplaced,
            "built org tree"
        );
        LoadedTree { tree, unplaced }
    }))
}

fn chart_rows(tree: &OrgTree, focus: Option<PersonId>) -> Vec<ChartRow> {
    tree.walk()
        .into_iter()
        .map(|(depth, node)| ChartRow {
            id: node.person.id,
            name: node.person.name.clone(),
            depth,
            reports: node.children.len(),
            focused: Some(node.person.id) == focus,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_support::{mock_upstream, org_upstream, spawn_upstream};
    use crate::views::tests::{app_for, get};
    use poem::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn renders_tree_below_the_configured_root() {
        let app = app_for(&spawn_upstream(mock_upstream()).await);

        let (status, body) = get(&app, "/org-chart").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("class=\"org-node").count(), 4);
        assert!(body.contains("4 people across 3 levels"));

        let root = body.find("Jonny Jones").unwrap();
        let emily = body.find("Emily Hynes").unwrap();
        let steven = body.find("Steven Butt").unwrap();
        let ada = body.find("Ada Byron").unwrap();
        assert!(root < emily && emily < steven && steven < ada);
        assert!(body.contains("margin-left: 56px"));
        assert!(!body.contains("class=\"notice\""));
    }

    #[tokio::test]
    async fn duplicated_person_renders_cycle_notice() {
        let upstream = org_upstream(json!([
            {"id": 2, "boss_id": 1, "name": "Emily Hynes"},
            {"id": 3, "boss_id": 2, "name": "Steven Butt"},
            {"id": 2, "boss_id": 3, "name": "Emily Hynes"},
        ]));
        let app = app_for(&spawn_upstream(upstream).await);

        let (status, body) = get(&app, "/org-chart").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(
            "The reporting lines are inconsistent: person 2 was reached twice, the org structure is cyclic."
        ));
        assert!(!body.contains("class=\"org-node"));
    }

    #[tokio::test]
    async fn rows_detached_from_the_root_are_noted() {
        // Levels 2 and below only: nobody reports to the root directly.
        let upstream = org_upstream(json!([
            {"id": 3, "boss_id": 2, "name": "Steven Butt"},
            {"id": 4, "boss_id": 2, "name": "Ada Byron"},
        ]));
        let app = app_for(&spawn_upstream(upstream).await);

        let (status, body) = get(&app, "/org-chart").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("2 people returned by the API do not report into this chart."));
        assert_eq!(body.matches("class=\"org-node").count(), 1);
    }

    #[tokio::test]
    async fn unknown_root_renders_placeholder() {
        let app = app_for(&spawn_upstream(mock_upstream()).await);

        let (status, body) = get(&app, "/org-chart?root=99").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No person with id 99 was found."));
        assert!(!body.contains("class=\"org-node"));
    }

    #[tokio::test]
    async fn focus_outside_the_tree_is_noted() {
        let app = app_for(&spawn_upstream(mock_upstream()).await);

        let (_, body) = get(&app, "/org-chart?focus=3").await;
        assert!(body.contains("org-node focused"));

        let (_, body) = get(&app, "/org-chart?focus=42").await;
        assert!(body.contains("Person 42 is not part of this chart."));
    }
}
