use askama::Template;
use poem::{
    handler,
    web::{Data, Html, Path},
};

use crate::api::ApiClient;
use crate::error::ViewError;
use crate::models::{AuthorDetails, AuthorTask, Comment, PersonId, Post};
use crate::views::utils::render;
use crate::{get_context_for, BaseContext};

#[derive(Template)]
#[template(path = "user.html")]
struct UserContext<'a> {
    base: BaseContext<'a>,
    author: AuthorDetails,
    tasks: Vec<AuthorTask>,
    comments: Vec<Comment>,
    posts: Vec<Post>,
}

impl UserContext<'_> {
    fn boss_name(&self) -> &str {
        self.author.boss_name.as_deref().unwrap_or("None")
    }

    fn age(&self) -> String {
        self.author
            .person
            .age
            .map(|age| age.to_string())
            .unwrap_or_else(|| "-".into())
    }

    fn height(&self) -> String {
        self.author
            .person
            .height
            .map(|height| format!("{:.2}m", height))
            .unwrap_or_else(|| "-".into())
    }
}

#[handler]
pub async fn user_details(
    Data(api): Data<&ApiClient>,
    Path(id): Path<PersonId>,
) -> Result<Html<String>, ViewError> {
    let author = api.author(id).await?.ok_or(ViewError::AuthorNotFound(id))?;
    let (tasks, comments, posts) = tokio::try_join!(
        api.author_tasks(id),
        api.author_comments(id),
        api.posts(&author.person.name),
    )?;
    tracing::debug!(
        %id,
        tasks = tasks.len(),
        comments = comments.len(),
        posts = posts.len(),
        "loaded user details"
    );

    render(&UserContext {
        base: get_context_for("user"),
        author,
        tasks,
        comments,
        posts,
    })
}
