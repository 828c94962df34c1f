use askama::Template;
use poem::{handler, web::Html};

use crate::error::ViewError;
use crate::views::utils::render;
use crate::{get_context_for, BaseContext};

#[derive(Template)]
#[template(path = "index.html")]
struct HomeContext<'a> {
    base: BaseContext<'a>,
}

#[handler]
pub async fn index() -> Result<Html<String>, ViewError> {
    render(&HomeContext {
        base: get_context_for("index"),
    })
}
