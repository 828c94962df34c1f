use askama::Template;
use poem::{error::ResponseError, web::Html, IntoResponse, Response};

use crate::error::ViewError;
use crate::{get_context_for, BaseContext};

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorContext<'a> {
    base: BaseContext<'a>,
    status: u16,
    message: String,
}

pub fn render<T: Template>(tpl: &T) -> Result<Html<String>, ViewError> {
    Ok(Html(tpl.render()?))
}

/// Page shown for any `ViewError` that escapes a handler.
pub fn error_page(err: &ViewError) -> Response {
    let status = err.status();
    let tpl = ErrorContext {
        base: get_context_for("error"),
        status: status.as_u16(),
        message: err.to_string(),
    };
    let body = tpl.render().unwrap_or_else(|_| err.to_string());

    Html(body).with_status(status).into_response()
}
