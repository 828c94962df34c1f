mod aggregate;
mod api;
mod config;
mod error;
mod models;
mod org_tree;
mod state;
mod views;

#[cfg(test)]
mod test_support;

use anyhow::Result;

use poem::{
    endpoint::StaticFilesEndpoint, get, listener::TcpListener, middleware::Tracing, Endpoint,
    EndpointExt, Route, Server,
};

use crate::api::ApiClient;
use crate::config::{Config, OrgSettings};
use crate::error::ViewError;

pub struct BaseContext<'a> {
    pub cur_module: &'a str,
}

pub fn get_context_for(module_name: &str) -> BaseContext<'_> {
    BaseContext {
        cur_module: module_name,
    }
}

fn setup_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();
}

pub fn build_app(api: ApiClient, org: OrgSettings, static_dir: &str) -> impl Endpoint {
    Route::new()
        .at("/", get(views::home::index))
        .at("/tasks", get(views::task_list::task_list))
        .at("/org-chart", get(views::org_chart::org_chart))
        .at("/users/:id", get(views::user_details::user_details))
        .nest(
            "/static",
            StaticFilesEndpoint::new(static_dir).show_files_listing(),
        )
        .data(api)
        .data(org)
        .with(Tracing)
        .inspect_all_err(|err| {
            tracing::error!("{:?}", err);
        })
        .catch_error(|err: ViewError| async move { views::utils::error_page(&err) })
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let config = Config::from_env()?;
    let api = ApiClient::new(&config.api_base_url, config.request_timeout)?;

    tracing::info!(
        api = %config.api_base_url,
        listen = %config.listen_addr,
        root = %config.org.root_id,
        "starting orgview"
    );

    let app = build_app(api, config.org.clone(), &config.static_dir);
    Server::new(TcpListener::bind(config.listen_addr.clone()))
        .run(app)
        .await?;

    Ok(())
}
