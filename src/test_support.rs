//! Local stand-in for the remote view API.

use poem::{
    endpoint::make_sync,
    get,
    listener::{Acceptor, Listener, TcpListener},
    web::Json,
    Route, Server,
};
use serde_json::{json, Value};

pub fn respond(body: Value) -> impl poem::Endpoint {
    get(make_sync(move |_| Json(body.clone())))
}

/// Serves `route` on a free local port and returns the API base URL.
pub async fn spawn_upstream(route: Route) -> String {
    let acceptor = TcpListener::bind("127.0.0.1:0")
        .into_acceptor()
        .await
        .unwrap();
    let port = acceptor
        .local_addr()
        .into_iter()
        .find_map(|addr| addr.0.as_socket_addr().map(|addr| addr.port()))
        .unwrap();
    tokio::spawn(Server::new_with_acceptor(acceptor).run(route));

    format!("http://127.0.0.1:{}/view", port)
}

/// Upstream whose root author (id 1) has the given subordinate rows.
pub fn org_upstream(subordinates: Value) -> Route {
    Route::new()
        .at("/view/subordinates", respond(subordinates))
        .at(
            "/view/author/1",
            respond(json!({"id": 1, "boss_id": null, "name": "Jonny Jones"})),
        )
}

pub fn mock_upstream() -> Route {
    Route::new()
        .at(
            "/view/tasks",
            respond(json!([
                {"Headline": "meeting prep", "State": "new", "Author": "Jonny Jones",
                 "comments": [{"author": "Steven Butt", "content": "agenda is shared"}]},
                {"Headline": "meeting prep", "State": "new", "Author": "Emily Hynes"},
                {"Headline": "quarterly report", "State": "DELAYED", "Author": "Emily Hynes"},
                {"Headline": "meeting prep", "State": "new", "Author": "Jonny Jones"},
            ])),
        )
        .at(
            "/view/subordinates",
            respond(json!([
                {"id": 2, "boss_id": 1, "name": "Emily Hynes", "age": 30, "height": 1.0},
                {"id": 3, "boss_id": 2, "name": "Steven Butt", "age": 22, "height": 1.7},
                {"id": 4, "boss_id": 2, "name": "Ada Byron", "age": 36, "height": 1.6},
            ])),
        )
        .at(
            "/view/author/1",
            respond(json!({
                "id": 1, "boss_id": null, "name": "Jonny Jones", "age": 45, "height": 1.85,
                "boss_name": null, "subordinates_count": 1
            })),
        )
        .at(
            "/view/author/1/tasks",
            respond(json!([
                {"headline": "meeting prep", "state": "inprogress",
                 "content": "lorem ipsum how the business makes money",
                 "date": "2026-01-07T09:00:00"},
            ])),
        )
        .at(
            "/view/author/1/comments",
            respond(json!([{"author": "Jonny Jones", "content": "looks good"}])),
        )
        .at(
            "/view/post",
            respond(json!([{"headline": "Welcome aboard", "content": "Hello team", "author": "Jonny Jones"}])),
        )
}
