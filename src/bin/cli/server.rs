use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use libris_clean::{config::Config, types::record::CanonicalRecord};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

const INDEX_PAGE: &str = include_str!("../../../templates/index.html");

pub struct TheStateOfAffairs {
    config: Config,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ApiResponse {
    response: CanonicalRecord,
}

/// Any failure while handling `/api/:libris_id`, reported as a bare 500.
struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}

pub fn router(config: Config, client: reqwest::Client) -> Router {
    let state = Arc::new(TheStateOfAffairs { config, client });

    // Only the API is cross-origin; errors carry the header as well.
    let cors = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api/:libris_id", get(api))
        .route_layer(cors)
        .route("/", get(index))
        .with_state(state)
}

pub async fn start(config: Config, client: reqwest::Client) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = router(config, client);
    info!("Listening on {addr}.");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn api(
    Path(libris_id): Path<String>,
    State(state): State<Arc<TheStateOfAffairs>>,
) -> Result<Json<ApiResponse>, AppError> {
    info!("Received {}.", libris_id);
    let record =
        crate::libris::create_by_libris_id(&libris_id, &state.client, &state.config).await?;
    info!("Handling of {} complete.", libris_id);
    Ok(Json(ApiResponse { response: record }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, HeaderMap, Request};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    fn unreachable_upstream() -> Config {
        Config {
            edition_url: "http://127.0.0.1:9/bib/{}".into(),
            graph_url: "http://127.0.0.1:9/{}/data.jsonld".into(),
            timeout_secs: Some(5),
            ..Config::default()
        }
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn serve(app: Router) -> SocketAddr {
        let server = axum::Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0)))
            .serve(app.into_make_service());
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }

    async fn stub_edition(Path(libris_id): Path<String>, headers: HeaderMap) -> Response {
        if headers.get(header::ACCEPT).and_then(|x| x.to_str().ok()) != Some("application/json") {
            return StatusCode::NOT_ACCEPTABLE.into_response();
        }
        match libris_id.as_str() {
            "12345" => Json(json!({ "@id": "https://libris.kb.se/resource/bib/abc123" }))
                .into_response(),
            "orphan" => Json(json!({ "@id": "https://libris.kb.se/resource/bib/gone" }))
                .into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn stub_graph(Path(segment): Path<String>) -> Response {
        if segment != "abc123" {
            return StatusCode::NOT_FOUND.into_response();
        }
        Json(json!({
            "@graph": [
                { "@id": "https://libris.kb.se/abc123", "@type": "Record" },
                {
                    "@type": "Print",
                    "instanceOf": {
                        "language": [{ "@id": "https://id.kb.se/language/swe" }],
                        "contribution": [{
                            "@type": "PrimaryContribution",
                            "agent": { "@type": "Person", "givenName": "Astrid", "familyName": "Lindgren" },
                        }],
                    },
                    "hasTitle": [{ "@type": "Title", "mainTitle": ["Pippi Långstrump"] }],
                    "extent": [{ "label": ["166 s."] }],
                },
            ]
        }))
        .into_response()
    }

    fn stub_upstream() -> Config {
        let addr = serve(
            Router::new()
                .route("/bib/:libris_id", get(stub_edition))
                .route("/:segment/data.jsonld", get(stub_graph)),
        );
        Config {
            edition_url: format!("http://{addr}/bib/{{}}"),
            graph_url: format!("http://{addr}/{{}}/data.jsonld"),
            timeout_secs: Some(5),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn index_page() {
        let config = unreachable_upstream();
        let client = local_client();
        let resp = router(config, client)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_500_with_cors() {
        let config = unreachable_upstream();
        let client = local_client();
        let resp = router(config, client)
            .oneshot(
                Request::builder()
                    .uri("/api/12345")
                    .header(header::ORIGIN, "https://example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let config = unreachable_upstream();
        let client = local_client();
        let resp = router(config, client)
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_wraps_record_in_response() {
        let config = stub_upstream();
        let client = local_client();
        let addr = serve(router(config, client.clone()));

        let resp = client
            .get(format!("http://{addr}/api/12345"))
            .header(reqwest::header::ORIGIN, "https://example.org")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(
            resp.headers()[reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "response": {
                    "libris_id": "12345",
                    "libris_uri": "abc123",
                    "language": "https://id.kb.se/language/swe",
                    "title": { "mainTitle": "Pippi Långstrump", "subtitle": null },
                    "publication": null,
                    "contributors": [{ "role": "author", "person": "Astrid Lindgren" }],
                    "isbn": null,
                    "pages": "166",
                }
            })
        );
    }

    #[tokio::test]
    async fn upstream_error_status_is_500() {
        let config = stub_upstream();
        let client = local_client();
        let addr = serve(router(config, client.clone()));

        for libris_id in ["unknown", "orphan"] {
            let resp = client
                .get(format!("http://{addr}/api/{libris_id}"))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[tokio::test]
    async fn fetcher_follows_resolved_uri() {
        let config = stub_upstream();
        let client = local_client();
        let edition = crate::libris::fetch_edition("12345", &client, &config)
            .await
            .unwrap();
        assert_eq!(edition.uri_segment(), "abc123");
        let graph = crate::libris::fetch_graph(edition.uri_segment(), &client, &config)
            .await
            .unwrap();
        assert_eq!(graph.graph.len(), 2);
        assert!(crate::libris::fetch_edition("unknown", &client, &config)
            .await
            .is_err());
    }
}
