//! Local HTTP panel: the interactive document plus the prepared tables.

use crate::CliError;
use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use netplot::PlotConfig;
use netplot::render::{HeadlessRenderer, RenderFormat};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Rendered once at start-up and shared read-only by every handler.
#[derive(Debug)]
pub(crate) struct Panel {
    html: String,
    graph_json: String,
    nodes: usize,
    edges: usize,
}

impl Panel {
    pub(crate) fn build(config: PlotConfig) -> Result<Self, CliError> {
        let renderer = HeadlessRenderer::new(config, RenderFormat::Html);
        let graph = renderer.prepare()?;
        let html = renderer.render_graph(&graph)?;
        let graph_json = serde_json::to_string(&netplot::render::render_json(&graph)?)?;
        Ok(Self {
            html,
            graph_json,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
        })
    }
}

pub(crate) fn router(panel: Arc<Panel>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/graph.json", get(graph_json))
        .route("/health", get(health))
        .with_state(panel)
}

async fn index(State(panel): State<Arc<Panel>>) -> Html<String> {
    Html(panel.html.clone())
}

async fn graph_json(State(panel): State<Arc<Panel>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        panel.graph_json.clone(),
    )
}

async fn health(State(panel): State<Arc<Panel>>) -> axum::Json<Value> {
    axum::Json(json!({
        "status": "ok",
        "nodes": panel.nodes,
        "edges": panel.edges,
    }))
}

pub(crate) async fn serve(panel: Panel, addr: SocketAddr) -> Result<(), CliError> {
    let app = router(Arc::new(panel));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving panel");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            // A failed signal handler leaves the server running until killed.
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl-C, shutting down");
            }
        })
        .await?;

    info!("panel stopped");
    Ok(())
}
