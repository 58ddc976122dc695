use netplot::render::{HeadlessError, HeadlessRenderer, RenderFormat, sanitize_svg_id};
use netplot::{DatasetConfig, Error, PlotConfig};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixture_config() -> PlotConfig {
    let dir = workspace_root().join("fixtures").join("small");
    PlotConfig {
        dataset: DatasetConfig {
            nodes: dir.join("nodes.csv").to_string_lossy().to_string(),
            edges: dir.join("edges.csv").to_string_lossy().to_string(),
        },
        ..Default::default()
    }
}

#[test]
fn renders_each_format() {
    let html = HeadlessRenderer::new(fixture_config(), RenderFormat::Html)
        .render()
        .expect("html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert_eq!(html.matches("<circle ").count(), 6);

    let svg = HeadlessRenderer::new(fixture_config(), RenderFormat::Svg)
        .render()
        .expect("svg");
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<line ").count(), 6);

    let json = HeadlessRenderer::new(fixture_config(), RenderFormat::Json)
        .render()
        .expect("json");
    let v: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(v["nodes"]["id"].as_array().map(Vec::len), Some(6));
}

#[test]
fn diagram_id_is_sanitized_into_both_writers() {
    let r = HeadlessRenderer::new(fixture_config(), RenderFormat::Svg).with_diagram_id("2024 plot!");
    assert_eq!(r.svg.diagram_id, "n-2024-plot");
    assert_eq!(r.html.svg.diagram_id, "n-2024-plot");
    let svg = r.render().expect("svg");
    assert!(svg.starts_with(r#"<svg id="n-2024-plot""#));
}

#[test]
fn sanitize_handles_degenerate_ids() {
    assert_eq!(sanitize_svg_id(""), "n-untitled");
    assert_eq!(sanitize_svg_id("  ---  "), "n-untitled");
    assert_eq!(sanitize_svg_id("donations"), "donations");
    assert_eq!(sanitize_svg_id("a b--c"), "a-b-c");
}

#[test]
fn render_to_path_writes_the_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("app.html");
    HeadlessRenderer::new(fixture_config(), RenderFormat::Html)
        .render_to_path(&out)
        .expect("write");
    let text = std::fs::read_to_string(&out).expect("read back");
    assert!(text.contains("</html>"));
}

#[test]
fn missing_table_surfaces_the_prepare_error() {
    let mut cfg = fixture_config();
    cfg.dataset.nodes = workspace_root()
        .join("fixtures")
        .join("no_such_nodes.csv")
        .to_string_lossy()
        .to_string();
    let err = HeadlessRenderer::new(cfg, RenderFormat::Html)
        .prepare()
        .unwrap_err();
    assert!(matches!(err, HeadlessError::Prepare(Error::Io { .. })), "{err}");
    assert!(err.to_string().contains("no_such_nodes.csv"));
}
