use netplot_core::{DatasetConfig, PlotConfig, PreparedGraph, load_and_prepare};
use netplot_render::svg::{SvgRenderOptions, render_svg, tooltip_text};
use netplot_render::{Renderer, SvgRenderer, layout_graph};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixture() -> (PreparedGraph, PlotConfig) {
    let dir = workspace_root().join("fixtures").join("small");
    let cfg = PlotConfig {
        dataset: DatasetConfig {
            nodes: dir.join("nodes.csv").to_string_lossy().to_string(),
            edges: dir.join("edges.csv").to_string_lossy().to_string(),
        },
        ..Default::default()
    };
    let graph = load_and_prepare(&cfg).expect("prepare fixture");
    (graph, cfg)
}

#[test]
fn one_glyph_per_row() {
    let (graph, cfg) = fixture();
    let svg = SvgRenderer::default().render(&graph, &cfg).expect("render");
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert_eq!(svg.matches("<circle ").count(), graph.node_count());
    assert_eq!(svg.matches("<line ").count(), graph.edge_count());
    assert!(svg.contains(r#"data-start="0" data-end="1""#));
    assert!(svg.contains(r#"stroke-opacity="0.5""#));
}

#[test]
fn text_is_escaped() {
    let (graph, cfg) = fixture();
    let svg = SvgRenderer::default().render(&graph, &cfg).expect("render");
    assert!(svg.contains("Name: Delta &amp; Sons &lt;Org&gt;"));
    assert!(!svg.contains("<Org>"));
}

#[test]
fn stretched_canvas_uses_relative_size() {
    let (graph, cfg) = fixture();
    let layout = layout_graph(&graph, &cfg).expect("layout");
    let svg = render_svg(&layout, &SvgRenderOptions::default());
    assert!(svg.contains(r#"width="100%" height="100%""#));
    assert!(svg.contains(r#"viewBox="0 0 1000 700""#));
}

#[test]
fn fixed_canvas_and_arrows() {
    let (graph, mut cfg) = fixture();
    cfg.canvas.width = Some(960.0);
    cfg.canvas.height = Some(800.0);
    cfg.style.directed = true;
    let layout = layout_graph(&graph, &cfg).expect("layout");
    let svg = render_svg(
        &layout,
        &SvgRenderOptions {
            diagram_id: "donations".to_string(),
            include_title: false,
            include_tooltips: false,
        },
    );
    assert!(svg.contains(r#"<svg id="donations""#));
    assert!(svg.contains(r#"width="960" height="800""#));
    assert!(svg.contains(r#"<marker id="donations-arrow""#));
    assert_eq!(
        svg.matches(r#"marker-end="url(#donations-arrow)""#).count(),
        graph.edge_count()
    );
    assert!(!svg.contains("plot-title\" x="));
    assert!(!svg.contains("</title></circle>"));
}

#[test]
fn tooltip_text_joins_rows() {
    let (graph, cfg) = fixture();
    let layout = layout_graph(&graph, &cfg).expect("layout");
    let hub = layout.nodes.iter().find(|n| n.id == "n2").expect("n2");
    assert_eq!(
        tooltip_text(&hub.tooltip),
        "Name: City Police Department\nCategory: LEOs\nState: IL"
    );
}
