use netplot_core::{PlotConfig, PreparedGraph, prepare_from_csv};
use netplot_render::html::{HtmlRenderOptions, render_html};
use netplot_render::{HtmlRenderer, Renderer, layout_graph};

const NODES: &str = "\
id,name,pretty_category,lcc,x,y
a,</script><b>,Havens,1,0,0
b,Beta,LEOs,1,10,10
c,Gamma,LEOs,0,5,5
";

const EDGES: &str = "\
source,target,amount
a,b,5
c,b,7
";

fn graph(cfg: &PlotConfig) -> PreparedGraph {
    prepare_from_csv(NODES, EDGES, &cfg.derive).expect("prepare")
}

#[test]
fn document_embeds_svg_and_panel_data() {
    let cfg = PlotConfig::default();
    let html = HtmlRenderer::default()
        .render(&graph(&cfg), &cfg)
        .expect("render");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Police Foundation Donations</title>"));
    assert!(html.contains(r#"<div id="netplot-root" class="netplot-root stretch">"#));
    assert_eq!(html.matches("<circle ").count(), 3);
    assert_eq!(html.matches("<line ").count(), 2);
    assert!(html.contains(r#"<script type="application/json" id="netplot-data">"#));
    assert!(html.contains(r#"<script data-plot="netplot">"#));
    assert!(html.contains(r#"data-action="reset""#));
    assert!(html.contains(r#"data-action="save""#));
    assert!(html.contains("netplot-tooltip"));
}

#[test]
fn panel_data_carries_tooltips_and_links() {
    let cfg = PlotConfig::default();
    let layout = layout_graph(&graph(&cfg), &cfg).expect("layout");
    let html = render_html(&layout, &HtmlRenderOptions::default()).expect("render");

    let start = html
        .find(r#"id="netplot-data">"#)
        .expect("data block")
        + r#"id="netplot-data">"#.len();
    let end = start + html[start..].find("</script>").expect("data end");
    let data: serde_json::Value = serde_json::from_str(&html[start..end]).expect("json");

    assert_eq!(data["viewBox"], serde_json::json!([0.0, 0.0, 1000.0, 700.0]));
    assert_eq!(data["nodes"][1]["linked_edges"], serde_json::json!([0, 1]));
    assert_eq!(data["nodes"][0]["tooltip"][0]["value"], "</script><b>");
    assert_eq!(data["edges"][1]["tooltip"][0]["value"], "7");
    assert_eq!(data["highlight"]["edge_stroke"], "black");
    assert_eq!(data["edge_alpha"], 0.5);
    assert_eq!(data["file_stem"], "netplot");
}

#[test]
fn script_terminators_in_data_are_escaped() {
    let cfg = PlotConfig::default();
    let html = HtmlRenderer::default()
        .render(&graph(&cfg), &cfg)
        .expect("render");
    // Only the data block and the panel script close.
    assert_eq!(html.matches("</script>").count(), 2);
    assert!(html.contains(r#"<\/script><b>"#));
}

#[test]
fn panel_does_not_double_tooltips() {
    let cfg = PlotConfig::default();
    let html = HtmlRenderer::default()
        .render(&graph(&cfg), &cfg)
        .expect("render");
    assert!(!html.contains("</title></circle>"));
    assert!(!html.contains("</title></line>"));
}

#[test]
fn fixed_canvas_sizes_the_root() {
    let mut cfg = PlotConfig::default();
    cfg.canvas.width = Some(640.0);
    cfg.canvas.height = Some(480.0);
    let layout = layout_graph(&graph(&cfg), &cfg).expect("layout");
    let html = render_html(
        &layout,
        &HtmlRenderOptions {
            include_toolbar: false,
            ..Default::default()
        },
    )
    .expect("render");
    assert!(html.contains(r#"class="netplot-root" style="width:640px;height:480px""#));
    assert!(!html.contains("netplot-toolbar\""));
}
