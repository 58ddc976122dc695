use netplot_core::{DatasetConfig, PlotConfig, load_and_prepare};
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
fn fixture_graph_prepares_end_to_end() {
    let g = load_and_prepare(&fixture_config()).expect("prepare fixture");
    assert_eq!(g.node_count(), 6);
    assert_eq!(g.edge_count(), 6);

    let sheriff = g.node_by_id("n6").expect("n6");
    assert!(!sheriff.lcc);
    assert_eq!(sheriff.x, 160.0);
    assert_eq!(sheriff.state_abbrv.as_deref(), Some("TX"));

    let delta = g.node_by_id("n5").expect("n5");
    assert_eq!(delta.name, "Delta & Sons <Org>");
    assert_eq!(delta.state_abbrv, None);

    let hub = g.node_by_id("n2").expect("n2");
    assert_eq!(hub.degree, 3);
    assert_eq!(hub.node_size, 10.0);
}

#[test]
fn fixture_config_file_parses() {
    let text = std::fs::read_to_string(workspace_root().join("fixtures").join("config.json"))
        .expect("read config fixture");
    let cfg = PlotConfig::from_json_str(&text).expect("config");
    assert_eq!(cfg.title, "Fixture Donations");
    assert_eq!(cfg.canvas.width, Some(960.0));
    assert_eq!(cfg.style.palette.get("Unknown"), Some("#000000"));
    assert_eq!(cfg.style.palette.get("Havens"), Some("#F2BE57"));
}
