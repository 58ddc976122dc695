use super::{EDGES_CSV, NODES_CSV};
use crate::source::*;
use crate::*;
use std::path::PathBuf;

#[test]
fn parses_node_rows_and_ignores_extra_columns() {
    let text = "id,x,y,lcc,category,pretty_category,state_abbrv,name,junk\n\
                7,1.5,-2,True,leo,LEOs,,Seven,x\n\
                8,0,0,0.0,haven,Havens,NY,Eight,y\n";
    let nodes = parse_nodes(text).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].id, "7");
    assert_eq!(nodes[0].x, 1.5);
    assert!(nodes[0].lcc);
    assert_eq!(nodes[0].state_abbrv, None);
    assert!(!nodes[1].lcc);
    assert_eq!(nodes[1].state_abbrv.as_deref(), Some("NY"));
}

#[test]
fn parses_edges_with_optional_columns_missing() {
    let edges = parse_edges("source,target,amount\na,b,12.5\n").unwrap();
    assert_eq!(edges[0].amount, 12.5);
    assert_eq!(edges[0].logamount, None);
    assert_eq!(edges[0].count, None);

    let edges = parse_edges(EDGES_CSV).unwrap();
    assert_eq!(edges.len(), 6);
    assert_eq!(edges[0].count, Some(2.0));
}

#[test]
fn malformed_rows_report_table_and_line() {
    let text = "id,x,y,lcc\na,1,2,1\nb,not-a-number,2,1\n";
    let err = parse_nodes(text).unwrap_err();
    let Error::Csv { table, line, .. } = err else {
        panic!("expected CSV error, got {err:?}");
    };
    assert_eq!(table, TableKind::Nodes);
    assert_eq!(line, 3);
}

#[test]
fn bad_lcc_flag_is_an_error() {
    let err = parse_nodes("id,x,y,lcc\na,1,2,maybe\n").unwrap_err();
    assert!(err.to_string().contains("invalid flag `maybe`"), "{err}");
}

#[test]
fn table_source_distinguishes_urls_from_paths() {
    assert!(TableSource::parse(DEFAULT_NODES_URL).is_remote());
    assert_eq!(
        TableSource::parse("data/nodes.csv"),
        TableSource::Path(PathBuf::from("data/nodes.csv"))
    );
    assert!(matches!(
        TableSource::parse("file:///tmp/nodes.csv"),
        TableSource::Path(_)
    ));
    assert!(matches!(
        TableSource::parse("C:\\data\\nodes.csv"),
        TableSource::Path(_)
    ));
}

#[test]
fn load_tables_reads_local_files() {
    let dir = tempfile::tempdir().unwrap();
    let nodes = dir.path().join("nodes.csv");
    let edges = dir.path().join("edges.csv");
    std::fs::write(&nodes, NODES_CSV).unwrap();
    std::fs::write(&edges, EDGES_CSV).unwrap();

    let dataset = DatasetConfig {
        nodes: nodes.to_string_lossy().to_string(),
        edges: edges.to_string_lossy().to_string(),
    };
    let raw = load_tables(&dataset).unwrap();
    assert_eq!(raw.nodes.len(), 6);
    assert_eq!(raw.edges.len(), 6);
}

/// Serves the inline tables on an ephemeral port; the runtime must outlive the requests.
fn serve_tables() -> (tokio::runtime::Runtime, String) {
    use axum::Router;
    use axum::routing::get;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let listener = runtime
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/nodes.csv", get(|| async { NODES_CSV }))
        .route("/edges.csv", get(|| async { EDGES_CSV }));
    runtime.spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (runtime, format!("http://{addr}"))
}

#[test]
fn load_tables_fetches_remote_tables() {
    let (_runtime, base) = serve_tables();
    let dataset = DatasetConfig {
        nodes: format!("{base}/nodes.csv"),
        edges: format!("{base}/edges.csv"),
    };
    let raw = load_tables(&dataset).unwrap();
    assert_eq!(raw.nodes.len(), 6);
    assert_eq!(raw.edges.len(), 6);
    assert_eq!(raw.nodes[1].name, "Bravo");
}

#[test]
fn non_success_status_is_reported_with_the_url() {
    let (_runtime, base) = serve_tables();
    let dataset = DatasetConfig {
        nodes: format!("{base}/nodes.csv"),
        edges: format!("{base}/missing.csv"),
    };
    match load_tables(&dataset).unwrap_err() {
        Error::HttpStatus { url, status } => {
            assert_eq!(status, 404);
            assert_eq!(url, format!("{base}/missing.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dataset = DatasetConfig {
        nodes: "/definitely/not/here/nodes.csv".to_string(),
        edges: "/definitely/not/here/edges.csv".to_string(),
    };
    assert!(matches!(load_tables(&dataset), Err(Error::Io { .. })));
}

#[test]
fn header_only_node_table_is_empty() {
    let err = prepare_from_csv("id,x,y,lcc\n", EDGES_CSV, &DeriveConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "node table has no rows");
}
