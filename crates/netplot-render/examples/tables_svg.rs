use netplot_core::{DatasetConfig, PlotConfig, load_and_prepare};
use netplot_render::layout_graph;
use netplot_render::svg::{SvgRenderOptions, render_svg};

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(nodes), Some(edges)) = (args.next(), args.next()) else {
        eprintln!("usage: tables_svg <nodes.csv> <edges.csv>");
        std::process::exit(2);
    };

    let config = PlotConfig {
        dataset: DatasetConfig { nodes, edges },
        ..Default::default()
    };
    let graph = load_and_prepare(&config).expect("prepare tables");
    let layout = layout_graph(&graph, &config).expect("layout ok");
    let svg = render_svg(&layout, &SvgRenderOptions::default());

    print!("{svg}");
}
