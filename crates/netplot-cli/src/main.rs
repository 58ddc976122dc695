mod serve;

use netplot::config::set_dotted;
use netplot::render::{HeadlessError, HeadlessRenderer, RenderError, RenderFormat, render_json};
use netplot::{PlotConfig, PreparedGraph};
use serde_json::{Map, Value};
use std::io::Write;
use std::net::SocketAddr;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) const DEFAULT_ADDR: &str = "127.0.0.1:5006";
const DEFAULT_LOG_FILTER: &str =
    "warn,netplot=info,netplot_core=info,netplot_render=info,netplot_cli=info";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Netplot(HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Netplot(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Netplot(value)
    }
}

impl From<netplot::Error> for CliError {
    fn from(value: netplot::Error) -> Self {
        Self::Netplot(value.into())
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Netplot(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Prepare,
    Serve,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    config_path: Option<String>,
    /// Dotted config paths set from flags; applied over the config file.
    overrides: Vec<(&'static str, Value)>,
    format: RenderFormat,
    out: Option<String>,
    addr: Option<String>,
    pretty: bool,
}

fn usage() -> String {
    format!(
        "netplot-cli\n\
\n\
USAGE:\n\
  netplot-cli prepare [--config <json>] [--nodes <src>] [--edges <src>] [--pretty]\n\
  netplot-cli render [--format html|svg|json] [--out <path>|-] [--title <t>] [--width <px> --height <px>] [--fixed-size <px>] [--directed] [--color-nodes] [--no-reposition] [--config <json>] [--nodes <src>] [--edges <src>] [--pretty]\n\
  netplot-cli serve [--addr <host:port>] [--title <t>] [--width <px> --height <px>] [--fixed-size <px>] [--directed] [--color-nodes] [--no-reposition] [--config <json>] [--nodes <src>] [--edges <src>]\n\
\n\
NOTES:\n\
  - <src> is an http(s) URL or a local CSV path; the defaults fetch the published tables.\n\
  - render writes ./app.<format> by default; '--out -' writes to stdout.\n\
  - prepare prints the derived tables as column-oriented JSON.\n\
  - serve listens on {DEFAULT_ADDR} by default; Ctrl-C stops it.\n\
  - RUST_LOG controls log filtering (logs go to stderr).\n"
    )
}

fn usage_err() -> CliError {
    CliError::Usage(usage())
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_seen = false;

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = || it.next().cloned().ok_or_else(usage_err);
        match a.as_str() {
            "--help" | "-h" => return Err(usage_err()),
            "prepare" | "render" | "serve" if !command_seen => {
                command_seen = true;
                args.command = match a.as_str() {
                    "prepare" => Command::Prepare,
                    "serve" => Command::Serve,
                    _ => Command::Render,
                };
            }
            "--config" => args.config_path = Some(value()?),
            "--nodes" => args.overrides.push(("dataset.nodes", Value::String(value()?))),
            "--edges" => args.overrides.push(("dataset.edges", Value::String(value()?))),
            "--title" => args.overrides.push(("title", Value::String(value()?))),
            "--width" => args.overrides.push(("canvas.width", parse_px(&value()?)?)),
            "--height" => args.overrides.push(("canvas.height", parse_px(&value()?)?)),
            "--fixed-size" => {
                let px = parse_px(&value()?)?;
                args.overrides.push(("style.sizing", Value::from("fixed")));
                args.overrides.push(("style.fixed_node_size", px));
            }
            "--directed" => args.overrides.push(("style.directed", Value::Bool(true))),
            "--color-nodes" => args.overrides.push(("style.color_nodes", Value::Bool(true))),
            "--no-reposition" => args.overrides.push(("derive.reposition", Value::Bool(false))),
            "--format" => {
                args.format = value()?
                    .parse::<RenderFormat>()
                    .map_err(|e| CliError::Usage(format!("{e}\n\n{}", usage())))?;
            }
            "--out" => args.out = Some(value()?),
            "--addr" => args.addr = Some(value()?),
            "--pretty" => args.pretty = true,
            _ => return Err(usage_err()),
        }
    }

    let has = |key: &str| args.overrides.iter().any(|(k, _)| *k == key);
    if has("canvas.width") != has("canvas.height") {
        return Err(CliError::Usage(format!(
            "--width and --height must be given together\n\n{}",
            usage()
        )));
    }

    Ok(args)
}

fn parse_px(raw: &str) -> Result<Value, CliError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(Value::from(v)),
        _ => Err(CliError::Usage(format!(
            "expected a positive pixel size, got `{raw}`\n\n{}",
            usage()
        ))),
    }
}

/// Defaults, then the `--config` file, then flags.
fn build_config(args: &Args) -> Result<PlotConfig, CliError> {
    let mut overrides = match args.config_path.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| netplot::Error::Io {
                path: path.to_string(),
                source,
            })?;
            PlotConfig::parse_overrides(&text).map_err(|err| match err {
                netplot::Error::InvalidConfig { message } => netplot::Error::InvalidConfig {
                    message: format!("{path}: {message}"),
                },
                other => other,
            })?
        }
        None => Value::Object(Map::new()),
    };
    for (path, value) in &args.overrides {
        set_dotted(&mut overrides, path, value.clone());
    }
    Ok(PlotConfig::from_overrides(&overrides)?)
}

fn write_text(text: &str, out: &str) -> Result<(), CliError> {
    if out == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(out, text)?;
        tracing::info!(path = out, bytes = text.len(), "wrote document");
    }
    Ok(())
}

fn prepared_json(graph: &PreparedGraph, pretty: bool) -> Result<String, CliError> {
    let value = render_json(graph)?;
    let mut text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    text.push('\n');
    Ok(text)
}

fn run(args: Args) -> Result<(), CliError> {
    let config = build_config(&args)?;

    match args.command {
        Command::Prepare => {
            let graph = netplot::load_and_prepare(&config)?;
            write_text(&prepared_json(&graph, args.pretty)?, "-")
        }
        Command::Render => {
            let mut renderer = HeadlessRenderer::new(config, args.format);
            renderer.pretty_json = args.pretty;
            let doc = renderer.render()?;
            let out = args
                .out
                .clone()
                .unwrap_or_else(|| format!("app.{}", args.format.as_str()));
            write_text(&doc, &out)
        }
        Command::Serve => {
            let raw = args.addr.as_deref().unwrap_or(DEFAULT_ADDR);
            let addr: SocketAddr = raw.parse().map_err(|_| {
                CliError::Usage(format!("invalid --addr `{raw}` (expected host:port)"))
            })?;
            let panel = serve::Panel::build(config)?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(serve::serve(panel, addr))?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
