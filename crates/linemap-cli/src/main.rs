use linemap::graphlib::Path;
use linemap::{BuilderOptions, LineMap, Point, Precision, Segment, point};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Linemap(linemap::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Linemap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<linemap::Error> for CliError {
    fn from(value: linemap::Error) -> Self {
        Self::Linemap(value)
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
    Normalize,
    Graph,
    Path,
    Reach,
}

/// `x,y` on the command line.
#[derive(Debug, Clone, Copy)]
struct Coord(Point);

impl FromStr for Coord {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').ok_or(())?;
        let x = x.trim().parse::<f64>().map_err(|_| ())?;
        let y = y.trim().parse::<f64>().map_err(|_| ())?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(());
        }
        Ok(Self(point(x, y)))
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    precision: Option<Precision>,
    from: Option<Coord>,
    to: Option<Coord>,
    pretty: bool,
    verbose: bool,
}

#[derive(Serialize)]
struct NormalizeOut<'a> {
    segments: &'a [Segment],
    splits: usize,
}

#[derive(Serialize)]
struct NodeOut {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct EdgeOut {
    from: [f64; 2],
    to: [f64; 2],
    weight: f64,
}

#[derive(Serialize)]
struct GraphOut {
    nodes: Vec<NodeOut>,
    edges: Vec<EdgeOut>,
}

#[derive(Serialize)]
struct PathOut {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
    points: Vec<[f64; 2]>,
}

impl From<Option<Path>> for PathOut {
    fn from(path: Option<Path>) -> Self {
        match path {
            Some(path) => Self {
                found: true,
                cost: Some(path.cost),
                points: path.points.iter().map(|p| [p.x, p.y]).collect(),
            },
            None => Self {
                found: false,
                cost: None,
                points: Vec::new(),
            },
        }
    }
}

fn usage() -> &'static str {
    "linemap-cli\n\
\n\
USAGE:\n\
  linemap-cli [normalize] [--config <file.json>] [--epsilon <e>] [--pretty] [--verbose] [<path>|-]\n\
  linemap-cli graph [--config <file.json>] [--epsilon <e>] [--pretty] [--verbose] [<path>|-]\n\
  linemap-cli path --from <x,y> --to <x,y> [--config <file.json>] [--epsilon <e>] [--pretty] [<path>|-]\n\
  linemap-cli reach --from <x,y> --to <x,y> [--config <file.json>] [--epsilon <e>] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON array of {\"id\"?, \"x1\", \"y1\", \"x2\", \"y2\"}; missing ids are generated.\n\
  - normalize prints the crossing-free segment list and the number of splits.\n\
  - path runs A* by length, reach runs breadth-first search by hop count.\n\
  - --epsilon overrides the precision from --config.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "normalize" => args.command = Command::Normalize,
            "graph" => args.command = Command::Graph,
            "path" => args.command = Command::Path,
            "reach" => args.command = Command::Reach,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--epsilon" => {
                let Some(e) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let e = e.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                args.precision =
                    Some(Precision::new(e).map_err(|_| CliError::Usage(usage()))?);
            }
            "--from" => {
                let Some(c) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.from = Some(c.parse::<Coord>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--to" => {
                let Some(c) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.to = Some(c.parse::<Coord>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Path | Command::Reach)
        && (args.from.is_none() || args.to.is_none())
    {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_options(args: &Args) -> Result<BuilderOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<BuilderOptions>(&std::fs::read_to_string(path)?)?,
        None => BuilderOptions::default(),
    };
    if let Some(precision) = args.precision {
        options = options.with_precision(precision);
    }
    options.validate()?;
    Ok(options)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let options = load_options(&args)?;
    let text = read_input(args.input.as_deref())?;
    let segments: Vec<Segment> = serde_json::from_str(&text)?;
    tracing::debug!(segments = segments.len(), command = ?args.command, "input loaded");

    let map = LineMap::with_segments(options, segments)?;

    match args.command {
        Command::Normalize => {
            let network = map.network();
            let out = NormalizeOut {
                segments: network.segments(),
                splits: network.split_count(),
            };
            write_json(&out, args.pretty)
        }
        Command::Graph => {
            let graph = map.graph();
            let out = GraphOut {
                nodes: graph
                    .nodes()
                    .map(|n| NodeOut {
                        x: n.point.x,
                        y: n.point.y,
                    })
                    .collect(),
                edges: graph
                    .all_edges()
                    .filter_map(|e| {
                        let from = graph.node(e.from)?.point;
                        let to = graph.node(e.to)?.point;
                        Some(EdgeOut {
                            from: [from.x, from.y],
                            to: [to.x, to.y],
                            weight: e.weight,
                        })
                    })
                    .collect(),
            };
            write_json(&out, args.pretty)
        }
        Command::Path | Command::Reach => {
            let (Some(Coord(from)), Some(Coord(to))) = (args.from, args.to) else {
                return Err(CliError::Usage(usage()));
            };
            let path = if args.command == Command::Path {
                map.shortest_path_between(from, to)
            } else {
                map.reachable_between(from, to)
            };
            write_json(&PathOut::from(path), args.pretty)
        }
    }
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

    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
