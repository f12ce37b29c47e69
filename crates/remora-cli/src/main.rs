use remora::geom::{point, rect};
use remora::{
    AlignPointIndex, Axis, BoundingBoxPoints, GuideLayer, GuideLine, Point, SnapConfig, Snapper,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Snap(remora::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Snap(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<remora::Error> for CliError {
    fn from(value: remora::Error) -> Self {
        Self::Snap(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Json,
    Svg,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    pretty: bool,
    format: OutputFormat,
    zoom: Option<f64>,
    out: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
struct PointDef {
    x: f64,
    y: f64,
}

impl From<PointDef> for Point {
    fn from(p: PointDef) -> Self {
        point(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RectDef {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RectDef> for remora::Rect {
    fn from(r: RectDef) -> Self {
        rect(r.x, r.y, r.width, r.height)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SelectionDef {
    Rect(RectDef),
    Points(Vec<PointDef>),
}

#[derive(Debug, Deserialize)]
struct Scene {
    #[serde(default)]
    config: Option<Value>,
    #[serde(default)]
    workarea: Option<RectDef>,
    #[serde(default)]
    objects: Vec<RectDef>,
    selection: SelectionDef,
    start: PointDef,
    current: PointDef,
}

#[derive(Serialize)]
struct Snapped {
    x: bool,
    y: bool,
}

#[derive(Serialize)]
struct SnapOut<'a> {
    offset: PointDef,
    snapped: Snapped,
    guides: Vec<&'a GuideLine>,
}

fn usage() -> &'static str {
    "remora-cli\n\
\n\
USAGE:\n\
  remora-cli [snap] [--pretty] [--format json|svg] [--zoom <ratio>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the scene JSON is read from stdin.\n\
  - The scene holds `objects` and an optional `workarea` as {x, y, width, height} rects, the dragged\n\
    `selection` (a rect or its 8 bounding-box points), the drag `start` and `current` pointer\n\
    positions, and an optional `config` object.\n\
  - json prints the snapped offset and the guide lines; svg prints the guide lines only.\n\
  - Set REMORA_LOG (e.g. REMORA_LOG=remora=trace) to log to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "snap" => {}
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--zoom" => {
                let Some(zoom) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let zoom = zoom.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(zoom.is_finite() && zoom > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.zoom = Some(zoom);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
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
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn init_logging() {
    let Ok(filter) = std::env::var("REMORA_LOG") else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(scene: &Scene, zoom: Option<f64>) -> Result<SnapConfig, CliError> {
    let mut config = match &scene.config {
        Some(value) => SnapConfig::from_value(value.clone())?,
        None => SnapConfig::default(),
    };
    if let Some(zoom) = zoom {
        config.zoom_ratio = zoom;
    }
    config.validate()?;
    Ok(config)
}

fn selection_box(selection: &SelectionDef) -> Result<BoundingBoxPoints, CliError> {
    match selection {
        SelectionDef::Rect(r) => {
            let bbox = BoundingBoxPoints::from_rect((*r).into());
            Ok(BoundingBoxPoints::try_from_slice(bbox.points())?)
        }
        SelectionDef::Points(points) => {
            let points: Vec<Point> = points.iter().map(|&p| p.into()).collect();
            Ok(BoundingBoxPoints::try_from_slice(&points)?)
        }
    }
}

fn wrap_svg(fragment: &str) -> String {
    format!(r#"<svg xmlns="http://www.w3.org/2000/svg">{fragment}</svg>"#)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let scene: Scene = serde_json::from_str(&text)?;
    let config = load_config(&scene, args.zoom)?;
    let bbox = selection_box(&scene.selection)?;
    tracing::debug!(
        objects = scene.objects.len(),
        workarea = scene.workarea.is_some(),
        zoom = config.zoom_ratio,
        "loaded scene"
    );

    let mut index = AlignPointIndex::from_config(&config);
    let workarea: Option<remora::Rect> = scene
        .workarea
        .filter(|_| config.include_workarea)
        .map(Into::into);
    index.collect(scene.objects.iter().map(|&r| r.into()), workarea);

    let mut layer = GuideLayer::new(config.zoom_ratio);
    layer.set_context(index.workarea_points(), index.edges());

    let mut snapper = Snapper::new(index, layer, config);
    let outcome = snapper.snap(&bbox, scene.current.into(), scene.start.into());
    let layer = snapper.renderer();
    tracing::debug!(
        dx = outcome.offset.x,
        dy = outcome.offset.y,
        guides = layer.len(),
        "snap finished"
    );

    match args.format {
        OutputFormat::Json => {
            let out = SnapOut {
                offset: PointDef {
                    x: outcome.offset.x,
                    y: outcome.offset.y,
                },
                snapped: Snapped {
                    x: outcome.is_snapped(Axis::X),
                    y: outcome.is_snapped(Axis::Y),
                },
                guides: layer.lines().collect(),
            };
            let mut json = if args.pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            json.push('\n');
            write_text(&json, args.out.as_deref())
        }
        OutputFormat::Svg => write_text(&wrap_svg(&layer.to_svg()), args.out.as_deref()),
    }
}

fn main() {
    init_logging();

    let argv = std::env::args().collect::<Vec<_>>();
    let args = match parse_args(&argv) {
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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
