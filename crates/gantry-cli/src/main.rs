use chrono::NaiveDate;
use gantry::exchange::{ImportMode, export_projects, import_projects};
use gantry::render::raster::{RasterError, RasterOptions, svg_to_png};
use gantry::render::{
    LayoutOptions, SvgRenderOptions, ZoomLevel, layout_timeline, render_timeline_svg,
    sanitize_svg_id,
};
use gantry::{
    Config, Engine, Language, Message, ProjectDraft, ProjectKind, ProjectStats, Store, Theme,
    ViewMode,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE: &str = "gantry.json";
const LOG_ENV: &str = "GANTRY_LOG";

#[derive(Debug)]
enum CliError {
    Usage(String),
    Io(std::io::Error),
    Gantry(gantry::Error),
    Render(gantry::render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    Import {
        language: Language,
        source: gantry::Error,
    },
    NothingToExport(Language),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Gantry(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Import { language, source } => {
                write!(f, "{} ({source})", language.text(Message::ImportError))
            }
            CliError::NothingToExport(language) => {
                write!(f, "{}", language.text(Message::NoProjectsToExport))
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<gantry::Error> for CliError {
    fn from(value: gantry::Error) -> Self {
        Self::Gantry(value)
    }
}

impl From<gantry::render::Error> for CliError {
    fn from(value: gantry::render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    List,
    Add,
    Edit,
    Remove,
    Clear,
    Stats,
    Import,
    Export,
    Layout,
    Render,
    Set,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "add" => Ok(Self::Add),
            "edit" => Ok(Self::Edit),
            "remove" | "rm" => Ok(Self::Remove),
            "clear" => Ok(Self::Clear),
            "stats" => Ok(Self::Stats),
            "import" => Ok(Self::Import),
            "export" => Ok(Self::Export),
            "layout" => Ok(Self::Layout),
            "render" => Ok(Self::Render),
            "set" => Ok(Self::Set),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    positionals: Vec<String>,
    store: Option<String>,
    configs: Vec<String>,
    pretty: bool,
    append: bool,
    raw: bool,
    name: Option<String>,
    kind: Option<ProjectKind>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
    color: Option<String>,
    view: Option<ViewMode>,
    zoom: Option<f64>,
    today: Option<String>,
    theme: Option<Theme>,
    language: Option<Language>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "gantry-cli\n\
\n\
USAGE:\n\
  gantry-cli [--store <path>] [--config <path>] <command> [options]\n\
\n\
COMMANDS:\n\
  list [--pretty]\n\
  add --name <name> [--type feature|bugfix|milestone|release] [--start <YYYY-MM-DD>] [--end <YYYY-MM-DD>] [--description <text>] [--color <hex>]\n\
  edit <id> [--name <name>] [--type <type>] [--start <date>|\"\"] [--end <date>|\"\"] [--description <text>] [--color <hex>]\n\
  remove <id>\n\
  clear\n\
  stats [--pretty]\n\
  import [--append] [<path>|-]\n\
  export [--out <path>]\n\
  layout [--view day|week|month] [--zoom <n>] [--today <YYYY-MM-DD>] [--raw] [--pretty]\n\
  render [--format svg|png] [--view day|week|month] [--zoom <n>] [--today <YYYY-MM-DD>] [--theme light|dark|blue|green|purple] [--lang en|zh] [--scale <n>] [--background <color>] [--id <svg-id>] [--out <path>]\n\
  set theme <name> | set language <en|zh>\n\
\n\
NOTES:\n\
  - The store defaults to ./gantry.json; a missing file is an empty store.\n\
  - --config may be repeated; later files override earlier ones.\n\
  - add without --start/--end schedules the project from today for one week.\n\
  - edit with an empty date (\"\") clears that date.\n\
  - import replaces the stored projects unless --append is given; input defaults to stdin.\n\
  - layout --raw prints percentage geometry instead of pixels.\n\
  - render prints SVG to stdout by default; PNG defaults to ./gantt-chart-<today>.png.\n\
  - Set GANTRY_LOG (e.g. debug) to see diagnostics on stderr.\n\
"
}

fn usage_error(message: impl std::fmt::Display) -> CliError {
    CliError::Usage(format!("error: {message}\n\n{}", usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 2.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut value = |flag: &str| {
            it.next()
                .cloned()
                .ok_or_else(|| usage_error(format!("missing value for {flag}")))
        };
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage().to_string())),
            "--pretty" => args.pretty = true,
            "--append" => args.append = true,
            "--raw" => args.raw = true,
            "--store" => args.store = Some(value(a)?),
            "--config" => args.configs.push(value(a)?),
            "--name" => args.name = Some(value(a)?),
            "--type" => args.kind = Some(value(a)?.parse().map_err(usage_error)?),
            "--start" => args.start = Some(value(a)?),
            "--end" => args.end = Some(value(a)?),
            "--description" => args.description = Some(value(a)?),
            "--color" => args.color = Some(value(a)?),
            "--view" => args.view = Some(value(a)?.parse().map_err(usage_error)?),
            "--zoom" => {
                let zoom = value(a)?;
                let zoom = zoom
                    .parse::<f64>()
                    .ok()
                    .filter(|z| z.is_finite())
                    .ok_or_else(|| usage_error(format!("invalid zoom `{zoom}`")))?;
                args.zoom = Some(zoom);
            }
            "--today" => args.today = Some(value(a)?),
            "--theme" => args.theme = Some(value(a)?.parse().map_err(usage_error)?),
            "--lang" | "--language" => {
                args.language = Some(value(a)?.parse().map_err(usage_error)?)
            }
            "--format" => {
                let fmt = value(a)?;
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| usage_error(format!("unknown format `{fmt}`")))?;
            }
            "--scale" => {
                let scale = value(a)?;
                args.render_scale = scale
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| usage_error(format!("invalid scale `{scale}`")))?;
            }
            "--background" => {
                let bg = value(a)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => args.diagram_id = Some(value(a)?),
            "--out" => args.out = Some(value(a)?),
            "-" => args.positionals.push(a.clone()),
            other if other.starts_with('-') => {
                return Err(usage_error(format!("unknown option `{other}`")));
            }
            word => {
                if args.command.is_none() {
                    let command = word
                        .parse::<Command>()
                        .map_err(|_| usage_error(format!("unknown command `{word}`")))?;
                    args.command = Some(command);
                } else {
                    args.positionals.push(word.to_string());
                }
            }
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage().to_string()));
    }
    Ok(args)
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
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
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

/// Later files override earlier ones key by key.
fn load_config(paths: &[String]) -> Result<Config, CliError> {
    let mut config = Config::default();
    for path in paths {
        config.merge(Config::from_json_str(&std::fs::read_to_string(path)?)?);
        tracing::debug!(path = %path, "loaded config");
    }
    Ok(config)
}

fn parse_id(args: &Args) -> Result<u64, CliError> {
    let raw = args
        .positionals
        .first()
        .ok_or_else(|| usage_error("missing project id"))?;
    raw.parse::<u64>()
        .map_err(|_| usage_error(format!("invalid project id `{raw}`")))
}

fn resolve_today(args: &Args, options: &LayoutOptions) -> Result<NaiveDate, CliError> {
    match args.today.as_deref() {
        Some(raw) => Ok(gantry::date::parse_date(raw)?),
        None => Ok(options.today.unwrap_or_else(gantry::time::today)),
    }
}

/// Precedence: built-in defaults, then the store's preferences, then `--config`, then flags.
fn layout_options(args: &Args, config: &Config, store: &Store) -> Result<LayoutOptions, CliError> {
    let mut options = LayoutOptions::from_config(config)?;
    if config.get_str("theme").is_none() {
        options.theme = store.theme();
    }
    if config.get_str("language").is_none() {
        options.language = store.language();
    }
    if let Some(view) = args.view {
        options.view_mode = view;
    }
    if let Some(zoom) = args.zoom {
        options.zoom = ZoomLevel::new(zoom);
    }
    if let Some(theme) = args.theme {
        options.theme = theme;
    }
    if let Some(language) = args.language {
        options.language = language;
    }
    options.today = Some(resolve_today(args, &options)?);
    Ok(options)
}

fn apply_fields(mut draft: ProjectDraft, args: &Args) -> Result<ProjectDraft, CliError> {
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(kind) = args.kind {
        draft.kind = kind;
    }
    if let Some(start) = &args.start {
        draft.start_date = gantry::date::parse_optional_date(start)?;
    }
    if let Some(end) = &args.end {
        draft.end_date = gantry::date::parse_optional_date(end)?;
    }
    if let Some(description) = &args.description {
        draft.description = Some(description.clone()).filter(|d| !d.is_empty());
    }
    if let Some(color) = &args.color {
        draft.color = Some(color.clone()).filter(|c| !c.is_empty());
    }
    Ok(draft)
}

fn run(args: Args, command: Command) -> Result<(), CliError> {
    let config = load_config(&args.configs)?;
    let store_path = args.store.as_deref().unwrap_or(DEFAULT_STORE);
    let mut store = Store::open(store_path)?;

    match command {
        Command::List => write_json(&store.projects(), args.pretty),
        Command::Stats => write_json(&ProjectStats::collect(store.projects()), args.pretty),
        Command::Add => {
            let base = if args.start.is_none() && args.end.is_none() {
                let options = LayoutOptions::from_config(&config)?;
                ProjectDraft::with_default_dates("", resolve_today(&args, &options)?)
            } else {
                ProjectDraft::default()
            };
            let draft = apply_fields(base, &args)?;
            let project = store.add(draft)?.clone();
            store.save()?;
            write_json(&project, args.pretty)
        }
        Command::Edit => {
            let id = parse_id(&args)?;
            let current = store
                .project(id)
                .ok_or(gantry::Error::ProjectNotFound { id })?
                .to_draft();
            let draft = apply_fields(current, &args)?;
            let project = store.update(id, draft)?.clone();
            store.save()?;
            write_json(&project, args.pretty)
        }
        Command::Remove => {
            let id = parse_id(&args)?;
            let removed = store.remove(id)?;
            store.save()?;
            println!("removed {} ({})", removed.id, removed.name);
            Ok(())
        }
        Command::Clear => {
            let n = store.clear();
            store.save()?;
            println!("removed {n} projects");
            Ok(())
        }
        Command::Import => {
            let language = store.language();
            let text = read_input(args.positionals.first().map(String::as_str))?;
            let drafts = import_projects(&text)
                .map_err(|source| CliError::Import { language, source })?;
            let mode = if args.append {
                ImportMode::Append
            } else {
                ImportMode::Replace
            };
            let n = store.import(drafts, mode);
            store.save()?;
            tracing::info!(count = n, ?mode, "imported projects");
            println!("{}", language.text(Message::ImportSuccess));
            Ok(())
        }
        Command::Export => {
            if store.projects().is_empty() {
                return Err(CliError::NothingToExport(store.language()));
            }
            write_text(&export_projects(store.projects())?, args.out.as_deref())
        }
        Command::Layout => {
            let options = layout_options(&args, &config, &store)?;
            if args.raw {
                let engine = Engine::new()
                    .with_fixed_today(options.today)
                    .with_span_options(options.span_options)
                    .with_language(options.language);
                write_json(
                    &engine.layout(store.projects(), options.view_mode),
                    args.pretty,
                )
            } else {
                write_json(&layout_timeline(store.projects(), &options), args.pretty)
            }
        }
        Command::Render => {
            let options = layout_options(&args, &config, &store)?;
            let layout = layout_timeline(store.projects(), &options);
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
                ..SvgRenderOptions::default()
            };
            let svg = render_timeline_svg(&layout, &svg_options);
            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => {
                    let bytes = svg_to_png(
                        &svg,
                        &RasterOptions {
                            scale: args.render_scale,
                            background: args.background.clone(),
                        },
                    )?;
                    let out = args
                        .out
                        .clone()
                        .unwrap_or_else(|| format!("gantt-chart-{}.png", layout.today));
                    std::fs::write(&out, bytes)?;
                    tracing::info!(path = %out, "wrote png");
                    Ok(())
                }
            }
        }
        Command::Set => {
            let [key, value] = args.positionals.as_slice() else {
                return Err(usage_error("expected `set theme <name>` or `set language <code>`"));
            };
            match key.as_str() {
                "theme" => store.set_theme(value.parse()?),
                "language" | "lang" => store.set_language(value.parse()?),
                other => return Err(usage_error(format!("unknown setting `{other}`"))),
            }
            store.save()?;
            Ok(())
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
    init_logging();

    let Some(command) = args.command else {
        eprintln!("{}", usage());
        std::process::exit(2);
    };
    match run(args, command) {
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
