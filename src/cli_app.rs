//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use chrono::{Local, Timelike};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde_json::{Value, json};
use thiserror::Error;

use pocket_dashboard::core::config::{Config, DashboardVariant};
use pocket_dashboard::core::errors::DashError;
use pocket_dashboard::dashboard::data::SampleData;
use pocket_dashboard::dashboard::greeting::Greeting;
use pocket_dashboard::dashboard::model::{DashboardModel, DashboardMsg};
use pocket_dashboard::dashboard::panels::PanelId;
use pocket_dashboard::dashboard::runtime::DashboardSession;
use pocket_dashboard::dashboard::selection::DetailFlow;
use pocket_dashboard::dashboard::snapshot::DashboardSnapshot;
use pocket_dashboard::dashboard::sparkline::SparklineGeometry;
use pocket_dashboard::dashboard::theme::MarketSentiment;
use pocket_dashboard::dashboard::widgets::sparkline_text;

/// Pocket dashboard: presentation state for weather, stock, and media screens.
#[derive(Debug, Parser)]
#[command(
    name = "pdash",
    author,
    version,
    about = "Pocket Dashboard - presentation state inspector",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Build a session, apply actions, and print the resulting snapshot.
    Snapshot(SnapshotArgs),
    /// Print the greeting for an hour of the day.
    Greeting(GreetingArgs),
    /// Project values into sparkline coordinates.
    Sparkline(SparklineArgs),
    /// View configuration state.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct SnapshotArgs {
    /// Local hour used for the greeting (defaults to the current hour).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,
    /// Dashboard variant, overriding config.
    #[arg(long, value_name = "VARIANT")]
    variant: Option<String>,
    /// Action to apply, in order (e.g. `toggle:daily_forecast`, `select:stock:AAPL`,
    /// `highlight:wind`).
    #[arg(long = "action", short = 'a', value_name = "KIND:ARG")]
    actions: Vec<String>,
}

#[derive(Debug, Clone, Args, Default)]
struct GreetingArgs {
    /// Hour of day (defaults to the current hour).
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,
}

#[derive(Debug, Clone, Args)]
struct SparklineArgs {
    /// Ordered values.
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<f64>,
    /// Bounding box width.
    #[arg(long, value_name = "PX")]
    width: Option<f64>,
    /// Bounding box height.
    #[arg(long, value_name = "PX")]
    height: Option<f64>,
}

#[derive(Debug, Clone, Args)]
struct ConfigArgs {
    /// Config operation to run.
    #[command(subcommand)]
    command: Option<ConfigCommand>,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigCommand {
    /// Print resolved config file path.
    Path,
    /// Print effective merged configuration.
    Show,
    /// Validate configuration and exit.
    Validate,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Internal bug or invariant violation.
    #[error("{0}")]
    Internal(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Internal(_) | Self::Json(_) => 3,
        }
    }
}

impl From<DashError> for CliError {
    fn from(value: DashError) -> Self {
        match value {
            DashError::Serialization { .. } => Self::Internal(value.to_string()),
            e if e.is_user_error() => Self::User(e.to_string()),
            e => Self::Runtime(e.to_string()),
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }

    match &cli.command {
        Command::Snapshot(args) => run_snapshot(cli, args),
        Command::Greeting(args) => run_greeting(cli, args),
        Command::Sparkline(args) => run_sparkline(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

// ──────────────────── snapshot ────────────────────

fn run_snapshot(cli: &Cli, args: &SnapshotArgs) -> Result<(), CliError> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(raw) = &args.variant {
        config.variant = DashboardVariant::from_key(raw).ok_or_else(|| {
            CliError::User(format!(
                "unknown variant {raw:?} (expected weather, weather_planner, stocks, media)"
            ))
        })?;
        config.validate()?;
    }

    let mut session = DashboardSession::new(&SampleData, &config)?;
    for raw in &args.actions {
        let msg = parse_action(raw, session.model())?;
        session.dispatch(msg);
    }

    let hour = args.hour.unwrap_or_else(|| Local::now().hour());
    let snapshot = session.snapshot(hour);

    match output_mode(cli) {
        OutputMode::Human => print_snapshot(&snapshot)?,
        OutputMode::Json => {
            let payload = json!({
                "command": "snapshot",
                "hour": hour,
                "actions": args.actions,
                "snapshot": serde_json::to_value(&snapshot)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn print_snapshot(snap: &DashboardSnapshot) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}  [{}]", snap.greeting.salutation.bold(), snap.variant)?;

    let w = &snap.weather;
    writeln!(
        out,
        "{}  {} {}  H:{} L:{}",
        w.location.bold(),
        w.temperature,
        w.condition,
        w.high,
        w.low
    )?;
    writeln!(out, "  daily ({}):", w.daily_mode)?;
    for day in &w.daily {
        writeln!(out, "    {:<10} {:<14} {} / {}", day.day, day.condition, day.high, day.low)?;
    }

    let visible: Vec<&str> = snap
        .panels
        .iter()
        .filter(|(_, p)| p.visible)
        .map(|(key, _)| *key)
        .collect();
    writeln!(out, "  visible panels: {}", visible.join(", "))?;

    if snap.panels.get("portfolio_overview").is_some_and(|p| p.enabled) {
        writeln!(out, "  sentiment: {}", snap.sentiment.label())?;
        for stock in &snap.stocks {
            let change = if stock.change.starts_with('+') {
                stock.change.green()
            } else {
                stock.change.red()
            };
            let marker = if stock.selected { "*" } else { " " };
            let values: Vec<f64> = stock.sparkline.iter().map(|p| -p.y).collect();
            writeln!(
                out,
                "  {marker}{:<6} {:>9.2} {:>7}  {}",
                stock.symbol,
                stock.price,
                change,
                sparkline_text(&shift_non_negative(&values))
            )?;
        }
    }

    if snap.panels.get("media_detail").is_some_and(|p| p.enabled) {
        writeln!(out, "  category: {}", snap.media.category)?;
        if let Some(card) = &snap.media.selected {
            writeln!(out, "  selected: {} ({})", card.title.bold(), card.rating)?;
        }
    }
    Ok(())
}

/// Shift a sequence so its minimum sits at zero.
fn shift_non_negative(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return values.to_vec();
    }
    values.iter().map(|v| v - min).collect()
}

/// Resolve one `kind:arg` action against the current model.
fn parse_action(raw: &str, model: &DashboardModel) -> Result<DashboardMsg, DashError> {
    let invalid = |details: &str| invalid_action(raw, details);
    let (kind, arg) = match raw.split_once(':') {
        Some((kind, arg)) => (kind.trim(), Some(arg.trim())),
        None => (raw.trim(), None),
    };
    let require = |arg| require_arg(raw, arg);
    let data = model.data();

    let msg = match kind {
        "toggle" => {
            let key = require(arg)?;
            DashboardMsg::Toggle(PanelId::from_key(key).ok_or_else(|| DashError::UnknownItem {
                collection: "panel",
                key: key.to_string(),
            })?)
        }
        "select" => {
            let (flow, key) = require(arg)?
                .split_once(':')
                .ok_or_else(|| invalid("expected select:<flow>:<item>"))?;
            let flow = parse_flow(flow.trim())?;
            let key = key.trim();
            let id = match flow {
                DetailFlow::Stock => data.stock_by_symbol(key).map(|s| s.id),
                DetailFlow::Media => data.media_by_title(key).map(|m| m.id),
                DetailFlow::Day => model
                    .current_weather()
                    .daily
                    .iter()
                    .find(|d| d.day.eq_ignore_ascii_case(key))
                    .map(|d| d.id),
                DetailFlow::Condition => data.condition_by_title(key).map(|c| c.id),
            };
            let id = id.ok_or_else(|| DashError::UnknownItem {
                collection: flow.label(),
                key: key.to_string(),
            })?;
            DashboardMsg::Select { flow, id }
        }
        "dismiss" => DashboardMsg::DismissDetail(parse_flow(require(arg)?)?),
        "sentiment" => {
            let label = require(arg)?;
            DashboardMsg::SetSentiment(MarketSentiment::from_label(label).ok_or_else(|| {
                DashError::UnknownItem {
                    collection: "sentiment",
                    key: label.to_string(),
                }
            })?)
        }
        "cycle-sentiment" => DashboardMsg::CycleSentiment,
        "advance" => {
            let delta = require(arg)?
                .parse::<f64>()
                .map_err(|e| invalid(&format!("bad delta: {e}")))?;
            DashboardMsg::AdvanceAnimation(delta)
        }
        "location" => {
            let name = require(arg)?;
            let known = data
                .location_names()
                .find(|n| n.eq_ignore_ascii_case(name))
                .ok_or_else(|| DashError::UnknownLocation {
                    name: name.to_string(),
                })?;
            DashboardMsg::SwitchLocation(known.to_string())
        }
        "next" => DashboardMsg::NextLocation,
        "prev" => DashboardMsg::PrevLocation,
        "search" => DashboardMsg::SetSearchQuery(arg.unwrap_or_default().to_string()),
        "category" => {
            let name = require(arg)?;
            let known = data
                .media_categories
                .iter()
                .find(|c| c.eq_ignore_ascii_case(name))
                .ok_or_else(|| DashError::UnknownItem {
                    collection: "category",
                    key: name.to_string(),
                })?;
            DashboardMsg::SelectCategory(known.clone())
        }
        "overlay" => {
            let title = require(arg)?;
            let item = data.media_by_title(title).ok_or_else(|| DashError::UnknownItem {
                collection: "media",
                key: title.to_string(),
            })?;
            DashboardMsg::ToggleMediaOverlay(item.id)
        }
        "highlight" => {
            let title = require(arg)?;
            let card = data.highlight_by_title(title).ok_or_else(|| DashError::UnknownItem {
                collection: "highlight",
                key: title.to_string(),
            })?;
            DashboardMsg::ToggleHighlight(card.id)
        }
        "units" => DashboardMsg::ToggleUnits,
        "reset" => DashboardMsg::Reset,
        _ => return Err(invalid("unknown action kind")),
    };
    Ok(msg)
}

fn invalid_action(raw: &str, details: &str) -> DashError {
    DashError::InvalidAction {
        raw: raw.to_string(),
        details: details.to_string(),
    }
}

fn require_arg<'a>(raw: &str, arg: Option<&'a str>) -> Result<&'a str, DashError> {
    arg.filter(|a| !a.is_empty())
        .ok_or_else(|| invalid_action(raw, "missing argument"))
}

fn parse_flow(raw: &str) -> Result<DetailFlow, DashError> {
    DetailFlow::from_label(raw).ok_or_else(|| DashError::UnknownItem {
        collection: "detail flow",
        key: raw.to_string(),
    })
}

// ──────────────────── greeting / sparkline ────────────────────

fn run_greeting(cli: &Cli, args: &GreetingArgs) -> Result<(), CliError> {
    let hour = args.hour.unwrap_or_else(|| Local::now().hour());
    let greeting = Greeting::for_hour(hour);
    match output_mode(cli) {
        OutputMode::Human => println!("{}", greeting.salutation()),
        OutputMode::Json => {
            let payload = json!({
                "command": "greeting",
                "hour": hour,
                "bucket": greeting,
                "salutation": greeting.salutation(),
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_sparkline(cli: &Cli, args: &SparklineArgs) -> Result<(), CliError> {
    let config = Config::load(cli.config.as_deref())?;
    let width = args.width.unwrap_or(config.sparkline.width);
    let height = args.height.unwrap_or(config.sparkline.height);
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(CliError::User(format!(
            "sparkline box must be positive, got {width}x{height}"
        )));
    }

    let geometry = SparklineGeometry::new(&args.values, width, height);
    match output_mode(cli) {
        OutputMode::Human => {
            println!("{}", sparkline_text(&args.values));
            for p in &geometry {
                println!("  {:>8.2} {:>8.2}", p.x, p.y);
            }
        }
        OutputMode::Json => {
            let points: Vec<_> = geometry.points().collect();
            let payload = json!({
                "command": "sparkline",
                "width": width,
                "height": height,
                "points": points,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

// ──────────────────── config ────────────────────

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    match &args.command {
        None | Some(ConfigCommand::Path) => {
            let path = cli.config.clone().unwrap_or_else(Config::default_path);
            let exists = path.exists();

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", path.display());
                    if !exists {
                        println!("  (file does not exist; defaults will be used)");
                    }
                }
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config path",
                        "path": path.to_string_lossy(),
                        "exists": exists,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Show) => {
            let config = Config::load(cli.config.as_deref())?;

            match output_mode(cli) {
                OutputMode::Human => println!("{}", config.to_toml()?),
                OutputMode::Json => {
                    let payload = json!({
                        "command": "config show",
                        "config": serde_json::to_value(&config)?,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
        Some(ConfigCommand::Validate) => {
            let config = Config::load(cli.config.as_deref())?;
            let variant = config.variant_config()?;
            // Names in the config (default location) must resolve too.
            DashboardModel::new(&SampleData, &config)?;

            match output_mode(cli) {
                OutputMode::Human => {
                    println!("{}", "Configuration is valid.".green());
                    println!("  Source: {}", config.paths.config_file.display());
                    println!("  Variant: {}", variant.variant.key());
                }
                OutputMode::Json => {
                    let enabled: Vec<&str> = variant.enabled.iter().map(|p| p.key()).collect();
                    let payload = json!({
                        "command": "config validate",
                        "valid": true,
                        "path": config.paths.config_file.to_string_lossy(),
                        "variant": variant.variant.key(),
                        "enabled_panels": enabled,
                    });
                    write_json_line(&payload)?;
                }
            }
            Ok(())
        }
    }
}

// ──────────────────── output ────────────────────

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("PDASH_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        _ => fallback,
    }
}
