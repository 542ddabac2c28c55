use serde::Serialize;
use speed_story::api::{Narrative, StoryEngine, StoryEngineConfig};
use speed_story::core::{ContainerRect, StoryTables};
use speed_story::interaction::{EmphasisBands, EmphasisState};
use speed_story::render::{NullRenderer, SvgRenderer};
use speed_story::telemetry::init_tracing_with_fallback;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str =
    "usage: story_trace_tool <sweep|svg> [--steps <n>] [--tables <path>] --output <path>";
const DEFAULT_STEPS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Sweep,
    Svg,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    steps: usize,
    tables: Option<PathBuf>,
    output: PathBuf,
}

#[derive(Debug, Serialize)]
struct SweepTrace {
    steps: usize,
    container: ContainerRect,
    samples: Vec<SweepSample>,
}

#[derive(Debug, Serialize)]
struct SweepSample {
    step: usize,
    client_x: f64,
    plot_x: f64,
    t: f64,
    lower_index: usize,
    ratio: f64,
    conversion_rate: f64,
    bounce_rate: f64,
    narrative: Narrative,
    emphasis_band: String,
}

fn main() {
    let _ = init_tracing_with_fallback("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let tables = load_tables(args.tables.as_ref())?;
    match args.command {
        CommandKind::Sweep => {
            let trace = sweep(tables, args.steps)?;
            write_json(&args.output, &trace)?;
            info!(
                samples = trace.samples.len(),
                output = %args.output.display(),
                "sweep written"
            );
            Ok(())
        }
        CommandKind::Svg => {
            let mut engine = StoryEngine::with_tables(
                SvgRenderer::new(),
                StoryEngineConfig::default(),
                tables,
            )
            .map_err(|err| format!("failed to build engine: {err}"))?;
            engine
                .render()
                .map_err(|err| format!("failed to render svg: {err}"))?;
            let document = engine.into_renderer().into_document();
            fs::write(&args.output, document)
                .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;
            info!(output = %args.output.display(), "svg written");
            Ok(())
        }
    }
}

fn load_tables(path: Option<&PathBuf>) -> Result<StoryTables, String> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            StoryTables::from_json_compat_str(&raw).map_err(|err| format!("invalid tables: {err}"))
        }
        None => StoryTables::performance_story().map_err(|err| err.to_string()),
    }
}

/// Sweeps a pointer across a container as wide as the view box.
fn sweep(tables: StoryTables, steps: usize) -> Result<SweepTrace, String> {
    let config = StoryEngineConfig::default();
    let mut engine = StoryEngine::with_tables(NullRenderer::default(), config, tables)
        .map_err(|err| format!("failed to build engine: {err}"))?;
    let container = ContainerRect::new(0.0, 0.0, engine.plot_width(), 500.0);
    let bands = EmphasisBands::speed_revenue().map_err(|err| err.to_string())?;
    let mut emphasis = EmphasisState::default();

    let mut samples = Vec::with_capacity(steps + 1);
    for step in 0..=steps {
        let client_x = container.left + container.width * step as f64 / steps as f64;
        let row = engine.pointer_move(client_x, 0.0, container);
        let band = emphasis
            .on_pointer_move(&bands, client_x, container)
            .map_err(|err| err.to_string())?;
        samples.push(SweepSample {
            step,
            client_x,
            plot_x: row.plot_x,
            t: row.t(),
            lower_index: row.lower_index,
            ratio: row.ratio,
            conversion_rate: row.row.conversion_rate,
            bounce_rate: row.row.bounce_rate,
            narrative: engine.narrative(),
            emphasis_band: bands.bands()[band].id.clone(),
        });
    }
    engine.pointer_leave();
    engine
        .render()
        .map_err(|err| format!("failed to validate frame: {err}"))?;

    Ok(SweepTrace {
        steps,
        container,
        samples,
    })
}

fn write_json<T: Serialize>(path: &PathBuf, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("sweep") => CommandKind::Sweep,
        Some("svg") => CommandKind::Svg,
        _ => return Err(USAGE.to_owned()),
    };

    let mut steps = DEFAULT_STEPS;
    let mut tables = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--steps" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --steps".to_owned())?;
                steps = value
                    .parse::<usize>()
                    .map_err(|err| format!("invalid --steps `{value}`: {err}"))?;
                if steps == 0 {
                    return Err("--steps must be > 0".to_owned());
                }
            }
            "--tables" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --tables".to_owned())?;
                tables = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let output = output.ok_or_else(|| "missing --output".to_owned())?;
    Ok(CliArgs {
        command,
        steps,
        tables,
        output,
    })
}
