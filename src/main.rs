use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use kira_roc::compose::{FacetRenderer, GroupContext, OverlayRenderer, RenderFn, compose};
use kira_roc::input::demo::{demo_columns, demo_datasets, demo_records};
use kira_roc::input::{DataTable, ScoreColumns, load_table, write_table};
use kira_roc::logging;
use kira_roc::model::interval::{DEFAULT_RESAMPLES, DEFAULT_SEED};
use kira_roc::model::{CiMethod, IntervalConfig};
use kira_roc::panels::{Color, OverlayConfig, PanelConfig};
use kira_roc::report::{Figure, write_reports};

const DEFAULT_COMPOSE_COLUMNS: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "kira-roc", version, about = "ROC curves, AUC confidence intervals and panel figures")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute ROC curves for a score table and write figure + reports.
    Run(RunArgs),
    /// Write the seeded High / Mid / Low separability demo and its figures.
    Demo(DemoArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One facet per group.
    Panels,
    /// Every group on one set of axes.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CiKind {
    Bootstrap,
    HanleyMcneil,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// TSV/CSV score table, optionally gzipped.
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = Mode::Panels)]
    mode: Mode,
    #[arg(long, default_value = "Dataset")]
    group_col: String,
    #[arg(long, default_value = "true")]
    truth_col: String,
    #[arg(long, default_value = "score")]
    score_col: String,
    /// Build one panel per distinct value of this column.
    #[arg(long)]
    compose_by: Option<String>,
    /// Groups to draw, in order (comma separated). Defaults to all.
    #[arg(long, value_delimiter = ',')]
    groups: Vec<String>,
    /// Hex colors applied to groups positionally (comma separated).
    #[arg(long, value_delimiter = ',')]
    colors: Vec<Color>,
    /// Grid width: composite panels with --compose-by, facets otherwise.
    #[arg(long)]
    ncol: Option<usize>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, value_enum)]
    ci_method: Option<CiKind>,
    #[arg(long)]
    resamples: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    confidence: Option<f64>,
    /// JSON file with `panel` and/or `overlay` render settings.
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DemoArgs {
    #[arg(long)]
    out: PathBuf,
    /// Samples per dataset, split evenly between classes.
    #[arg(long, default_value_t = 300)]
    n: usize,
    #[arg(long, default_value_t = 2025)]
    seed: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StyleFile {
    panel: PanelConfig,
    overlay: OverlayConfig,
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    let result = match &cli.command {
        Command::Run(args) => run(args),
        Command::Demo(args) => demo(args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &RunArgs) -> kira_roc::Result<()> {
    let table = load_table(&args.input)?;
    let columns = ScoreColumns {
        group: args.group_col.clone(),
        truth: args.truth_col.clone(),
        score: args.score_col.clone(),
    };
    let style = load_style(args.style.as_deref())?;
    let groups = (!args.groups.is_empty()).then(|| args.groups.clone());

    let renderer: Box<dyn RenderFn> = match args.mode {
        Mode::Panels => Box::new(FacetRenderer {
            columns: columns.clone(),
            groups,
            config: panel_config(style.panel, args),
        }),
        Mode::Overlay => Box::new(OverlayRenderer {
            columns: columns.clone(),
            groups,
            config: overlay_config(style.overlay, args),
        }),
    };

    let figure = match &args.compose_by {
        Some(by) => {
            let title = args
                .title
                .clone()
                .unwrap_or_else(|| format!("ROC Curves by {by}"));
            let ncol = args.ncol.unwrap_or(DEFAULT_COMPOSE_COLUMNS);
            Figure::Composite(compose(&table, by, None, renderer.as_ref(), ncol, &title)?)
        }
        None => {
            let title = args.title.clone().unwrap_or_else(|| default_title(args.mode));
            let ctx = GroupContext {
                column: &columns.group,
                key: "",
                index: 0,
                title,
            };
            Figure::Panel(renderer.render(&table, &ctx)?)
        }
    };

    let paths = write_reports(&figure, &args.out)?;
    println!("figure: {}", paths.svg.display());
    println!("summary: {}", paths.summary.display());
    Ok(())
}

fn demo(args: &DemoArgs) -> kira_roc::Result<()> {
    let columns = demo_columns();
    let records = demo_records(args.n, args.seed);
    let table = DataTable::from_records(&records, &columns);
    std::fs::create_dir_all(&args.out)?;
    write_table(&table, &args.out.join("demo_scores.tsv"))?;

    let colors: Vec<Color> = demo_datasets().iter().map(|d| d.color).collect();
    let ctx = GroupContext {
        column: &columns.group,
        key: "",
        index: 0,
        title: "ROC Curve Panels".to_string(),
    };
    let facets = FacetRenderer {
        columns: columns.clone(),
        groups: None,
        config: PanelConfig {
            colors: colors.clone(),
            ..PanelConfig::default()
        },
    };
    let panel = facets.render(&table, &ctx)?;
    write_reports(&Figure::Panel(panel), &args.out.join("panels"))?;

    let overlay = OverlayRenderer {
        columns: columns.clone(),
        groups: None,
        config: OverlayConfig {
            colors,
            ..OverlayConfig::default()
        },
    };
    let ctx = GroupContext {
        title: "ROC Curve Comparison".to_string(),
        ..ctx
    };
    let panel = overlay.render(&table, &ctx)?;
    write_reports(&Figure::Panel(panel), &args.out.join("overlay"))?;

    println!("demo written to {}", args.out.display());
    Ok(())
}

fn load_style(path: Option<&Path>) -> kira_roc::Result<StyleFile> {
    let Some(path) = path else {
        return Ok(StyleFile::default());
    };
    let raw = std::fs::read_to_string(path)?;
    let style: StyleFile = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), "loaded style file");
    Ok(style)
}

fn default_title(mode: Mode) -> String {
    match mode {
        Mode::Panels => PanelConfig::default().title,
        Mode::Overlay => OverlayConfig::default().title,
    }
}

fn panel_config(mut config: PanelConfig, args: &RunArgs) -> PanelConfig {
    if !args.colors.is_empty() {
        config.colors = args.colors.clone();
    }
    if args.compose_by.is_none()
        && let Some(ncol) = args.ncol
    {
        config.columns = ncol;
    }
    config.interval = interval_config(config.interval, args);
    config
}

fn overlay_config(mut config: OverlayConfig, args: &RunArgs) -> OverlayConfig {
    if !args.colors.is_empty() {
        config.colors = args.colors.clone();
    }
    config.interval = interval_config(config.interval, args);
    config
}

fn interval_config(base: IntervalConfig, args: &RunArgs) -> IntervalConfig {
    let bootstrap = |resamples: usize, seed: u64| CiMethod::Bootstrap {
        resamples: args.resamples.unwrap_or(resamples),
        seed: args.seed.unwrap_or(seed),
    };
    let method = match (args.ci_method, base.method) {
        (Some(CiKind::HanleyMcneil), _) | (None, CiMethod::HanleyMcNeil) => CiMethod::HanleyMcNeil,
        (_, CiMethod::Bootstrap { resamples, seed }) => bootstrap(resamples, seed),
        (Some(CiKind::Bootstrap), CiMethod::HanleyMcNeil) => {
            bootstrap(DEFAULT_RESAMPLES, DEFAULT_SEED)
        }
    };
    IntervalConfig {
        confidence: args.confidence.unwrap_or(base.confidence),
        method,
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
