mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trend_hunter::collector::SignalCollector;
use trend_hunter::config::ScoringConfig;
use trend_hunter::ranking::{prepare_keywords, rank_keywords};
use trend_hunter::report::{render_ranking, render_regions, render_text};
use trend_hunter::{analyze, sanitize_keyword};

use crate::api::{parse_analysis, ApiInputPayload};

#[derive(Parser)]
#[command(name = "trend-hunter", about = "Trend and opportunity scoring for product keywords")]
struct Cli {
    /// TOML config file (defaults to TREND_HUNTER_CONFIG or config/trend_hunter.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Rank(RankArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    #[arg(long)]
    keyword: String,
    /// ES, PT, FR, IT or DE.
    #[arg(long)]
    region: Option<String>,
    /// 1m, 3m, 12m or 5y.
    #[arg(long)]
    timeframe: Option<String>,
    /// JSON file with pre-collected signals.
    #[arg(long, conflicts_with = "demo")]
    input: Option<PathBuf>,
    #[arg(long)]
    demo: bool,
    /// Also compare search interest across every supported region.
    #[arg(long)]
    compare_regions: bool,
    #[arg(long)]
    json: bool,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    /// Comma separated keywords, ranked by combined opportunity score.
    #[arg(long, value_delimiter = ',', required = true)]
    keywords: Vec<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    timeframe: Option<String>,
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value = "webapp/dist")]
    web_root: String,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/trend_hunter.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::InitConfig(args) => run_init_config(args),
        Command::Analyze(args) => {
            let config = load_config(cli.config)?;
            run_analyze(args, config).await
        }
        Command::Rank(args) => {
            let config = load_config(cli.config)?;
            run_rank(args, config).await
        }
        Command::Serve(args) => {
            let config = load_config(cli.config)?;
            server::serve(args, config).await
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ScoringConfig, String> {
    let (config, source) = ScoringConfig::load(path).map_err(|err| err.to_string())?;
    match source {
        Some(path) if path.exists() => tracing::debug!(path = %path.display(), "loaded config"),
        _ => tracing::debug!("using default config"),
    }
    Ok(config)
}

async fn run_analyze(args: AnalyzeArgs, config: ScoringConfig) -> Result<(), String> {
    let keyword = sanitize_keyword(&args.keyword)
        .ok_or_else(|| "missing keyword: pass --keyword".to_string())?;
    let analysis = parse_analysis(
        args.region.as_deref(),
        args.timeframe.as_deref(),
        &config.analysis,
    )?;
    let today = chrono::Utc::now().date_naive();
    let collector = SignalCollector::from_env(&config.providers);

    let (input, mut warnings) = match args.input {
        Some(path) => {
            let data = std::fs::read_to_string(&path)
                .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
            let payload: ApiInputPayload = serde_json::from_str(&data)
                .map_err(|err| format!("failed to parse {}: {}", path.display(), err))?;
            (payload.into_input(&keyword, &analysis), Vec::new())
        }
        None => {
            let collection = collector
                .collect_or_demo(&keyword, &analysis, today, args.demo, |event| {
                    tracing::debug!(stage = ?event.stage, failed = event.failed, "{}", event.message)
                })
                .await;
            (collection.input, collection.warnings)
        }
    };

    let report = analyze(&input, &config);

    let regions = if args.compare_regions {
        let comparison = collector
            .compare_regions(&keyword, analysis.timeframe, today, &config.growth, args.demo)
            .await;
        warnings.extend(comparison.warnings);
        Some(comparison.regions)
    } else {
        None
    };

    if args.json {
        let payload = serde_json::json!({
            "report": report,
            "regions": regions,
            "warnings": warnings,
        });
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize report: {}", err))?;
        println!("{}", rendered);
        return Ok(());
    }

    print!("{}", render_text(&report, args.details));
    if let Some(regions) = regions.as_deref() {
        print!("\n{}", render_regions(regions));
    }
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in warnings {
            println!("- {}", warning);
        }
    }

    Ok(())
}

async fn run_rank(args: RankArgs, config: ScoringConfig) -> Result<(), String> {
    let keywords = prepare_keywords(&args.keywords);
    if keywords.is_empty() {
        return Err("missing keywords: pass --keywords a,b,c".to_string());
    }
    let analysis = parse_analysis(
        args.region.as_deref(),
        args.timeframe.as_deref(),
        &config.analysis,
    )?;
    let today = chrono::Utc::now().date_naive();
    let collector = SignalCollector::from_env(&config.providers);

    let ranking = rank_keywords(&collector, &keywords, &analysis, today, args.demo, &config).await;

    if args.json {
        let payload = serde_json::json!({
            "demo": ranking.demo,
            "ranking": ranking.entries,
            "warnings": ranking.warnings,
        });
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize ranking: {}", err))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "Ranking {} keywords ({} · {})",
        ranking.entries.len(),
        analysis.region.label(),
        analysis.timeframe.label()
    );
    print!("{}", render_ranking(&ranking.entries));
    if !ranking.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in ranking.warnings {
            println!("- {}", warning);
        }
    }

    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    if args.path.exists() && !args.force {
        return Err(format!(
            "{} already exists (pass --force to overwrite)",
            args.path.display()
        ));
    }
    ScoringConfig::default()
        .write(&args.path)
        .map_err(|err| err.to_string())?;
    println!("Wrote default config to {}", args.path.display());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
