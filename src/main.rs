mod api;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trend_virality::config::ScoringConfig;
use trend_virality::scoring::{AttributionResult, GrowthResult};
use trend_virality::{
    format_float, format_number, format_percent, ContentType, HashtagVolumeSample, PostMetrics,
    PostSignals, ScoringEngine, ViralityResult,
};

use crate::api::{ScoreRequest, ScoreResponse};

#[derive(Parser)]
#[command(name = "trend-virality", about = "Hashtag trend and post virality scoring")]
struct Cli {
    /// Path to a TOML scoring config (defaults to SCORING_CONFIG_PATH or config/scoring.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Engagement attribution for a single post.
    Post(PostArgs),
    /// Growth, breakout and acceleration for a hashtag.
    Hashtag(HashtagArgs),
    /// Full virality score from a JSON request.
    Score(ScoreArgs),
    /// Write the default scoring config.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct PostArgs {
    #[arg(long)]
    views: i64,
    #[arg(long, default_value_t = 0)]
    likes: i64,
    #[arg(long, default_value_t = 0)]
    comments: i64,
    #[arg(long, default_value_t = 0)]
    shares: i64,
    #[arg(long, default_value_t = 0)]
    saves: i64,
    #[arg(long, default_value = "other")]
    content_type: String,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    sentiment: f64,
    #[arg(long)]
    cta: bool,
    #[arg(long, default_value_t = 0.0)]
    hook: f64,
    #[arg(long)]
    period_hours: Option<f64>,
}

#[derive(Args, Debug, Clone)]
struct HashtagArgs {
    #[arg(long)]
    posts_24h_ago: i64,
    #[arg(long)]
    posts_12h_ago: i64,
    #[arg(long)]
    posts_now: i64,
    #[arg(long)]
    posts_48h_ago: Option<i64>,
    #[arg(long)]
    window_hours: Option<f64>,
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    /// JSON request file; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/scoring.toml")]
    path: PathBuf,
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Command::InitConfig(args) = &cli.command {
        ScoringConfig::default().write(&args.path)?;
        println!("Wrote default config to {}", args.path.display());
        return Ok(());
    }

    let (config, config_path) = ScoringConfig::load(cli.config)?;
    if let Some(path) = config_path.filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded scoring config");
    }
    let engine = ScoringEngine::new(&config);

    match cli.command {
        Command::Post(args) => run_post(&engine, args),
        Command::Hashtag(args) => run_hashtag(&engine, args),
        Command::Score(args) => run_score(&engine, args),
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_post(engine: &ScoringEngine, args: PostArgs) -> Result<(), String> {
    let content_type = ContentType::from_str(&args.content_type)
        .ok_or_else(|| format!("invalid content type: {}", args.content_type))?;
    let post = PostMetrics {
        views: args.views,
        likes: args.likes,
        comments: args.comments,
        shares: args.shares,
        saves: args.saves,
        description_text: String::new(),
        content_type,
    };
    let signals = PostSignals {
        sentiment_score: args.sentiment,
        has_call_to_action: args.cta,
        hook_strength: args.hook,
    };

    let attribution = engine
        .engagement_attribution(&post, &signals, args.period_hours)
        .map_err(|err| err.to_string())?;
    print_attribution(&attribution);
    Ok(())
}

fn run_hashtag(engine: &ScoringEngine, args: HashtagArgs) -> Result<(), String> {
    let sample = HashtagVolumeSample {
        posts_now: args.posts_now,
        posts_12h_ago: args.posts_12h_ago,
        posts_24h_ago: args.posts_24h_ago,
        posts_48h_ago: args.posts_48h_ago,
    };
    let growth = engine
        .sample_growth(&sample, args.window_hours)
        .map_err(|err| err.to_string())?;
    print_growth(&growth);
    Ok(())
}

fn run_score(engine: &ScoringEngine, args: ScoreArgs) -> Result<(), String> {
    let payload = read_payload(args.input.as_deref())?;
    let request: ScoreRequest = serde_json::from_str(&payload)
        .map_err(|err| format!("failed to parse request: {}", err))?;
    let prepared = request.into_input()?;
    let report = engine.score(&prepared.input).map_err(|err| err.to_string())?;
    let response = ScoreResponse::from_report(report, prepared.creator_concentration);

    if args.json {
        let output = serde_json::to_string_pretty(&response)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        println!("{}", output);
        return Ok(());
    }

    print_result(&response.result);
    println!();
    print_attribution(&response.attribution);
    println!();
    print_growth(&response.growth);
    if let Some(concentration) = response.creator_concentration {
        println!(
            "\nCreators: {} unique | diversity {} | top creator share {}",
            concentration.unique_creators,
            format_float(concentration.diversity_index, 2),
            format_percent(concentration.top_creator_dominance)
        );
    }
    Ok(())
}

fn print_result(result: &ViralityResult) {
    println!(
        "Master virality score: {}/100 ({}, {} confidence)",
        format_float(result.master_virality_score, 1),
        result.prediction_label.label(),
        result.confidence.label()
    );
    println!("Action: {}", result.recommended_action);
    println!(
        "Breakout probability: {} | stage: {}",
        format_percent(result.breakout_probability),
        result.trend_stage.label()
    );
    println!(
        "Components: growth {} | acceleration {} | viral {} | quality {} | creators {}",
        format_float(result.components.growth, 1),
        format_float(result.components.acceleration, 1),
        format_float(result.components.viral, 1),
        format_float(result.components.quality, 1),
        format_float(result.components.creator, 1)
    );
    println!(
        "Signals: viral coefficient {} | hashtag momentum {} | engagement quality {} | drivers {}",
        format_float(result.viral_coefficient, 2),
        format_float(result.hashtag_momentum, 2),
        format_float(result.engagement_quality, 2),
        format_float(result.viral_driver_score, 2)
    );
}

fn print_attribution(attribution: &AttributionResult) {
    println!(
        "Engagement: {} total | rate {} | {} per hour",
        format_number(attribution.total_engagement as f64),
        format_percent(attribution.engagement_rate),
        format_float(attribution.engagement_velocity, 1)
    );
    println!(
        "Mix: likes {} | comments {} | shares {}",
        format_percent(attribution.likes_ratio),
        format_percent(attribution.comments_ratio),
        format_percent(attribution.shares_ratio)
    );
    println!(
        "Attribution: cta {} | hook {} | {} sentiment {}",
        format_float(attribution.cta_effectiveness, 4),
        format_float(attribution.hook_impact, 4),
        attribution.sentiment_tone.label(),
        format_float(attribution.sentiment_boost, 4)
    );
    if let Some(fit) = attribution.content_fit {
        println!(
            "Content fit ({}): {}",
            attribution.content_type.label(),
            format_float(fit, 2)
        );
    }
    println!(
        "Weighted viral score: {}",
        format_float(attribution.weighted_viral_score, 2)
    );
}

fn print_growth(growth: &GrowthResult) {
    println!(
        "Growth: {}% ({}% per hour)",
        format_float(growth.growth_velocity_pct, 1),
        format_float(growth.growth_velocity_per_hour, 2)
    );
    println!(
        "Increments: last 12h {} | prior 12h {}",
        growth.recent_increment, growth.prior_increment
    );
    println!(
        "Breakout {} | acceleration {}% | momentum {}",
        format_float(growth.breakout_score, 3),
        format_float(growth.acceleration, 1),
        format_float(growth.momentum_index, 3)
    );
}

fn read_payload(path: Option<&Path>) -> Result<String, String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    if buffer.trim().is_empty() {
        return Err("missing request: pass --input or pipe JSON on stdin".to_string());
    }
    Ok(buffer)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
