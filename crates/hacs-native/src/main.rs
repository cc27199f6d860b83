use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use hacs_core::{
    ChoreographyConfig, ClassificationResult, FrameClock, ImpactScene, Outcome,
    PredictionResponse, ResultFeed, SceneEventKind,
};

mod timeline;

/// Replay a classifier result through the impact choreography at a fixed frame rate.
#[derive(Parser, Debug)]
#[command(name = "hacs-sim", version)]
struct Args {
    /// Treat the result as hazardous (crash sequence) instead of safe.
    #[arg(long)]
    hazardous: bool,

    /// Classifier confidence reported with the result.
    #[arg(long, default_value_t = 0.5)]
    probability: f32,

    /// Raw `/predict` response JSON; overrides --hazardous/--probability.
    #[arg(long)]
    response: Option<String>,

    /// Choreography config JSON file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    #[arg(long, default_value_t = 12.0)]
    seconds: f64,

    /// Seed for debris generation and jitter.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Deliver the same result again at this simulated time, restarting the run.
    #[arg(long)]
    replay_at: Option<f64>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ChoreographyConfig> {
    let Some(path) = path else {
        return Ok(ChoreographyConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ChoreographyConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn read_result(args: &Args) -> anyhow::Result<ClassificationResult> {
    match &args.response {
        Some(json) => {
            let resp: PredictionResponse =
                serde_json::from_str(json).context("parsing --response")?;
            Ok(ClassificationResult::try_from(resp)?)
        }
        None => Ok(ClassificationResult::new(args.hazardous, args.probability)?),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be positive (got {})", args.fps);
    }

    let config = load_config(args.config.as_ref())?;
    let result = read_result(&args)?;
    log::info!(
        "hacs-sim starting: hazardous={} p={:.3} fps={} seconds={}",
        result.hazardous(),
        result.probability(),
        args.fps,
        args.seconds
    );

    let mut feed = ResultFeed::new();
    let mut scene = ImpactScene::seeded(config, Outcome::Safe, args.seed)?;
    scene.apply_result(&mut feed, result);

    // Stand-ins for the page's visibility and audio collaborators.
    scene.subscribe(SceneEventKind::Impact, |_| log::info!("[audio] play impact cue"));
    scene.subscribe(SceneEventKind::Midpoint, |_| log::info!("[view] hide planet"));
    scene.subscribe(SceneEventKind::NearEnd, |_| log::info!("[view] cleanup hook"));

    let mut clock = FrameClock::new();
    let mut replay = timeline::Replay::new(args.replay_at);
    let entries = timeline::simulate(&mut scene, &mut clock, args.fps, args.seconds, |scene, t| {
        if replay.due(t) {
            let token = scene.apply_result(&mut feed, result);
            log::info!("replayed result at {:.3}s (token {})", t, token.value());
        }
    });

    if entries.is_empty() {
        println!("no crash sequence (outcome: {:?})", scene.outcome());
    }
    for entry in &entries {
        println!("{:>8.3}s  {}", entry.at, timeline::describe(&entry.event));
    }
    let bg = scene.background();
    println!(
        "final: phase={:?} planet_visible={} planet_frozen={}",
        scene.phase(),
        bg.visible,
        bg.frozen
    );
    Ok(())
}
