//! Headless Life Runner
//!
//! Plays one or many seeded lives with an automatic choice policy and prints
//! JSON summaries. Multi-seed sweeps run in parallel.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use lifesim::core::error::Result;
use lifesim::entity::PlayerConfig;
use lifesim::entity::{Archetype, Difficulty};
use lifesim::narrative::{HeatLevel, KarmaBand};
use lifesim::{GameSession, SimulationConfig, StoryletCatalog};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

/// Upper bound on choices made between two day steps
const MAX_CHOICES_PER_DAY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Always take the first offered choice
    First,
    /// Pick uniformly among offered choices
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON summaries
    Json,
    /// One line per seed
    Text,
}

/// Headless Life Runner - automated playthroughs for content balancing
#[derive(Parser, Debug)]
#[command(name = "life_runner")]
#[command(about = "Play seeded lives headlessly and output JSON summaries")]
struct Args {
    /// First seed; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Number of consecutive seeds to run
    #[arg(long, default_value_t = 1)]
    seeds: u64,

    /// Simulated days per life
    #[arg(long, default_value_t = 365)]
    days: u64,

    /// How choices are made
    #[arg(long, value_enum, default_value_t = Policy::First)]
    policy: Policy,

    /// Archetype of the simulated character
    #[arg(long, default_value = "STORYTELLER")]
    archetype: String,

    /// Difficulty of the simulated character
    #[arg(long, default_value = "BALANCED")]
    difficulty: String,

    /// Allow mature storylets
    #[arg(long)]
    content_mode: bool,

    /// Simulation config TOML (defaults if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storylet catalog TOML (built-in content if omitted)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Write the journal of each run into this directory
    #[arg(long)]
    journal_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct LifeSummary {
    seed: u64,
    days: u64,
    age_years: u32,
    life_stage: String,
    karma: i64,
    karma_band: KarmaBand,
    heat: f32,
    heat_level: HeatLevel,
    storylets_resolved: u64,
    recent_storylets: Vec<String>,
    health: i32,
    mood: i32,
    wealth: i32,
    top_relationships: Vec<(String, String)>,
    memories: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifesim=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("life_runner failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => SimulationConfig::load_from_path(path)?,
        None => SimulationConfig::default(),
    };
    let catalog = Arc::new(match &args.content {
        Some(path) => StoryletCatalog::load_from_toml(path)?,
        None => StoryletCatalog::builtin()?,
    });

    let archetype = Archetype::parse(&args.archetype).ok_or_else(|| {
        lifesim::SimError::InvalidConfig(format!("unknown archetype '{}'", args.archetype))
    })?;
    let difficulty = Difficulty::parse(&args.difficulty).ok_or_else(|| {
        lifesim::SimError::InvalidConfig(format!("unknown difficulty '{}'", args.difficulty))
    })?;
    let player = PlayerConfig::new("Runner", archetype, difficulty, args.content_mode);

    let first_seed = args.seed.unwrap_or_else(rand::random);
    let seeds: Vec<u64> = (0..args.seeds.max(1))
        .map(|i| first_seed.wrapping_add(i))
        .collect();

    tracing::info!(
        seeds = seeds.len(),
        days = args.days,
        storylets = catalog.len(),
        "Starting runs"
    );

    let summaries = seeds
        .par_iter()
        .map(|&seed| -> Result<LifeSummary> {
            let session = play_life(seed, &player, &catalog, &config, args)?;
            if let Some(dir) = &args.journal_dir {
                session
                    .journal()
                    .save(&dir.join(format!("life_{}.json", seed)))?;
            }
            Ok(summarize(&session, args.days))
        })
        .collect::<Result<Vec<_>>>()?;

    if args.format == OutputFormat::Text {
        for s in &summaries {
            println!(
                "seed {:>20} | age {:>3} {:<6} | karma {:>5} ({:?}) | heat {:>5.1} | resolved {}",
                s.seed,
                s.age_years,
                s.life_stage,
                s.karma,
                s.karma_band,
                s.heat,
                s.storylets_resolved
            );
        }
    } else if summaries.len() == 1 {
        println!("{}", serde_json::to_string_pretty(&summaries[0])?);
    } else {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}

fn play_life(
    seed: u64,
    player: &PlayerConfig,
    catalog: &Arc<StoryletCatalog>,
    config: &SimulationConfig,
    args: &Args,
) -> Result<GameSession> {
    let mut session =
        GameSession::new_game(seed, player.clone(), Arc::clone(catalog), config.clone())?;
    // Policy randomness stays outside the session stream
    let mut policy_rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed_cafe);

    for _ in 0..args.days {
        for _ in 0..MAX_CHOICES_PER_DAY {
            let Some(event) = session.current_event() else {
                break;
            };
            let picked = match args.policy {
                Policy::First => event.choices.first(),
                Policy::Random => event.choices.choose(&mut policy_rng),
            };
            let Some(choice) = picked else {
                break;
            };
            session.choose_option(event.storylet_id.as_str(), choice.id.as_str(), 0)?;
        }
        let ticks = i64::try_from(session.config().ticks_per_day).unwrap_or(24);
        session.step(ticks)?;
    }
    Ok(session)
}

fn summarize(session: &GameSession, days: u64) -> LifeSummary {
    let snapshot = session.snapshot();
    let full = session.full_snapshot();

    LifeSummary {
        seed: session.seed(),
        days,
        age_years: snapshot.age_years,
        life_stage: snapshot.life_stage.as_str().to_string(),
        karma: full.karma.value,
        karma_band: full.karma.band,
        heat: full.heat.value,
        heat_level: full.heat.level,
        storylets_resolved: session.director().history().resolved_count(),
        recent_storylets: session
            .director()
            .history()
            .recent()
            .map(|id| id.to_string())
            .collect(),
        health: snapshot.stats.health,
        mood: snapshot.stats.mood,
        wealth: snapshot.stats.wealth,
        top_relationships: snapshot
            .relationships
            .iter()
            .take(3)
            .map(|r| (r.name.clone(), r.state.as_str().to_string()))
            .collect(),
        memories: snapshot.memories,
    }
}
