//! Lifesim - Console driver
//!
//! Starts a game over the built-in storylets and reads commands from stdin.
//! Useful for playtesting content and checking determinism by hand.

use lifesim::core::error::Result;
use lifesim::entity::RawPlayerConfig;
use lifesim::session::{EventView, Snapshot};
use lifesim::Engine;

use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifesim=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let name = args.next().unwrap_or_else(|| "Alex".to_string());

    let mut engine = Engine::with_builtin_content()?;
    let snapshot = engine.new_game(
        seed,
        RawPlayerConfig::new(&name, "STORYTELLER", "BALANCED", false),
    )?;

    println!("\n=== LIFESIM ===");
    println!("Seed {} | {}", seed, name);
    println!();
    println!("Commands:");
    println!("  tick / t          - Advance one hour");
    println!("  step <n>          - Advance n hours");
    println!("  choose <id> / c   - Pick a choice on the current event");
    println!("  status / s        - Show a short status");
    println!("  full / f          - Show the full character sheet (JSON)");
    println!("  save <path>       - Save the session journal");
    println!("  load <path>       - Replay a saved journal");
    println!("  quit / q          - Exit");
    println!();

    display_status(&snapshot);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (input, ""),
        };

        let outcome = match command {
            "quit" | "q" => break,
            "tick" | "t" => engine.tick().and_then(|_| engine.snapshot()).map(Some),
            "step" => match rest.parse::<i64>() {
                Ok(n) => engine.step(n).map(Some),
                Err(_) => {
                    println!("Usage: step <hours>");
                    continue;
                }
            },
            "choose" | "c" => match current_storylet_id(&engine) {
                Some(storylet_id) => engine.choose_option(&storylet_id, rest, 0).map(Some),
                None => {
                    println!("Nothing to choose right now.");
                    continue;
                }
            },
            "status" | "s" => engine.snapshot().map(Some),
            "full" | "f" => engine.full_snapshot().and_then(|full| {
                println!("{}", serde_json::to_string_pretty(&full)?);
                Ok(None)
            }),
            "save" if !rest.is_empty() => engine.save_journal(Path::new(rest)).map(|_| {
                println!("Saved journal to {}", rest);
                None
            }),
            "load" if !rest.is_empty() => engine.load_journal(Path::new(rest)).map(Some),
            _ => {
                println!("Unknown command. Available: tick, step <n>, choose <id>, status, full, save <path>, load <path>, quit");
                continue;
            }
        };

        match outcome {
            Ok(Some(snapshot)) => display_status(&snapshot),
            Ok(None) => {}
            Err(e) => println!("Error ({:?}): {}", e.kind(), e),
        }
    }

    if let Ok(snapshot) = engine.snapshot() {
        println!(
            "\nGoodbye! {} reached age {} on day {}.",
            name, snapshot.age_years, snapshot.day
        );
    }
    Ok(())
}

fn current_storylet_id(engine: &Engine) -> Option<String> {
    engine
        .current_storylet()
        .ok()
        .flatten()
        .map(|event| event.storylet_id.to_string())
}

/// Display a brief status summary
fn display_status(snapshot: &Snapshot) {
    println!();
    println!(
        "--- Day {} | Age {} ({}) | Mood: {} | Karma: {} ---",
        snapshot.day,
        snapshot.age_years,
        snapshot.life_stage.as_str(),
        snapshot.mood_band.as_str(),
        snapshot.karma
    );
    let stats = &snapshot.stats;
    println!(
        "  Health {} | Energy {} | Wealth {} | Charisma {} | Curiosity {}",
        stats.health, stats.energy, stats.wealth, stats.charisma, stats.curiosity
    );

    for rel in snapshot.relationships.iter().take(3) {
        println!("  {} - {} ({:+.1})", rel.name, rel.state.as_str(), rel.strength);
    }

    if let Some(memory) = snapshot.memories.first() {
        println!("  Last memory: {}", memory);
    }

    if let Some(event) = &snapshot.current_event {
        display_event(event);
    }
}

fn display_event(event: &EventView) {
    println!();
    println!("*** {} ***", event.title);
    if !event.body.is_empty() {
        println!("{}", event.body);
    }
    for choice in &event.choices {
        println!("  [{}] {}", choice.id, choice.label);
    }
    println!("(expires at tick {})", event.expires_at_tick);
}
