//! Headless entry point: plays a seeded random run and prints the log.
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use game_content::ContentFactory;
use game_core::{GameConfig, SpawnTables};
use runtime::{Autoplay, FileSaveRepository, RuntimeConfig, Session};

const MAX_INTENTS: u32 = 2_000;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = RuntimeConfig::from_env();
    let _guard = runtime::logging::init(tracing::Level::INFO, config.log_dir.as_deref())?;

    let (game_config, tables) = match &config.content_dir {
        Some(dir) => {
            let content = ContentFactory::new(dir);
            (content.load_config()?, content.load_tables()?)
        }
        None => (GameConfig::default(), SpawnTables::default()),
    };

    let seed = config.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    });

    let repository = FileSaveRepository::new(config.resolved_save_dir())?;
    tracing::info!(dir = %repository.base_dir().display(), seed, "starting headless run");

    let mut session = Session::new(repository, game_config, tables);
    session.start_new_game(seed);
    let summary = Autoplay::new(seed.rotate_left(17)).run(&mut session, MAX_INTENTS)?;

    if let Some(state) = session.state() {
        for message in state.messages.iter() {
            println!("{}", message.text);
        }
    }
    println!(
        "seed {seed}: {} intents, {} turns, depth {}, {}",
        summary.intents,
        summary.turns,
        summary.depth,
        if summary.died { "died" } else { "still running" }
    );

    session.save()?;
    Ok(())
}
