//! Word Search entry point
//!
//! Prints the category menu, then resolves and publishes a board.
//!
//! Usage: `word-search [CATEGORY] [--solved]`
//! - no category: continue with the first playable category
//! - `--solved`: mark the served board as completed

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Word Search starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library and use LocalStorageStore directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use word_search::progression::{self, SelectionPublisher};
    use word_search::{BoardCatalog, JsonFileStore, Result, Settings};

    pub fn run() -> Result<()> {
        let mut category = None;
        let mut solved = false;
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--solved" => solved = true,
                _ => category = Some(arg),
            }
        }

        let settings = Settings::load(Path::new(Settings::FILE_NAME));
        let catalog = BoardCatalog::load(&settings.catalog_path)?;
        let mut store = JsonFileStore::open(&settings.progress_path)?;
        let mut rng = settings.rng();

        println!("Categories:");
        for status in progression::menu(&catalog, &mut store)? {
            let state = if status.locked { "locked" } else { "open" };
            println!(
                "  {:<20} {:>7} {:>3.0}% {}",
                status.name,
                status.label,
                status.fraction * 100.0,
                state
            );
        }

        let mut publisher = SelectionPublisher::new();
        let selection = match category {
            Some(name) => {
                publisher.select_category(name.as_str());
                progression::enter(&name, &catalog, &mut store, &mut rng)?
            }
            None => progression::first_playable(&catalog, &mut store, &mut rng)?.selection,
        };
        publisher.publish(selection.clone());

        println!();
        println!(
            "{} - board {} of {}",
            selection.category,
            selection.index + 1,
            selection.total
        );
        if selection.board.time_limit_secs() > 0.0 {
            println!("Time limit: {:.0}s", selection.board.time_limit_secs());
        }
        print!("{}", selection.board);
        let words: Vec<&str> = selection.board.words().iter().map(|w| w.text.as_str()).collect();
        println!("Find: {}", words.join(", "));

        if solved {
            let index = progression::record_completion(&selection, &mut store)?;
            println!("Progress saved: {}/{}", index, selection.total);
        }

        Ok(())
    }
}
