use std::io;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::init_logging;
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::resolve_wordbank;
use wordle_game::{GuessEngine, game_loop};

fn main() {
    let cli = parse_cli();

    // Plain mode prints to the terminal, so it never logs to stderr.
    if let Some(path) = cli.log_destination()
        && let Err(e) = init_logging(Some(&path))
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    let wordbank = match resolve_wordbank(cli.wordbank_path.as_deref()) {
        Ok(wordbank) => wordbank,
        Err(e) => {
            eprintln!("Failed to load word bank: {e}");
            return;
        }
    };
    log::info!("Loaded {} words", wordbank.len());

    let mut engine = match cli.seed {
        Some(seed) => GuessEngine::with_seed(wordbank, seed),
        None => GuessEngine::from_entropy(wordbank),
    };

    let stats = if cli.plain {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut engine, &mut interface)
    } else {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut engine, &mut interface),
            Err(e) => {
                eprintln!("Failed to start terminal UI: {e}");
                return;
            }
        }
    };

    println!(
        "Games played: {}, won: {}",
        stats.games_played, stats.games_won
    );
}
