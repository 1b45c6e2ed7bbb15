use clap::Parser;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use stud_rs::agents::{AgentTable, BotAgent, BotProfile, ConsoleAgent};
use stud_rs::config::GameConfig;
use stud_rs::game::{Game, GameError};
use stud_rs::tui::{TuiAgent, TuiSession};
use tracing::{event, Level};
use tracing_subscriber::EnvFilter;

/// Five-card stud at the terminal: human seats first, bots after.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seats at the table, humans included
    #[arg(short, long, default_value_t = 4)]
    players: usize,
    /// Human seats
    #[arg(long, default_value_t = 1)]
    humans: usize,
    /// Starting chips per player
    #[arg(short, long, default_value_t = 1000)]
    chips: u64,
    /// Seed for shuffling and bots
    #[arg(short, long)]
    seed: Option<u64>,
    /// Stop after this many hands
    #[arg(long)]
    max_hands: Option<usize>,
    /// Prompt on stdin/stdout instead of the full-screen table
    #[arg(long)]
    console: bool,
    /// Write logs here; filter with RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("{humans} human seats do not fit at a table of {players}")]
    Seats { humans: usize, players: usize },
}

fn init_logging(log_file: Option<&PathBuf>, console: bool) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // the full-screen table owns stdout, so it only logs to a file
        None if console => {
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
        }
        None => {}
    }
    Ok(())
}

fn config_from(cli: &Cli) -> GameConfig {
    let mut config = GameConfig::new(cli.players).with_starting_chips(cli.chips);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(hands) = cli.max_hands {
        config = config.with_max_hands(hands);
    }
    let names = (0..cli.players).map(|seat| {
        if seat < cli.humans {
            if cli.humans == 1 { "You".to_string() } else { format!("Player {}", seat + 1) }
        } else {
            format!("Bot {}", seat + 1 - cli.humans)
        }
    });
    config.with_player_names(names.collect::<Vec<_>>())
}

fn seat_bots(table: &mut AgentTable, cli: &Cli) {
    for seat in cli.humans..cli.players {
        let mut profile = BotProfile::default().with_bet_unit((cli.chips / 50).max(1));
        if let Some(seed) = cli.seed {
            profile = profile.with_seed(seed.wrapping_add(seat as u64));
        }
        table.set_agent(seat, Some(Box::new(BotAgent::new(profile))));
    }
}

fn play_console(cli: &Cli, mut game: Game) -> Result<(), AppError> {
    let mut table = AgentTable::for_seats(cli.players);
    for seat in 0..cli.humans {
        table.set_agent(seat, Some(Box::new(ConsoleAgent::stdio())));
    }
    seat_bots(&mut table, cli);
    let outcome = game.run_until_one_player_remains(&mut table)?;
    match outcome.champion.and_then(|seat| game.player(seat)) {
        Some(p) => println!("{} wins the game with {} chips.", p.name(), p.chips()),
        None => {
            println!("Stopped after {} hands.", outcome.hands_played);
            for (name, chips) in &outcome.standings {
                println!("  {name}: {chips}");
            }
        }
    }
    Ok(())
}

fn play_tui(cli: &Cli, mut game: Game) -> Result<(), AppError> {
    let session = TuiSession::start()?;
    let mut table = AgentTable::for_seats(cli.players);
    let bet_unit = (cli.chips / 50).max(1);
    for seat in 0..cli.humans {
        table.set_agent(seat, Some(Box::new(TuiAgent::new(session.clone(), bet_unit))));
    }
    seat_bots(&mut table, cli);

    let mut played = 0;
    while game.players().len() > 1 && !session.quit_requested() {
        if cli.max_hands.is_some_and(|cap| played >= cap) {
            break;
        }
        // nobody left to play against the bots
        if cli.humans > 0 && (0..cli.humans).all(|seat| game.player(seat).is_none()) {
            break;
        }
        game.play_one_hand(&mut table)?;
        played += 1;
    }
    drop(table);
    drop(session);
    for p in game.players() {
        println!("{}: {} chips", p.name(), p.chips());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    if cli.humans > cli.players {
        return Err(AppError::Seats { humans: cli.humans, players: cli.players });
    }
    let game = Game::new(config_from(&cli))?;
    event!(Level::INFO, players = cli.players, humans = cli.humans, "starting");
    if cli.console || cli.humans == 0 || !io::stdout().is_terminal() {
        play_console(&cli, game)
    } else {
        play_tui(&cli, game)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_file.as_ref(), cli.console) {
        eprintln!("cannot open log file: {e}");
        return ExitCode::FAILURE;
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            event!(Level::ERROR, error = %e, "fatal");
            eprintln!("stud-rs: {e}");
            ExitCode::FAILURE
        }
    }
}
