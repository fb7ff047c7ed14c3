use std::io::{self, BufRead, Write};

use chess_rules::config::AppConfig;
use chess_rules::engine::{ChessError, Color, Command, Game, GameStatus};

fn main() {
    let config = AppConfig::from_env();

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_writer(io::stderr)
        .init();

    tracing::info!("chess-rules v{} starting", env!("CARGO_PKG_VERSION"));

    let mut game = Game::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run(&mut game, stdin.lock(), stdout.lock()) {
        tracing::error!("session aborted: {e}");
    }

    match game.save_history(&config.history_path) {
        Ok(()) => println!("Game saved to {}", config.history_path.display()),
        Err(e) => {
            eprintln!("Failed to save game: {e}");
            std::process::exit(1);
        }
    }
}

/// Turn loop: show the board, read a command, apply it. Returns on `exit`,
/// end of input, or when the game ends.
fn run<R: BufRead, W: Write>(game: &mut Game, mut input: R, mut out: W) -> Result<(), ChessError> {
    loop {
        writeln!(out, "{}", game.board())?;
        let side = match game.side_to_move() {
            Color::White => "White",
            Color::Black => "Black",
        };
        writeln!(out, "{side} to move")?;
        write!(
            out,
            "Enter a move (e.g. e2 e3), 'stalemate' for the stalemate position, or 'exit': "
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let status = match Command::parse(&line) {
            Ok(Command::Exit) => return Ok(()),
            Ok(Command::Stalemate) => game.setup_stalemate(),
            Ok(Command::Move { from, to }) => match game.play(from, to) {
                Ok(status) => status,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            },
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match status {
            GameStatus::Checkmate => {
                writeln!(out, "{}\nCheckmate!", game.board())?;
                return Ok(());
            }
            GameStatus::Stalemate => {
                writeln!(out, "{}\nStalemate!", game.board())?;
                return Ok(());
            }
            GameStatus::Check => writeln!(out, "Check!")?,
            GameStatus::Active => {}
        }
    }
}
