use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chess_core::{Color, GameStatus, Move};
use chess_engine::config::DEFAULT_DEPTH;
use chess_engine::{ChessAI, EngineConfig, Game, GameConfig, MoveVerdict};
use log::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: minimax-chess [--color white|black] [--depth N] \
                     [--fen <position>] [--self-play] [--serial]";

/// Longest self-play game before giving up on a result.
const SELF_PLAY_PLIES: usize = 300;

struct Options {
    human: Color,
    depth: u8,
    fen: Option<String>,
    self_play: bool,
    parallel: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        human: Color::White,
        depth: DEFAULT_DEPTH,
        fen: None,
        self_play: false,
        parallel: true,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--color" => {
                let value = iter.next().context("--color needs a value")?;
                options.human = match value.to_ascii_lowercase().as_str() {
                    "white" | "w" => Color::White,
                    "black" | "b" => Color::Black,
                    other => bail!("unknown color {other:?}"),
                };
            }
            "--depth" => {
                let value = iter.next().context("--depth needs a value")?;
                options.depth = value
                    .parse()
                    .with_context(|| format!("invalid depth {value:?}"))?;
            }
            "--fen" => {
                let value = iter.next().context("--fen needs a value")?;
                options.fen = Some(value.clone());
            }
            "--self-play" => options.self_play = true,
            "--serial" => options.parallel = false,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument {other:?}\n{USAGE}"),
        }
    }
    Ok(options)
}

fn print_status(status: GameStatus) {
    match status {
        GameStatus::Ongoing => {}
        GameStatus::Checkmate { winner } => println!("Checkmate, {winner} wins."),
        GameStatus::Stalemate => println!("Stalemate, the game is drawn."),
        GameStatus::DeadPosition => println!("Dead position, the game is drawn."),
    }
}

fn self_play(options: &Options) -> Result<()> {
    let engine_config = |color| {
        EngineConfig::new(color, options.depth).with_parallel(options.parallel)
    };
    let mut game = Game::new(GameConfig {
        engine: Some(engine_config(Color::Black)),
        fen: options.fen.clone(),
    })?;
    let white = ChessAI::with_config(engine_config(Color::White));

    println!("{}", game.board());
    for _ in 0..SELF_PLAY_PLIES {
        if game.status().is_over() {
            break;
        }
        if game.is_engine_turn() {
            let Some((mv, _)) = game.play_engine_move()? else {
                break;
            };
            println!("black plays {mv}");
        } else {
            let Some(mv) = white.get_move(game.board())? else {
                break;
            };
            if let MoveVerdict::Rejected(reason) = game.try_play(Color::White, mv)? {
                bail!("engine move {mv} rejected: {reason}");
            }
            println!("white plays {mv}");
        }
        println!("{}", game.board());
    }

    if !game.status().is_over() {
        println!("No result after {SELF_PLAY_PLIES} plies.");
    }
    print_status(game.status());
    Ok(())
}

fn play_against_engine(options: &Options) -> Result<()> {
    let engine = EngineConfig::new(!options.human, options.depth).with_parallel(options.parallel);
    let mut game = Game::new(GameConfig {
        engine: Some(engine),
        fen: options.fen.clone(),
    })?;
    info!(
        "you play {}, engine plays {} at depth {}",
        options.human, engine.color, engine.depth
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if let Some((mv, _)) = game.play_engine_move()? {
            println!("engine plays {mv}");
        }
        println!("{}", game.board());
        if game.status().is_over() {
            print_status(game.status());
            println!("Type 'reset' to play again or 'quit' to leave.");
        }

        print!("{}> ", game.current_player());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read from stdin")?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "reset" => {
                game.reset()?;
                continue;
            }
            "fen" => {
                println!("{}", game.board().to_fen());
                continue;
            }
            input => {
                let mv = match Move::from_str(input) {
                    Ok(mv) => mv,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                if let MoveVerdict::Rejected(reason) = game.try_play(options.human, mv)? {
                    println!("Move {mv} rejected: {reason}");
                }
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.self_play {
        self_play(&options)
    } else {
        play_against_engine(&options)
    }
}
