mod cli;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};
use tracing_subscriber::EnvFilter;

use gambit::search::{format_score, search, search_parallel, Engine};
use gambit::sequence::{self, SequenceResult};
use gambit::types::{EngineConfig, Score};
use gambit::{annotate, pgn, GambitError};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let resolved = match resolve_position(&cli) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    match run(&cli, resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Either a bare loaded position (from `--pos`) or the result of replaying a
/// `--move` SAN sequence, which also carries per-move tactics to report.
enum Resolved {
    Position(Chess),
    Sequence(SequenceResult),
}

fn run(cli: &Cli, resolved: Resolved) -> Result<()> {
    let position = match &resolved {
        Resolved::Position(pos) => pos.clone(),
        Resolved::Sequence(seq) => {
            for step in &seq.steps {
                if step.tactics.is_empty() {
                    println!("{}: none", step.san);
                } else {
                    let names: Vec<String> = step.tactics.iter().map(|t| t.to_string()).collect();
                    println!("{}: {}", step.san, names.join(", "));
                }
            }
            let fen = Fen::from_position(&seq.position, EnPassantMode::Legal);
            println!("fen {fen}");
            seq.position.clone()
        }
    };

    let engine_side = cli.engine_color(position.turn())?;

    let config = EngineConfig {
        max_tt_entries: cli.max_tt_entries(),
        default_depth: cli.depth,
        default_time_secs: cli.time,
    };
    let time_limit = Duration::from_secs(cli.time);

    let result = if cli.parallel {
        search_parallel(&position, cli.depth, time_limit, cli.workers_or_default(), &config)
    } else {
        let mut engine = Engine::new(&config);
        search(&mut engine, &position, cli.depth, time_limit)
    };

    let Some(best_move) = result.best_move else {
        println!("no legal moves");
        return Ok(());
    };

    // §4.7: scores are reported from the side to move's point of view;
    // negate when the engine is analyzing for the other side.
    let display_score: Score = if engine_side == position.turn() {
        result.score
    } else {
        -result.score
    };

    println!("bestmove {best_move}");
    println!("score {}", format_score(display_score));
    println!("depth {}", result.depth);
    println!("nodes {}", result.nodes);

    let pv: Vec<String> = result.pv.iter().map(|m| m.to_string()).collect();
    println!("pv {}", pv.join(" "));

    if cli.annotate {
        let tactics = annotate::annotate(&position, &best_move);
        if tactics.is_empty() {
            println!("annotation: none");
        } else {
            let names: Vec<String> = tactics.iter().map(|t| t.to_string()).collect();
            println!("annotation: {}", names.join(", "));
        }
    }

    Ok(())
}

fn resolve_position(cli: &Cli) -> Result<Resolved, GambitError> {
    if let Some(moves) = &cli.move_sequence {
        return sequence::evaluate_sequence(moves).map(Resolved::Sequence);
    }
    load_position(cli).map(Resolved::Position)
}

fn load_position(cli: &Cli) -> Result<Chess, GambitError> {
    if cli.position.trim() == "start" {
        return Ok(Chess::default());
    }

    let format = if cli.format == "auto" {
        guess_format(&cli.position)
    } else {
        cli.format.as_str()
    };

    match format {
        "fen" => {
            let fen: Fen = cli
                .position
                .parse()
                .map_err(|e| GambitError::ParsePosition(format!("{e}")))?;
            fen.into_position(CastlingMode::Standard)
                .map_err(|e| GambitError::ParsePosition(format!("{e}")))
        }
        "pgn" => pgn::replay(&cli.position),
        other => Err(GambitError::ParsePosition(format!("unknown position format: {other}"))),
    }
}

fn guess_format(text: &str) -> &'static str {
    if text.split('/').count() >= 8 {
        "fen"
    } else {
        "pgn"
    }
}
