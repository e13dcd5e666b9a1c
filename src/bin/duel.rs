//! Terminal host for a single duel.
//!
//! Usage: `duel [config.json]`, then type commands:
//! `play N`, `confirm`, `cancel`, `restart`, `quit`.
//! Set `RUST_LOG=debug` to see the engine's diagnostics.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use duel_core::{BattleConfig, BattleEngine, BattleSession, BattleView, TokioScheduler};

enum Command {
    Play(usize),
    Confirm,
    Cancel,
    Restart,
    Quit,
    Help,
}

fn parse(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "play" | "p" => Command::Play(words.next()?.parse().ok()?),
        "confirm" | "c" => Command::Confirm,
        "cancel" | "x" => Command::Cancel,
        "restart" | "r" => Command::Restart,
        "quit" | "q" => Command::Quit,
        "help" | "h" | "?" => Command::Help,
        _ => return None,
    };
    Some(command)
}

fn print_view(view: &BattleView) {
    println!(
        "[player {} | enemy {}] {}",
        view.player_health, view.enemy_health, view.status_text
    );
    let cards: Vec<String> = view
        .player_cards
        .iter()
        .enumerate()
        .filter(|(i, _)| view.card_interactable.get(*i).copied().unwrap_or(false))
        .map(|(i, slot)| format!("[{i}] {}", slot.label))
        .collect();
    if !cards.is_empty() {
        println!("  cards: {}", cards.join("  "));
    }
    if view.target_pending {
        println!("  confirm to attack the enemy, cancel to choose again");
    }
}

fn print_help() {
    println!("commands: play N | confirm | cancel | restart | quit");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            BattleConfig::from_path(&path).with_context(|| format!("loading config {path}"))?
        }
        None => BattleConfig::default(),
    };

    let scheduler = TokioScheduler::current()?;
    let mut session = BattleSession::new(BattleEngine::new(config), scheduler);
    print_help();
    session.subscribe(print_view);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match parse(&line) {
            Some(Command::Play(index)) => session.play_card(index),
            Some(Command::Confirm) => session.confirm_target(),
            Some(Command::Cancel) => session.cancel_selection(),
            Some(Command::Restart) => {
                session.restart_game();
                Ok(())
            }
            Some(Command::Quit) => break,
            Some(Command::Help) | None => {
                print_help();
                Ok(())
            }
        };
        if let Err(err) = result {
            println!("  ignored: {err}");
        }
    }

    Ok(())
}
