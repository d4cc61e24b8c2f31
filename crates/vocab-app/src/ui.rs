use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use vocab_types::{AppEvent, CardView, UiEvent};

use crate::commands::{self, Command, HELP};

/// Terminal front end: reads commands from stdin and prints app updates
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{HELP}");

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::warn!("App channel closed");
                    break;
                };
                render(&event);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Send(event)) => ui_to_app_tx.send(event).await?,
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => {}
                    Err(usage) => println!("{usage}"),
                }
            }
            _ = cancel.cancelled() => break,
        }
    }

    tracing::info!("UI loop stopping");
    Ok(())
}

fn render(event: &UiEvent) {
    match event {
        UiEvent::BackendReady => println!("-- connected --"),
        UiEvent::Redirect(path) => println!("-> {path}"),
        UiEvent::Notice(text) => println!("{text}"),
        UiEvent::Error { page, message } => println!("[{page:?} error] {message}"),
        UiEvent::ErrorCleared(page) => println!("[{page:?} error dismissed]"),
        UiEvent::ShowCategories { rows, page, total } => {
            println!("Categories (page {page}, {total} matching)");
            if rows.is_empty() {
                println!("  (none)");
            }
            for row in rows {
                println!("  #{:<6} {:<24} {}", row.id, row.name, row.description);
            }
        }
        UiEvent::ShowWords(rows) => {
            println!("Words ({})", rows.len());
            for row in rows {
                let mark = if row.is_learned { "x" } else { " " };
                println!(
                    "  [{mark}] #{:<6} {:<20} {:<28} {}",
                    row.id, row.word, row.meaning, row.category
                );
            }
        }
        UiEvent::ShowCard(card) => render_card(card),
        UiEvent::Quiz => println!("Quiz mode is coming soon."),
    }
}

fn render_card(card: &CardView) {
    match &card.face {
        Some(face) => {
            let side = if card.flipped { "meaning" } else { "word" };
            println!("  [{}/{}] {face} ({side})", card.position, card.total);
        }
        None => println!("  No words to review."),
    }
    println!(
        "  learned {}/{} ({}%)",
        card.learned, card.total, card.progress_percent
    );
}
