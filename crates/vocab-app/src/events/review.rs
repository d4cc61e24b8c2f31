use kanal::AsyncSender;
use vocab_types::{CardView, Page, ReviewCommand, UiEvent};

use crate::state::AppState;

pub async fn handle_review(
    state: &AppState,
    command: ReviewCommand,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let words = state.words.data();
    state.views().review.clamp_to(&words);

    match command {
        ReviewCommand::SelectCategory(filter) => state.views().review.set_filter(filter),
        ReviewCommand::Next => state.views().review.next(&words),
        ReviewCommand::Previous => state.views().review.previous(&words),
        ReviewCommand::Flip => state.views().review.flip(),
        ReviewCommand::MarkLearned => {
            let review = state.views().review.clone();
            match review.mark_as_learned(&state.words).await {
                Ok(true) => {
                    app_to_ui_tx
                        .send(UiEvent::Notice("Marked as learned".into()))
                        .await?
                }
                Ok(false) => tracing::debug!("Nothing to mark"),
                Err(e) => {
                    app_to_ui_tx
                        .send(UiEvent::Error {
                            page: Page::Words,
                            message: e.message().to_string(),
                        })
                        .await?
                }
            }
        }
    }

    show(state, app_to_ui_tx).await
}

pub async fn show(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    let words = state.words.data();
    let card = {
        let mut views = state.views();
        views.review.clamp_to(&words);
        let review = &views.review;
        let progress = review.progress(&words);
        let face = review.current(&words).map(|w| {
            if review.is_flipped() {
                w.meaning.clone()
            } else {
                w.word.clone()
            }
        });

        CardView {
            face,
            flipped: review.is_flipped(),
            position: if progress.total == 0 {
                0
            } else {
                review.current_index() + 1
            },
            total: progress.total,
            learned: progress.learned,
            progress_percent: progress.percent(),
        }
    };
    app_to_ui_tx.send(UiEvent::ShowCard(card)).await?;
    Ok(())
}
