use kanal::AsyncSender;
use vocab_core::words::{self as word_list, category_label};
use vocab_types::{AppEvent, Page, UiEvent, WordRow};

use crate::state::AppState;

pub async fn handle_word_event(
    state: &AppState,
    event: AppEvent,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let outcome = match event {
        AppEvent::LoadWords => {
            fetch(state, app_to_ui_tx).await?;
            return show(state, app_to_ui_tx).await;
        }
        AppEvent::CreateWord(draft) => state
            .words
            .add(draft)
            .await
            .map(|w| format!("Word added: {}", w.word)),
        AppEvent::UpdateWord { id, mut draft } => {
            // Editing text must not reset review progress
            draft.is_learned = state.words.find(&id).is_some_and(|w| w.is_learned);
            state
                .words
                .update(id, draft)
                .await
                .map(|w| format!("Word updated: {}", w.word))
        }
        AppEvent::DeleteWord(id) => state
            .words
            .delete(id)
            .await
            .map(|id| format!("Word deleted: {id}")),
        AppEvent::SearchWords { text, filter } => {
            {
                let mut views = state.views();
                views.word_search = text;
                views.word_filter = filter;
            }
            return show(state, app_to_ui_tx).await;
        }
        other => {
            tracing::warn!("Not a word event: {:?}", other);
            return Ok(());
        }
    };

    match outcome {
        Ok(notice) => app_to_ui_tx.send(UiEvent::Notice(notice)).await?,
        Err(e) => {
            app_to_ui_tx
                .send(UiEvent::Error {
                    page: Page::Words,
                    message: e.message().to_string(),
                })
                .await?
        }
    }

    show(state, app_to_ui_tx).await
}

/// List from the server without rendering
pub async fn fetch(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    if let Err(e) = state.words.list().await {
        app_to_ui_tx
            .send(UiEvent::Error {
                page: Page::Words,
                message: e.message().to_string(),
            })
            .await?;
    }
    Ok(())
}

pub async fn show(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    let words = state.words.data();
    let categories = state.categories.data();
    let rows = {
        let views = state.views();
        word_list::search(&words, &views.word_search, &views.word_filter)
            .into_iter()
            .map(|w| WordRow {
                id: w.id.clone(),
                word: w.word.clone(),
                meaning: w.meaning.clone(),
                category: category_label(w, &categories).to_string(),
                is_learned: w.is_learned,
            })
            .collect()
    };
    app_to_ui_tx.send(UiEvent::ShowWords(rows)).await?;
    Ok(())
}
