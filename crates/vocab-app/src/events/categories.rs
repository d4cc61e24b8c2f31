use kanal::AsyncSender;
use vocab_core::SyncError;
use vocab_types::{AppEvent, Page, UiEvent};

use crate::state::AppState;

pub async fn handle_category_event(
    state: &AppState,
    event: AppEvent,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match event {
        AppEvent::LoadCategories => return load(state, app_to_ui_tx).await,
        AppEvent::CreateCategory(draft) => {
            let outcome = state.categories.add(draft).await.map(|c| c.name);
            done(state, outcome, "Category added", app_to_ui_tx).await?;
        }
        AppEvent::UpdateCategory { id, draft } => {
            let outcome = state.categories.edit(id, draft).await.map(|c| c.name);
            done(state, outcome, "Category updated", app_to_ui_tx).await?;
        }
        AppEvent::DeleteCategory(id) => {
            let outcome = state.categories.delete(id).await.map(|id| id.to_string());
            done(state, outcome, "Category deleted", app_to_ui_tx).await?;
        }
        AppEvent::SearchCategories(text) => state.views().categories.set_search(text),
        AppEvent::CategoryPage(page) => {
            let data = state.categories.data();
            state.views().categories.set_page(page, &data);
        }
        other => {
            tracing::warn!("Not a category event: {:?}", other);
            return Ok(());
        }
    }

    show(state, app_to_ui_tx).await
}

/// List from the server and render the first page
pub async fn load(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    fetch(state, app_to_ui_tx).await?;
    state.views().categories.reset_page();
    show(state, app_to_ui_tx).await
}

/// List from the server without rendering
pub async fn fetch(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    if let Err(e) = state.categories.list().await {
        report(e, app_to_ui_tx).await?;
    }
    Ok(())
}

pub async fn show(state: &AppState, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    let data = state.categories.data();
    let event = {
        let views = state.views();
        UiEvent::ShowCategories {
            rows: views.categories.rows(&data).into_iter().cloned().collect(),
            page: views.categories.current_page(&data),
            total: views.categories.matching(&data).len(),
        }
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

async fn done(
    state: &AppState,
    outcome: Result<String, SyncError>,
    verb: &str,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match outcome {
        Ok(name) => {
            state.views().categories.reset_page();
            app_to_ui_tx
                .send(UiEvent::Notice(format!("{verb}: {name}")))
                .await?;
        }
        Err(e) => report(e, app_to_ui_tx).await?,
    }
    Ok(())
}

async fn report(error: SyncError, app_to_ui_tx: &AsyncSender<UiEvent>) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(UiEvent::Error {
            page: Page::Categories,
            message: error.message().to_string(),
        })
        .await?;
    Ok(())
}
