use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use vocab_core::Navigation;
use vocab_core::routes::{self, Route};
use vocab_types::{AppEvent, Page, UiEvent};

use crate::state::AppState;

pub mod auth;
pub mod categories;
pub mod navigate;
pub mod review;
pub mod words;

use auth::{handle_login, handle_logout, handle_registration};
use categories::handle_category_event;
use navigate::handle_navigation;
use review::handle_review;
use words::handle_word_event;

/// App's main loop.
///
/// Every event is handled on its own task so a slow request never holds
/// up the next command; requests against one collection may overlap.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(UiEvent::BackendReady).await?;
    handle_navigation(&state, "/", &app_to_ui_tx).await?;

    tracing::info!("[EVENT_LOOP] Waiting for events");
    while let Ok(event) = ui_to_app_rx.recv().await {
        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);

        let state = state.clone();
        let tx = app_to_ui_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_events(state, &tx, event).await {
                tracing::error!("Event handler failed: {e}");
            }
        });
    }

    tracing::info!("[EVENT_LOOP] UI channel closed, stopping");
    Ok(())
}

pub async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    if let Some(route) = required_route(&event) {
        if let Navigation::Redirect(target) = routes::resolve(route.path(), &state.session) {
            tracing::info!("Blocked {:?} outside {}", event, route.path());
            app_to_ui_tx
                .send(UiEvent::Redirect(target.path().to_string()))
                .await?;
            return Ok(());
        }
    }

    match event {
        AppEvent::Navigate(path) => handle_navigation(&state, &path, app_to_ui_tx).await?,
        AppEvent::Register {
            full_name,
            email,
            password,
            confirm_password,
        } => {
            handle_registration(
                &state,
                full_name,
                email,
                password,
                confirm_password,
                app_to_ui_tx,
            )
            .await?
        }
        AppEvent::Login { email, password } => {
            handle_login(&state, &email, &password, app_to_ui_tx).await?
        }
        AppEvent::Logout => handle_logout(&state, app_to_ui_tx).await?,
        event @ (AppEvent::LoadCategories
        | AppEvent::CreateCategory(_)
        | AppEvent::UpdateCategory { .. }
        | AppEvent::DeleteCategory(_)
        | AppEvent::SearchCategories(_)
        | AppEvent::CategoryPage(_)) => handle_category_event(&state, event, app_to_ui_tx).await?,
        event @ (AppEvent::LoadWords
        | AppEvent::CreateWord(_)
        | AppEvent::UpdateWord { .. }
        | AppEvent::DeleteWord(_)
        | AppEvent::SearchWords { .. }) => handle_word_event(&state, event, app_to_ui_tx).await?,
        AppEvent::Review(command) => handle_review(&state, command, app_to_ui_tx).await?,
        AppEvent::DismissError(page) => match page {
            Page::Auth => state.auth.clear_error(),
            Page::Categories => state.categories.clear_error(),
            Page::Words => state.words.clear_error(),
        },
    }

    Ok(())
}

/// Screen an event belongs to, for events that need a session
fn required_route(event: &AppEvent) -> Option<Route> {
    match event {
        AppEvent::LoadCategories
        | AppEvent::CreateCategory(_)
        | AppEvent::UpdateCategory { .. }
        | AppEvent::DeleteCategory(_)
        | AppEvent::SearchCategories(_)
        | AppEvent::CategoryPage(_) => Some(Route::Categories),
        AppEvent::LoadWords
        | AppEvent::CreateWord(_)
        | AppEvent::UpdateWord { .. }
        | AppEvent::DeleteWord(_)
        | AppEvent::SearchWords { .. } => Some(Route::Words),
        AppEvent::Review(_) => Some(Route::Flashcards),
        _ => None,
    }
}
