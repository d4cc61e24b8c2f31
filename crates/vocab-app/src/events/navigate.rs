use kanal::AsyncSender;
use vocab_core::Navigation;
use vocab_core::routes::{self, Route};
use vocab_types::UiEvent;

use super::{categories, review, words};
use crate::state::AppState;

pub async fn handle_navigation(
    state: &AppState,
    path: &str,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let navigation = routes::resolve(path, &state.session);
    let route = navigation.route();
    state.views().route = route;

    if let Navigation::Redirect(target) = navigation {
        tracing::debug!("Redirecting {path} -> {}", target.path());
        app_to_ui_tx
            .send(UiEvent::Redirect(target.path().to_string()))
            .await?;
    }

    match route {
        Route::Home => {
            let greeting = match state.session.current() {
                Some(user) => format!("Welcome back, {}!", user.full_name),
                None => "Welcome! Log in or register to start learning.".to_string(),
            };
            app_to_ui_tx.send(UiEvent::Notice(greeting)).await?;
        }
        Route::Login => {
            app_to_ui_tx
                .send(UiEvent::Notice("Log in with your email and password.".into()))
                .await?;
        }
        Route::Register => {
            app_to_ui_tx
                .send(UiEvent::Notice("Create an account to get started.".into()))
                .await?;
        }
        Route::Categories => categories::load(state, app_to_ui_tx).await?,
        Route::Words => {
            let (listed, labels) = tokio::join!(
                words::fetch(state, app_to_ui_tx),
                categories::fetch(state, app_to_ui_tx)
            );
            listed?;
            labels?;
            words::show(state, app_to_ui_tx).await?;
        }
        Route::Flashcards => {
            let (listed, labels) = tokio::join!(
                words::fetch(state, app_to_ui_tx),
                categories::fetch(state, app_to_ui_tx)
            );
            listed?;
            labels?;
            review::show(state, app_to_ui_tx).await?;
        }
        Route::Quiz => app_to_ui_tx.send(UiEvent::Quiz).await?,
    }

    Ok(())
}
