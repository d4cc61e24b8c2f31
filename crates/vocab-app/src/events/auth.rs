use kanal::AsyncSender;
use vocab_core::AuthError;
use vocab_core::validation::RegistrationForm;
use vocab_types::{Page, UiEvent};

use super::navigate::handle_navigation;
use crate::state::AppState;

pub async fn handle_registration(
    state: &AppState,
    full_name: String,
    email: String,
    password: String,
    confirm_password: String,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let form = RegistrationForm {
        full_name,
        email,
        password,
        confirm_password,
    };

    match state.auth.submit_registration(&form).await {
        Ok(_) => {
            app_to_ui_tx
                .send(UiEvent::Notice("Registration successful!".into()))
                .await?;
            handle_navigation(state, "/login", app_to_ui_tx).await?;
        }
        // Only the first broken rule is shown
        Err(AuthError::Invalid(errors)) => {
            app_to_ui_tx
                .send(UiEvent::Error {
                    page: Page::Auth,
                    message: errors[0].message.to_string(),
                })
                .await?;
        }
        Err(e) => {
            app_to_ui_tx
                .send(UiEvent::Error {
                    page: Page::Auth,
                    message: e.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_login(
    state: &AppState,
    email: &str,
    password: &str,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    match state.auth.login(email, password).await {
        Ok(_) => {
            app_to_ui_tx
                .send(UiEvent::Notice("Login successful!".into()))
                .await?;
            handle_navigation(state, "/", app_to_ui_tx).await?;
        }
        Err(e) => {
            app_to_ui_tx
                .send(UiEvent::Error {
                    page: Page::Auth,
                    message: e.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_logout(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    if let Err(e) = state.auth.logout() {
        tracing::error!("Failed to clear stored session: {e}");
    }
    app_to_ui_tx
        .send(UiEvent::Notice("Logged out.".into()))
        .await?;
    handle_navigation(state, "/login", app_to_ui_tx).await
}
