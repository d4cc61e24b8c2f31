use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vocab_core::{AuthState, CollectionState};
use vocab_types::{AppEvent, Category, Page, UiEvent, Word};

use crate::events::event_loop;
use crate::state::AppState;
use crate::status::dismiss_errors;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // list renders
            ui_to_app: kanal::bounded_async(64),  // typed commands
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();
        let delay = self.state.config.read().await.ui.error_dismiss();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Error banners
        let auth = self.state.auth.clone();
        tasks.spawn(dismiss_errors(
            self.state.auth.subscribe(),
            |s: &AuthState| s.error_key(),
            move || auth.clear_error(),
            delay,
            Page::Auth,
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        let categories = self.state.categories.clone();
        tasks.spawn(dismiss_errors(
            self.state.categories.subscribe(),
            |s: &CollectionState<Category>| s.error_key(),
            move || categories.clear_error(),
            delay,
            Page::Categories,
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        let words = self.state.words.clone();
        tasks.spawn(dismiss_errors(
            self.state.words.subscribe(),
            |s: &CollectionState<Word>| s.error_key(),
            move || words.clear_error(),
            delay,
            Page::Words,
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        self.channels.ui_to_app.0.close();
    }
}
