use std::time::Duration;

use kanal::AsyncSender;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use vocab_types::{Page, UiEvent};

/// Clear a store's error after it has been visible for `delay`.
///
/// `error_of` returns a key that changes every time an error is set, even
/// when the message repeats. The timer restarts on each new key and is dropped when
/// the error goes away for another reason (manual dismiss, new request).
/// The UI is told each time an error disappears.
pub async fn dismiss_errors<S, K, E, C>(
    mut rx: watch::Receiver<S>,
    error_of: E,
    clear: C,
    delay: Duration,
    page: Page,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    K: PartialEq,
    E: Fn(&S) -> Option<K>,
    C: Fn(),
{
    let mut shown: Option<K> = None;
    let mut deadline = Instant::now();

    loop {
        let error = error_of(&rx.borrow_and_update());
        if error != shown {
            match &error {
                Some(_) => deadline = Instant::now() + delay,
                None => app_to_ui_tx.send(UiEvent::ErrorCleared(page)).await?,
            }
            shown = error;
        }

        if shown.is_some() {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    tracing::debug!("Auto-dismissing {:?} error", page);
                    clear();
                }
                changed = rx.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
                _ = cancel.cancelled() => return Ok(()),
            }
        } else {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                }
                _ = cancel.cancelled() => return Ok(()),
            }
        }
    }
}
