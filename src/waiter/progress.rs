//! Progress display for long waits.
//!
//! Progress is purely cosmetic and goes to stdout only in interactive mode.
//! In every other mode the bar is hidden, so script consumers never see it.

use super::PollContext;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::warn;

const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

/// Refresh rate of the background progress renderer
pub const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Create the spinner used by the waiters, hidden unless `context` is interactive.
pub fn spinner(context: &PollContext) -> ProgressBar {
    if !context.interactive {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    bar.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar
}

/// A progress bar animated by its own tokio task.
///
/// Each indicator owns its stop channel, so concurrent waits never stop each
/// other's renderer. [`ProgressIndicator::stop`] waits for the renderer to
/// exit and clears the bar before returning.
pub struct ProgressIndicator {
    bar: ProgressBar,
    stop_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ProgressIndicator {
    pub fn start(bar: ProgressBar, tick: Duration) -> Self {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let renderer_bar = bar.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            loop {
                tokio::select! {
                    // a dropped sender also ends the renderer
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => renderer_bar.tick(),
                }
            }
            renderer_bar.finish_and_clear();
        });

        Self {
            bar,
            stop_tx: Some(stop_tx),
            handle,
        }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    /// Signal the renderer and block until it has actually stopped.
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Err(e) = (&mut self.handle).await {
            warn!("Progress renderer ended abnormally: {}", e);
        }

        // the renderer clears the bar itself unless it panicked
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_interactive_spinner_is_hidden() {
        let bar = spinner(&PollContext::non_interactive());
        assert!(bar.is_hidden());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_waits_for_renderer() {
        let bar = ProgressBar::hidden();
        let indicator = ProgressIndicator::start(bar.clone(), TICK_INTERVAL);
        indicator.set_message("waiting");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!bar.is_finished());

        indicator.stop().await;
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_indicators() {
        let first_bar = ProgressBar::hidden();
        let second_bar = ProgressBar::hidden();
        let first = ProgressIndicator::start(first_bar.clone(), TICK_INTERVAL);
        let second = ProgressIndicator::start(second_bar.clone(), TICK_INTERVAL);

        first.stop().await;
        assert!(first_bar.is_finished());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!second_bar.is_finished());

        second.stop().await;
        assert!(second_bar.is_finished());
    }
}
