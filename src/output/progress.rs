//! Spinner shown while a request is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

pub const UPLOADING: &str = "Uploading...";
pub const SEARCHING: &str = "Searching...";

fn spinner(enabled: bool, message: &'static str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Await `action` with a spinner on stderr; the spinner is cleared however
/// the action ends.
pub async fn with_spinner<F: Future>(enabled: bool, message: &'static str, action: F) -> F::Output {
    let bar = spinner(enabled, message);
    let output = action.await;
    bar.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hidden_spinner_passes_output_through() {
        let value = with_spinner(false, SEARCHING, async { 7 }).await;
        assert_eq!(value, 7);
    }
}
