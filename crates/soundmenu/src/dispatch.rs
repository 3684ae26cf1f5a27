use soundmenu_core::config::Config;
use soundmenu_core::menu::{EntryAction, MenuItem};
use std::time::Duration;
use tracing::{info, warn};

/// Perform the selected entry's side effect. Called only after the lifecycle
/// has begun closing: the UI never waits on anything dispatched here.
pub fn dispatch(config: &Config, item: &MenuItem) {
    match &item.action {
        EntryAction::EditConfig => match crate::editor::open_config() {
            Ok(editor) => info!(editor, "opened config in editor"),
            Err(e) => warn!(error = %e, "could not open config in an editor"),
        },
        action => {
            let Some(url) = action.url(&config.endpoint.base_url) else {
                return;
            };
            let label = item.label.clone();
            let timeout = Duration::from_millis(config.endpoint.timeout_ms);
            // Detached worker, one per dispatch, never joined. It may
            // outlive the UI and simply finish on its own.
            std::thread::spawn(move || request_clip(&url, &label, timeout));
        }
    }
}

fn request_clip(url: &str, label: &str, timeout: Duration) {
    let client = match reqwest::blocking::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "building HTTP client failed");
            return;
        }
    };

    // Failures are log lines only; the menu is already gone either way.
    match client.get(url).send() {
        Ok(response) if response.status().is_success() => {
            info!(label, status = %response.status(), "clip request ok");
        }
        Ok(response) => {
            warn!(label, status = %response.status(), "playback service rejected request");
        }
        Err(e) => {
            warn!(label, error = %e, "clip request failed");
        }
    }
}
