//! Best-effort credits fetch. The text only ever goes to the log.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, window};

use crate::error::GameError;

/// What to do with a credits path on a given host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreditsPlan {
    InvalidPath,
    /// Served from `file://` or a loopback host; fetch is skipped.
    RunningLocally,
    Fetch(String),
}

pub fn is_running_locally(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1" | "")
}

impl CreditsPlan {
    pub fn decide(source: &str, hostname: &str) -> Self {
        if source.is_empty() {
            CreditsPlan::InvalidPath
        } else if is_running_locally(hostname) {
            CreditsPlan::RunningLocally
        } else {
            CreditsPlan::Fetch(source.to_string())
        }
    }
}

/// Log the credits for `source`, fetching them in the background when possible.
pub fn load(source: &str) {
    let hostname = window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default();
    match CreditsPlan::decide(source, &hostname) {
        CreditsPlan::InvalidPath => log::warn!("Credits file path incorrect."),
        CreditsPlan::RunningLocally => {
            log::info!("Cannot load credits file when game is running locally.");
            log::info!("Open CREDITS.txt in game folder to see the credits.");
        }
        CreditsPlan::Fetch(path) => wasm_bindgen_futures::spawn_local(async move {
            match fetch_text(&path).await {
                Ok(Some(text)) => log::info!("{text}"),
                Ok(None) => log::warn!("Could not fetch credits file."),
                Err(err) => log::warn!("Could not fetch credits file: {err}"),
            }
        }),
    }
}

/// `Ok(None)` when the server answers with anything but 200.
async fn fetch_text(path: &str) -> Result<Option<String>, GameError> {
    let win = window().ok_or(GameError::MissingGlobal("window"))?;
    let resp: Response = JsFuture::from(win.fetch_with_str(path)).await?.dyn_into()?;
    if resp.status() != 200 {
        return Ok(None);
    }
    let body = JsFuture::from(resp.text()?).await?;
    Ok(body.as_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_and_file_origins_count_as_local() {
        assert!(is_running_locally("localhost"));
        assert!(is_running_locally("127.0.0.1"));
        assert!(is_running_locally(""));
        assert!(!is_running_locally("cats.example.com"));
    }

    #[test]
    fn plan_checks_path_before_host() {
        assert_eq!(CreditsPlan::decide("", "cats.example.com"), CreditsPlan::InvalidPath);
        assert_eq!(CreditsPlan::decide("./CREDITS.txt", "localhost"), CreditsPlan::RunningLocally);
        assert_eq!(
            CreditsPlan::decide("./CREDITS.txt", "cats.example.com"),
            CreditsPlan::Fetch("./CREDITS.txt".to_string())
        );
    }
}
