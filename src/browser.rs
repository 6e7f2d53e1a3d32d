//! Hand download links to the system browser

use crate::error::{PortalError, Result};
use log::info;

/// Signature of a link opener, swappable so the shell can run headless.
pub type LinkOpener = fn(&str) -> Result<()>;

pub fn open_in_browser(url: &str) -> Result<()> {
    info!("Opening {}", url);
    webbrowser::open(url).map_err(|e| PortalError::Browser(e.to_string()))
}
