//! Path routing between the two screens

use crate::error::{PortalError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Submit,
    Search,
}

impl Route {
    /// `/` and `/submit` both land on the submit screen.
    pub fn resolve(path: &str) -> Result<Self> {
        match path.trim() {
            "/" | "/submit" => Ok(Route::Submit),
            "/search" => Ok(Route::Search),
            other => Err(PortalError::InvalidInput(format!("no route for path: {}", other))),
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Submit => "/submit",
            Route::Search => "/search",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
