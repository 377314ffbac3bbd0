//! Opening outbound links in the user's browser.

use std::process::Command;

use crate::domain::{AppError, Result};

/// Opens a URL in a new browsing context.
pub trait LinkOpener {
    /// Open `url`.
    ///
    /// # Errors
    /// Returns error if the link cannot be handed to the system.
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Uses the platform's default URL handler.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        let status = Self::command(url)
            .status()
            .map_err(|e| AppError::io("Failed to launch the system URL handler", e))?;

        if !status.success() {
            return Err(AppError::Config {
                message: format!("URL handler exited with {status}"),
            });
        }

        tracing::debug!("Opened outbound link");
        Ok(())
    }
}
