//! Contract with the external color-picker device.
//!
//! The device pushes `{"colors": [...], "semantics": [...]}` frames where
//! `semantics[i]` is the palette slot for `colors[i]`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerUpdate {
    pub colors: Vec<String>,
    pub semantics: Vec<usize>,
}

impl PickerUpdate {
    pub fn from_json(text: &str) -> Result<Self> {
        let update: Self = serde_json::from_str(text).map_err(ViewerError::PickerMessage)?;
        if update.colors.len() != update.semantics.len() {
            return Err(ViewerError::PickerMismatch {
                colors: update.colors.len(),
                semantics: update.semantics.len(),
            });
        }
        Ok(update)
    }

    /// `(slot, hex)` pairs in message order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &str)> {
        self.semantics
            .iter()
            .copied()
            .zip(self.colors.iter().map(String::as_str))
    }
}

/// Append `:default_port` when `host` names no port.
pub fn normalize_host(host: &str, default_port: u16) -> String {
    let host = host.trim();
    if host.contains(':') {
        host.to_owned()
    } else {
        format!("{host}:{default_port}")
    }
}

/// WebSocket URL for a picker host entered by the user.
pub fn socket_url(host: &str, default_port: u16) -> String {
    let host = normalize_host(host, default_port);
    if host.starts_with("ws://") || host.starts_with("wss://") {
        host
    } else {
        format!("ws://{host}")
    }
}
