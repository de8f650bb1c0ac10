// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types shared across the engine crates.

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading plan-space inputs
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid plan document: {0}")]
    InvalidDocument(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the host-provided fetch/decode sources.
///
/// The engine never propagates these to its caller; a failed load degrades
/// to the next-lower-fidelity reconstruction path.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Decode failed for {url}: {reason}")]
    Decode { url: String, reason: String },
}
