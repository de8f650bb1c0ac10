// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for raster analysis.

use thiserror::Error;

/// Result type for raster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a pixel buffer
#[derive(Error, Debug)]
pub enum Error {
    #[error("RGBA buffer size mismatch: expected {expected} bytes for {width}x{height}, got {actual}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}
