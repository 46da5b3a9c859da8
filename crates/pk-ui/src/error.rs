// SPDX-License-Identifier: MIT
//
// Library errors.
//
// Geometry, packing and color errors come from building or painting the
// element tree and are returned from the call that detects them. I/O
// errors come from the surface and are fatal only when acquiring,
// flushing or releasing it.

use std::io;
use std::path::PathBuf;

/// Errors raised by the composition layer.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("invalid geometry {width}x{height}: both dimensions must be at least 1")]
    InvalidGeometry { width: u16, height: u16 },

    #[error("grid packing requires the `{0}` option")]
    MissingGridOption(&'static str),

    #[error("unknown pack mode `{0}` (expected row, column or grid)")]
    UnknownPackMode(String),

    #[error("unknown color pair `{0}`")]
    UnknownColor(String),

    #[error("no color pair indices left to allocate")]
    PairsExhausted,

    #[error("malformed config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("surface I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type UiResult<T> = Result<T, UiError>;

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = UiError::InvalidGeometry { width: 0, height: 3 };
        assert_eq!(
            err.to_string(),
            "invalid geometry 0x3: both dimensions must be at least 1"
        );
        assert_eq!(
            UiError::MissingGridOption("gwidth").to_string(),
            "grid packing requires the `gwidth` option"
        );
        assert_eq!(
            UiError::UnknownColor("accent".into()).to_string(),
            "unknown color pair `accent`"
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: UiError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, UiError::Io(_)));
    }
}
