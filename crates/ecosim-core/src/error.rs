//! Error types for the simulation.
//!
//! Every variant is raised while a world is being assembled. Once a world
//! exists, stepping it cannot fail.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid extent {rows}x{cols}: both dimensions must be positive")]
    InvalidExtent { rows: i64, cols: i64 },

    #[error("position ({row}, {col}) lies outside the {rows}x{cols} grid")]
    InvalidPosition {
        row: i64,
        col: i64,
        rows: u32,
        cols: u32,
    },

    #[error("invalid facing code {0}: expected 0 (north), 1 (east), 2 (south) or 3 (west)")]
    InvalidFacing(i64),

    #[error("invalid stability {0}: must be non-negative")]
    InvalidStability(i64),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_offending_values() {
        let err = Error::InvalidPosition {
            row: 4,
            col: -1,
            rows: 3,
            cols: 3,
        };
        assert_eq!(err.to_string(), "position (4, -1) lies outside the 3x3 grid");

        let err = Error::InvalidFacing(7);
        assert!(err.to_string().contains("facing code 7"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
