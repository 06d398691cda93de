//! Core error types for agonizer.

use thiserror::Error;

/// Result type alias using `AgonyError`.
pub type AgonyResult<T> = std::result::Result<T, AgonyError>;

/// Core error type for agonizer operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgonyError {
    /// A graph was requested with no nodes, or with more nodes than its
    /// adjacency relation can address.
    #[error("InvalidNodeCount: cannot build a graph over {0} nodes")]
    InvalidNodeCount(usize),

    /// Two graphs over different node sets were combined.
    #[error("SizeMismatch: graphs have {left} and {right} nodes")]
    SizeMismatch {
        /// Node count of the left operand.
        left: usize,
        /// Node count of the right operand.
        right: usize,
    },

    /// An edge endpoint outside `1..=node_count`.
    #[error("NodeOutOfRange: node {node} is not in 1..={node_count}")]
    NodeOutOfRange {
        /// The offending node.
        node: usize,
        /// Node count of the graph.
        node_count: usize,
    },

    /// Invalid parameter provided.
    #[error("InvalidParameter: {0}")]
    InvalidParameter(String),

    /// Malformed problem text.
    #[error("ParseError: line {line}: {message}")]
    ParseError {
        /// 1-based line number of the offending input.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Internal invariant violated (bug in agonizer).
    #[error("InternalError: {0}")]
    InternalError(String),

    /// IO error.
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AgonyError {
    /// Create a new `InvalidParameter` error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create a new `ParseError` for the given 1-based line.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        Self::ParseError {
            line,
            message: msg.into(),
        }
    }

    /// Create a new `InternalError`.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::InternalError(msg.into())
    }

    /// Create a `SizeMismatch` error.
    pub fn size_mismatch(left: usize, right: usize) -> Self {
        Self::SizeMismatch { left, right }
    }

    /// Create a `NodeOutOfRange` error.
    pub fn node_out_of_range(node: usize, node_count: usize) -> Self {
        Self::NodeOutOfRange { node, node_count }
    }
}

impl From<tempfile::PersistError> for AgonyError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::IoError(err.error)
    }
}

/// Ensure a condition holds, returning an `InvalidParameter` error if not.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::AgonyError::InvalidParameter($msg.to_string()));
        }
    };
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::AgonyError::$variant(format!($($msg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgonyError::size_mismatch(3, 4);
        assert_eq!(err.to_string(), "SizeMismatch: graphs have 3 and 4 nodes");

        let err = AgonyError::parse(2, "expected i,j");
        assert_eq!(err.to_string(), "ParseError: line 2: expected i,j");
    }

    #[test]
    fn test_error_constructors() {
        let _ = AgonyError::invalid_parameter("zero partitions");
        let _ = AgonyError::internal("cap exceeded");
        let _ = AgonyError::node_out_of_range(5, 3);
    }

    fn checked(partitions: usize) -> AgonyResult<usize> {
        crate::ensure!(partitions > 0, "partitions must be positive");
        crate::ensure!(partitions < 100, InternalError: "too many partitions: {}", partitions);
        Ok(partitions)
    }

    #[test]
    fn test_ensure_macro() {
        assert!(matches!(checked(0), Err(AgonyError::InvalidParameter(_))));
        assert!(matches!(checked(100), Err(AgonyError::InternalError(_))));
        assert_eq!(checked(3).unwrap(), 3);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AgonyError = io.into();
        assert!(matches!(err, AgonyError::IoError(_)));
    }
}
