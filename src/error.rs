//! Error types shared by the catalog, the fetch controller and the transport

use thiserror::Error;

/// Failures surfaced by a `Transport` when a GET does not produce a JSON body.
///
/// The `Display` text is shown verbatim in the response panel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Non-2xx answer. `message` is the provider's `detail` when it sent one.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    /// 2xx answer whose body is not JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Reasons a fetch trigger could not be turned into a network command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no endpoint selected")]
    NoSelection,
}

/// Catalog construction and lookup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("endpoint index {index} out of range (catalog has {len} endpoints)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("duplicate endpoint label: {0}")]
    DuplicateLabel(String),

    #[error("catalog is empty")]
    Empty,

    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_provider_detail() {
        let err = TransportError::Status {
            status: 401,
            message: "invalid token".to_string(),
        };
        assert_eq!(err.to_string(), "invalid token (HTTP 401)");
    }

    #[test]
    fn test_index_error_names_bounds() {
        let err = CatalogError::IndexOutOfRange { index: 20, len: 18 };
        assert!(err.to_string().contains("20"));
        assert!(err.to_string().contains("18"));
    }
}
