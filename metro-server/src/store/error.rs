//! Configuration store error types.

/// Errors that can occur when reading from the configuration store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database query or connection failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value did not have the expected shape
    #[error("could not decode config key {key}: {message}")]
    Decode { key: String, message: String },

    /// The store cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Decode {
            key: "metro.last".into(),
            message: "expected a map".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not decode config key metro.last: expected a map"
        );

        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "store unavailable: connection refused");

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("database error"));
    }
}
