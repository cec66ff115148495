//! Domain error types.
//!
//! These errors represent contract violations on the feed aggregate. They
//! are distinct from I/O errors raised while loading a feed from disk.

/// Contract violations detected before any work is performed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Stop times have not had their arrival/departure durations parsed
    #[error("stop times have no parsed durations: parse feed times first")]
    MissingDurations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FeedError::MissingDurations;
        assert_eq!(
            err.to_string(),
            "stop times have no parsed durations: parse feed times first"
        );
    }
}
