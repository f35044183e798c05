//! Classification of failures at the engine boundary.

use thiserror::Error;

/// A failure while talking to the external engine.
///
/// None of these cross the adapter boundary; the boundary code catches them
/// and logs them uniformly. The variants match the externally observable
/// degradation modes: a construction failure leaves an empty shell, a
/// teardown failure never interrupts teardown, and a sync failure leaves the
/// last-known-good state in place.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The engine constructor threw. No instance exists and none is retried.
    #[error("engine construction failed: {0}")]
    Construction(String),

    /// `destroy()` threw during teardown.
    #[error("engine teardown failed: {0}")]
    Teardown(String),

    /// Reading or writing serialized content failed, in either direction.
    #[error("content sync failed: {0}")]
    ContentSync(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_boundary_operation() {
        let err = EmbedError::Construction("ctor is not a function".into());
        assert_eq!(
            err.to_string(),
            "engine construction failed: ctor is not a function"
        );

        let err = EmbedError::ContentSync("content is not a string".into());
        assert!(err.to_string().starts_with("content sync failed"));
    }
}
