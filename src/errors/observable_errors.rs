use std::error::Error;

use thiserror::Error;

/// An error emitted by an observable to its observers.
#[derive(Debug, Error)]
pub enum ObservableError {
    /// Named observable failed because of an underlying error.
    #[error("{name} observable emitted an error")]
    InfoRoot {
        name: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    /// Named observable failed.
    #[error("{0} observable emitted an error")]
    Info(String),

    #[error("observable emitted an error")]
    NoInfo,
}

impl ObservableError {
    /// Wraps `source` as the cause of a failure in the observable called `name`.
    pub fn with_source(name: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        Self::InfoRoot {
            name: name.into(),
            source: Box::new(source),
        }
    }
}
