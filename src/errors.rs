use std::error;
use std::fmt;

/// Error returned by a retry run.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The last attempt's error, unmodified. Produced both when the retry
    /// condition rejects an error and when the attempt budget runs out.
    Operation(E),
    /// The cancellation signal fired before the first attempt or during an
    /// inter-attempt wait.
    Cancelled,
}

impl<E> RetryError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled)
    }

    pub fn into_operation(self) -> Option<E> {
        match self {
            RetryError::Operation(err) => Some(err),
            RetryError::Cancelled => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Operation(err) => write!(f, "{}", err),
            RetryError::Cancelled => write!(f, "retry cancelled"),
        }
    }
}

impl<E: error::Error + 'static> error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RetryError::Operation(err) => Some(err),
            RetryError::Cancelled => None,
        }
    }
}
