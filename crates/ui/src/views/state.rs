use std::fmt;

/// Error shown inline by a view; always a single human-readable line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewError(String);

impl ViewError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl<T, E: fmt::Display> From<Result<T, E>> for ViewState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(ViewError::new(err.to_string())),
        }
    }
}
