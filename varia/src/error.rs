//! Reporting for failed checked accesses.

use std::fmt;

/// Error returned by the checked accessors when the requested alternative
/// does not match the active one.
///
/// Carries the requested position and the discriminant observed at the time
/// of the call (`None` when the variant was valueless); the rendered message
/// is built from the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    requested: usize,
    actual: Option<usize>,
}

impl AccessError {
    pub(crate) fn new(requested: usize, actual: Option<usize>) -> Self {
        Self { requested, actual }
    }

    /// Position of the alternative the caller asked for.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Discriminant at the time of the failed access; `None` for a
    /// valueless variant.
    pub fn actual(&self) -> Option<usize> {
        self.actual
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.actual {
            Some(actual) => write!(
                f,
                "access of alternative {} on a variant holding alternative {}",
                self.requested, actual
            ),
            None => write!(
                f,
                "access of alternative {} on a valueless variant",
                self.requested
            ),
        }
    }
}

impl std::error::Error for AccessError {}
