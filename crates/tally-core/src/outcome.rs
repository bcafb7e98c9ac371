//! Success values that carry non-fatal post-commit warnings

use crate::errors::{ArchivalStep, NotaryError};

/// A committed result plus whatever went wrong afterwards
///
/// The value is final: the notary has already committed it. Warnings mean
/// local bookkeeping may be stale until the next refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct PostCommit<T> {
    pub value: T,
    pub warnings: Vec<NotaryError>,
}

impl<T> PostCommit<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record the outcome of a best-effort step; errors become warnings
    pub fn note<E: std::fmt::Display>(
        &mut self,
        step: ArchivalStep,
        result: std::result::Result<(), E>,
    ) {
        if let Err(e) = result {
            self.warnings.push(NotaryError::ArchivalWarning {
                step,
                reason: e.to_string(),
            });
        }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PostCommit<U> {
        PostCommit {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_collects_only_failures() {
        let mut outcome = PostCommit::new("voucher");
        outcome.note::<String>(ArchivalStep::SelfArchival, Ok(()));
        outcome.note(ArchivalStep::AccountRefresh, Err("notary timed out"));

        assert_eq!(outcome.value, "voucher");
        assert_eq!(
            outcome.warnings,
            vec![NotaryError::ArchivalWarning {
                step: ArchivalStep::AccountRefresh,
                reason: "notary timed out".into(),
            }]
        );
        assert!(!outcome.is_clean());
    }
}
