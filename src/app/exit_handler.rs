//! Exit code logic for the cataloger process.
//!
//! Single responsibility: map extracted/failed document counts to the process exit outcome.

/// Process outcome reported through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    /// Every document extracted (or nothing to do)
    Success,
    /// Some documents extracted, some failed
    Partial,
    /// Every document failed
    Failure,
}

impl ProcessExit {
    /// Numeric exit status.
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Partial => 2,
        }
    }
}

/// Determines the process exit outcome from extracted and failed document counts.
pub(crate) fn determine_exit_outcome(extracted: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if extracted > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::{ProcessExit, determine_exit_outcome};

    #[test]
    fn test_exit_outcome_success_when_no_failures() {
        assert_eq!(determine_exit_outcome(3, 0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_success_when_zero_extracted_zero_failed() {
        assert_eq!(determine_exit_outcome(0, 0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_partial_when_mixed() {
        assert_eq!(determine_exit_outcome(2, 1), ProcessExit::Partial);
    }

    #[test]
    fn test_exit_outcome_failure_when_all_failed() {
        assert_eq!(determine_exit_outcome(0, 2), ProcessExit::Failure);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ProcessExit::Success.code(), 0);
        assert_eq!(ProcessExit::Failure.code(), 1);
        assert_eq!(ProcessExit::Partial.code(), 2);
    }
}
