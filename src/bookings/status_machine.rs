use crate::bookings::models::BookingStatus;

/// Reasons a status transition is rejected.
/// Cancellation guards get their own variants so callers can answer with
/// precise client errors instead of a generic transition failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    AlreadyCancelled,
    CannotCancelCompleted,
    Invalid {
        from: BookingStatus,
        to: BookingStatus,
    },
}

/// Service for managing booking status transitions
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a status transition is valid
    ///
    /// # Valid Transitions
    /// - Confirmed → Cancelled (explicit cancel)
    /// - Confirmed → Completed (out-of-scope batch process)
    /// - Cancelled and Completed are terminal
    pub fn is_valid_transition(from: BookingStatus, to: BookingStatus) -> bool {
        matches!(
            (from, to),
            (BookingStatus::Confirmed, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }

    /// Attempt to transition from one status to another
    ///
    /// # Returns
    /// `Ok(to)` if the transition is valid, a specific `TransitionError`
    /// otherwise
    pub fn transition(
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<BookingStatus, TransitionError> {
        match (from, to) {
            (BookingStatus::Confirmed, BookingStatus::Cancelled) => Ok(BookingStatus::Cancelled),
            (BookingStatus::Confirmed, BookingStatus::Completed) => Ok(BookingStatus::Completed),
            (BookingStatus::Cancelled, BookingStatus::Cancelled) => {
                Err(TransitionError::AlreadyCancelled)
            }
            (BookingStatus::Completed, BookingStatus::Cancelled) => {
                Err(TransitionError::CannotCancelCompleted)
            }
            (from, to) => Err(TransitionError::Invalid { from, to }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_can_be_cancelled() {
        assert_eq!(
            StatusMachine::transition(BookingStatus::Confirmed, BookingStatus::Cancelled),
            Ok(BookingStatus::Cancelled)
        );
    }

    #[test]
    fn test_confirmed_can_be_completed() {
        assert_eq!(
            StatusMachine::transition(BookingStatus::Confirmed, BookingStatus::Completed),
            Ok(BookingStatus::Completed)
        );
    }

    #[test]
    fn test_cancelling_twice_is_rejected() {
        assert_eq!(
            StatusMachine::transition(BookingStatus::Cancelled, BookingStatus::Cancelled),
            Err(TransitionError::AlreadyCancelled)
        );
    }

    #[test]
    fn test_completed_cannot_be_cancelled() {
        assert_eq!(
            StatusMachine::transition(BookingStatus::Completed, BookingStatus::Cancelled),
            Err(TransitionError::CannotCancelCompleted)
        );
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for to in [BookingStatus::Confirmed, BookingStatus::Completed] {
            assert!(StatusMachine::transition(BookingStatus::Cancelled, to).is_err());
        }
    }

    #[test]
    fn test_completed_is_terminal() {
        for to in [BookingStatus::Confirmed, BookingStatus::Completed] {
            assert!(StatusMachine::transition(BookingStatus::Completed, to).is_err());
        }
    }

    #[test]
    fn test_no_backward_transition_to_confirmed() {
        assert!(!StatusMachine::is_valid_transition(
            BookingStatus::Cancelled,
            BookingStatus::Confirmed
        ));
        assert!(!StatusMachine::is_valid_transition(
            BookingStatus::Completed,
            BookingStatus::Confirmed
        ));
    }

    #[test]
    fn test_transition_consistency_with_validity_check() {
        let statuses = [
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ];
        for from in statuses {
            for to in statuses {
                let is_valid = StatusMachine::is_valid_transition(from, to);
                let result = StatusMachine::transition(from, to);
                assert_eq!(is_valid, result.is_ok());
            }
        }
    }
}
