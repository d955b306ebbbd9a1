//! Rebuild notifications.

use crate::map::EditOutcome;

/// Receives every successful rebuild of a [`LineMap`](crate::LineMap).
///
/// Observers run synchronously, in subscription order, after the new snapshot is in place.
/// Failed edits are not reported.
pub trait MapObserver {
    fn on_rebuilt(&mut self, outcome: &EditOutcome);
}

impl<F> MapObserver for F
where
    F: FnMut(&EditOutcome),
{
    fn on_rebuilt(&mut self, outcome: &EditOutcome) {
        self(outcome)
    }
}
