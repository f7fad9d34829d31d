use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide issuer of strictly increasing order ids.
///
/// Order ids let a consumer recover the true construction order of records
/// after transport or storage reordering. The sequencer is an explicitly
/// owned value: the application creates one instance and passes a reference
/// into every [`build`](crate::record::LogRecordBuilder::build) call, so no
/// hidden global state is involved.
///
/// The counter is the only shared mutable state in this crate. All updates
/// go through atomic read-modify-write operations, so concurrent callers
/// never observe lost or duplicate ids.
#[derive(Debug, Default)]
pub struct OrderSequencer {
    counter: AtomicU64,
}

impl OrderSequencer {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Issue the next order id.
    ///
    /// With `hint == None` this returns a fresh id strictly greater than
    /// every id this sequencer has issued before, regardless of which
    /// thread asks.
    ///
    /// A `Some(id)` hint is the reconstruction path: the caller already
    /// knows the record's id (e.g. replaying stored JSON) and the hint is
    /// returned verbatim, while the internal counter is raised to at least
    /// that value so fresh ids issued afterwards stay above everything
    /// observed so far.
    pub fn next(&self, hint: Option<u64>) -> u64 {
        match hint {
            Some(id) => {
                self.counter.fetch_max(id, Ordering::Relaxed);
                id
            }
            // fetch_add participates in a single modification order, so
            // concurrent callers always get distinct, increasing values.
            None => self.counter.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}
