//! Save coordination
//!
//! Flushes a draft to the persistence collaborator as one batch. At most one
//! save may be outstanding; the in-flight flag is taken before the sink is
//! called and released by a guard on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::error::{AcceptanceError, AcceptanceResult};
use crate::models::{Draft, LineItem};

/// Persistence collaborator that accepts a whole batch or nothing
pub trait ReceptionSink {
    /// Persist every row of the batch atomically
    fn save_batch(&self, items: &[LineItem]) -> AcceptanceResult<()>;
}

impl<T: ReceptionSink + ?Sized> ReceptionSink for &T {
    fn save_batch(&self, items: &[LineItem]) -> AcceptanceResult<()> {
        (**self).save_batch(items)
    }
}

/// Summary of an accepted batch
#[derive(Debug, Clone)]
pub struct SaveReceipt {
    pub rows: usize,
    pub positions: usize,
    pub saved_at: DateTime<Utc>,
}

/// Held while a save is in flight; releases the flag when dropped
#[derive(Debug)]
pub struct SaveTicket<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SaveTicket<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Single-flight save of a draft through a `ReceptionSink`
pub struct SaveCoordinator<S> {
    sink: S,
    in_flight: AtomicBool,
}

impl<S: ReceptionSink> SaveCoordinator<S> {
    /// Create a new save coordinator around a sink
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Whether a save is currently outstanding
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Take the in-flight flag
    pub fn begin(&self) -> AcceptanceResult<SaveTicket<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AcceptanceError::SaveInProgress)?;
        Ok(SaveTicket {
            flag: &self.in_flight,
        })
    }

    /// Persist the full draft as one batch
    ///
    /// The draft is passed to the sink unmodified and never cleared here;
    /// clearing on success is the session's job.
    pub fn save(&self, draft: &Draft) -> AcceptanceResult<SaveReceipt> {
        if draft.is_empty() {
            return Err(AcceptanceError::NothingToSave);
        }

        let _ticket = self.begin()?;

        self.sink.save_batch(draft.items()).map_err(|e| match e {
            AcceptanceError::PersistenceFailure(reason) => {
                AcceptanceError::PersistenceFailure(reason)
            }
            other => AcceptanceError::PersistenceFailure(other.to_string()),
        })?;

        Ok(SaveReceipt {
            rows: draft.len(),
            positions: draft.position_numbers().len(),
            saved_at: Utc::now(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::{Cell, RefCell};

    use super::*;

    /// Sink that records every batch and can be told to fail
    #[derive(Default)]
    pub struct RecordingSink {
        pub calls: Cell<usize>,
        pub fail: Cell<bool>,
        pub batches: RefCell<Vec<Vec<LineItem>>>,
    }

    impl ReceptionSink for RecordingSink {
        fn save_batch(&self, items: &[LineItem]) -> AcceptanceResult<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(AcceptanceError::Storage("database unavailable".into()));
            }
            self.batches.borrow_mut().push(items.to_vec());
            Ok(())
        }
    }
}
