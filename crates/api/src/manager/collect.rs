//! Index-keyed buffering of batch callbacks
//!
//! Backends may report elements in any order. The collector stores each
//! outcome in the slot of its index so results come back input-aligned,
//! and polices the callback contract on the way in.

use super::policy::BatchElementResult;
use assetgate_core::BatchElementError;
use std::cell::RefCell;
use tracing::warn;

pub(crate) struct BatchCollector<T> {
    slots: Vec<Option<BatchElementResult<T>>>,
}

impl<T> BatchCollector<T> {
    pub(crate) fn new(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        BatchCollector { slots }
    }

    /// Store an outcome. Out-of-range and repeated indices are dropped;
    /// the first report for an index wins.
    pub(crate) fn record(&mut self, index: usize, outcome: BatchElementResult<T>) {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            None => {
                warn!(
                    target: "assetgate::manager",
                    index,
                    batch_len = len,
                    "Manager reported a result for an index outside the batch, ignoring"
                );
            }
            Some(Some(_)) => {
                warn!(
                    target: "assetgate::manager",
                    index,
                    "Manager reported more than one result for a batch element, ignoring"
                );
            }
            Some(slot) => *slot = Some(outcome),
        }
    }

    /// All slots in input order, `None` where the manager never reported
    pub(crate) fn finish(self) -> Vec<Option<BatchElementResult<T>>> {
        self.slots
    }
}

/// Run `call` with a success/error callback pair feeding one collector
pub(crate) fn collect<T, F>(
    len: usize,
    call: F,
) -> assetgate_core::Result<Vec<Option<BatchElementResult<T>>>>
where
    F: FnOnce(
        &mut dyn FnMut(usize, T),
        &mut dyn FnMut(usize, BatchElementError),
    ) -> assetgate_core::Result<()>,
{
    let collector = RefCell::new(BatchCollector::new(len));
    call(
        &mut |index: usize, value: T| collector.borrow_mut().record(index, Ok(value)),
        &mut |index: usize, error: BatchElementError| {
            collector.borrow_mut().record(index, Err(error))
        },
    )?;
    Ok(collector.into_inner().finish())
}
