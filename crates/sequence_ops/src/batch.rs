//! Lazy partitioning of a single-pass source into fixed-size batches.
//!
//! [`batch`] returns a [`Batches`] iterator whose items are [`Batch`] handles.
//! Both levels are pull-based:
//!
//! - Asking [`Batches`] for the next batch pulls exactly one element from the
//!   source (so an empty trailing batch is never produced).
//! - Every further element of a batch is pulled only when that [`Batch`] is
//!   advanced past its buffered prefix.
//! - Before a new batch begins, the previous batch is force-completed: its
//!   unread remainder is pulled into that batch's snapshot, which keeps the
//!   batches positional and non-overlapping.
//!
//! Each batch keeps a snapshot of the elements pulled for it, so a handle can
//! be replayed with [`Batch::replay`] and read after the outer iterator has
//! moved on. The source is dropped as soon as it reports exhaustion.
//!
//! # Example
//! ```
//! use sequence_ops::batch::batch;
//!
//! let mut batches = batch(1..=30, 10)?;
//! let head: Vec<i32> = batches.next().unwrap().take(3).collect();
//! assert_eq!(head, vec![1, 2, 3]);
//!
//! // The unread remainder of the first batch is skipped, not re-read.
//! let second: Vec<i32> = batches.next().unwrap().collect();
//! assert_eq!(second, (11..=20).collect::<Vec<_>>());
//! # Ok::<(), sequence_ops::Error>(())
//! ```

use crate::error::{Error, Result};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;
use tracing::trace;

/// Upper bound on the up-front allocation for a batch buffer. Larger batches
/// grow on demand.
const MAX_PREALLOCATED: usize = 1024;

/// Partitions `source` into consecutive batches of `batch_size` elements.
///
/// Fails with [`Error::InvalidArgument`] when `batch_size == 0`. The source is
/// not touched until the returned iterator is advanced.
///
/// To batch a live iterator without giving it away, pass `iter.by_ref()`.
pub fn batch<S>(source: S, batch_size: usize) -> Result<Batches<S::IntoIter>>
where
    S: IntoIterator,
{
    if batch_size == 0 {
        return Err(Error::invalid(
            "batch_size",
            format!("batch_size must be >= 1, but got batch_size={batch_size}"),
        ));
    }
    Ok(Batches::new(source.into_iter(), batch_size))
}

/// Elements pulled so far for one batch.
struct Snapshot<T> {
    items: Vec<T>,
    complete: bool,
}

type SharedSnapshot<T> = Rc<RefCell<Snapshot<T>>>;

/// State shared by the outer iterator and every batch handle.
struct Engine<I: Iterator> {
    /// `None` once the source has reported exhaustion.
    source: Option<I>,
    batch_size: usize,
    started: usize,
    /// The only snapshot that may still be incomplete.
    active: Option<SharedSnapshot<I::Item>>,
}

impl<I: Iterator> Engine<I> {
    fn pull(&mut self) -> Option<I::Item> {
        let item = self.source.as_mut()?.next();
        if item.is_none() {
            trace!(batches = self.started, "source exhausted");
            self.source = None;
        }
        item
    }

    /// Pulls one element into `snapshot`, returning `false` when nothing was added.
    fn fill_one(&mut self, snapshot: &mut Snapshot<I::Item>) -> bool {
        if snapshot.complete {
            return false;
        }
        match self.pull() {
            Some(item) => {
                snapshot.items.push(item);
                snapshot.complete = snapshot.items.len() == self.batch_size;
                true
            }
            None => {
                snapshot.complete = true;
                false
            }
        }
    }

    fn fill_to_end(&mut self, snapshot: &mut Snapshot<I::Item>) -> usize {
        let before = snapshot.items.len();
        while self.fill_one(snapshot) {}
        snapshot.items.len() - before
    }

    fn finish_active(&mut self) {
        if let Some(active) = self.active.take() {
            let skipped = self.fill_to_end(&mut active.borrow_mut());
            if skipped > 0 {
                trace!(
                    batch = self.started - 1,
                    skipped,
                    "force-completed partially read batch"
                );
            }
        }
    }

    fn start_next(&mut self) -> Option<(usize, SharedSnapshot<I::Item>)> {
        self.finish_active();
        let first = self.pull()?;

        let mut items = Vec::with_capacity(self.batch_size.min(MAX_PREALLOCATED));
        items.push(first);
        let snapshot = Rc::new(RefCell::new(Snapshot {
            items,
            complete: self.batch_size == 1,
        }));

        let index = self.started;
        self.started += 1;
        self.active = Some(Rc::clone(&snapshot));
        Some((index, snapshot))
    }
}

/// Lazy sequence of [`Batch`]es produced by [`batch`].
///
/// The iterator is fused: once the source is exhausted it keeps returning `None`.
pub struct Batches<I: Iterator> {
    engine: Rc<RefCell<Engine<I>>>,
}

impl<I: Iterator> Batches<I> {
    fn new(source: I, batch_size: usize) -> Self {
        Self {
            engine: Rc::new(RefCell::new(Engine {
                source: Some(source),
                batch_size,
                started: 0,
                active: None,
            })),
        }
    }

    /// Returns the configured batch size.
    pub fn batch_size(&self) -> usize {
        self.engine.borrow().batch_size
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Batch<I>;

    fn next(&mut self) -> Option<Batch<I>> {
        let (index, snapshot) = self.engine.borrow_mut().start_next()?;
        Some(Batch {
            engine: Rc::clone(&self.engine),
            snapshot,
            index,
            position: 0,
        })
    }
}

impl<I: Iterator> FusedIterator for Batches<I> {}

impl<I: Iterator> fmt::Debug for Batches<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.engine.borrow();
        f.debug_struct("Batches")
            .field("batch_size", &engine.batch_size)
            .field("started", &engine.started)
            .field("exhausted", &engine.source.is_none())
            .finish()
    }
}

/// One batch of consecutive source elements.
///
/// Iterating a `Batch` yields clones of the snapshot elements, pulling from the
/// source only when the snapshot has been read to its end. Cloning a handle
/// copies its read position; [`Batch::replay`] gives a handle at the start.
/// Element types without `Clone` are read through [`Batch::items`] or
/// [`Batch::try_into_vec`].
pub struct Batch<I: Iterator> {
    engine: Rc<RefCell<Engine<I>>>,
    snapshot: SharedSnapshot<I::Item>,
    index: usize,
    position: usize,
}

impl<I: Iterator> Batch<I> {
    /// Zero-based position of this batch in the batch sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether every element of this batch has been pulled from the source.
    pub fn is_complete(&self) -> bool {
        self.snapshot.borrow().complete
    }

    /// Number of elements pulled for this batch so far.
    pub fn buffered_len(&self) -> usize {
        self.snapshot.borrow().items.len()
    }

    /// Returns a handle over the same snapshot, positioned at its first element.
    pub fn replay(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            snapshot: Rc::clone(&self.snapshot),
            index: self.index,
            position: 0,
        }
    }

    /// Pulls the rest of this batch and detaches it from the engine, so a later
    /// outer advance has nothing left to finish.
    fn complete(&self) {
        if !self.snapshot.borrow().complete {
            self.engine
                .borrow_mut()
                .fill_to_end(&mut self.snapshot.borrow_mut());
        }
        let mut engine = self.engine.borrow_mut();
        let is_active = engine
            .active
            .as_ref()
            .is_some_and(|active| Rc::ptr_eq(active, &self.snapshot));
        if is_active {
            engine.active = None;
        }
    }

    /// Forces completion of the batch and borrows all of its elements.
    ///
    /// Works for any element type. The returned guard may be held while the
    /// outer iterator advances.
    pub fn items(&self) -> Ref<'_, [I::Item]> {
        self.complete();
        Ref::map(self.snapshot.borrow(), |snapshot| snapshot.items.as_slice())
    }

    /// Forces completion of the batch and takes its buffer without cloning.
    ///
    /// Fails and hands the batch back when another handle (a clone or a
    /// [`replay`](Batch::replay)) still shares the snapshot.
    pub fn try_into_vec(self) -> Result<Vec<I::Item>, Self> {
        self.complete();
        let Batch {
            engine,
            snapshot,
            index,
            position,
        } = self;
        match Rc::try_unwrap(snapshot) {
            Ok(snapshot) => Ok(snapshot.into_inner().items),
            Err(snapshot) => Err(Batch {
                engine,
                snapshot,
                index,
                position,
            }),
        }
    }

    /// Like [`Batch::try_into_vec`], cloning the elements when the snapshot is shared.
    pub fn into_vec(self) -> Vec<I::Item>
    where
        I::Item: Clone,
    {
        self.try_into_vec().unwrap_or_else(|shared| shared.to_vec())
    }

    /// Forces completion of the batch and returns all of its elements.
    ///
    /// Does not move this handle's read position.
    pub fn to_vec(&self) -> Vec<I::Item>
    where
        I::Item: Clone,
    {
        self.complete();
        self.snapshot.borrow().items.clone()
    }

    /// Forces completion of the batch and returns its final length.
    pub fn len(&self) -> usize {
        self.complete();
        self.buffered_len()
    }

    /// A batch is never empty; provided for API symmetry with [`Batch::len`].
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<I: Iterator> Clone for Batch<I> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            snapshot: Rc::clone(&self.snapshot),
            index: self.index,
            position: self.position,
        }
    }
}

impl<I> Iterator for Batch<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        {
            let snapshot = self.snapshot.borrow();
            if let Some(item) = snapshot.items.get(self.position) {
                self.position += 1;
                return Some(item.clone());
            }
            if snapshot.complete {
                return None;
            }
        }

        let mut snapshot = self.snapshot.borrow_mut();
        if !self.engine.borrow_mut().fill_one(&mut snapshot) {
            return None;
        }
        self.position += 1;
        snapshot.items.last().cloned()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let snapshot = self.snapshot.borrow();
        let buffered = snapshot.items.len().saturating_sub(self.position);
        if snapshot.complete {
            (buffered, Some(buffered))
        } else {
            let batch_size = self.engine.borrow().batch_size;
            (buffered, Some(batch_size.saturating_sub(self.position)))
        }
    }
}

impl<I> FusedIterator for Batch<I>
where
    I: Iterator,
    I::Item: Clone,
{
}

impl<I: Iterator> fmt::Debug for Batch<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot.borrow();
        f.debug_struct("Batch")
            .field("index", &self.index)
            .field("position", &self.position)
            .field("buffered", &snapshot.items.len())
            .field("complete", &snapshot.complete)
            .finish()
    }
}
