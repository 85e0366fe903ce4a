#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

/// Source that counts how many elements it has handed out.
pub struct CountingSource<I> {
    inner: I,
    pulls: Rc<Cell<usize>>,
}

impl<I: Iterator> CountingSource<I> {
    pub fn new(inner: I) -> (Self, Rc<Cell<usize>>) {
        let pulls = Rc::new(Cell::new(0));
        let source = Self {
            inner,
            pulls: Rc::clone(&pulls),
        };
        (source, pulls)
    }
}

impl<I: Iterator> Iterator for CountingSource<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = self.inner.next()?;
        self.pulls.set(self.pulls.get() + 1);
        Some(item)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("source fault at position {0}")]
pub struct SourceFault(pub usize);

/// Yields `Ok(0), Ok(1), ..` with a single `Err` at `fail_at`, ending after `len` items.
pub fn faulty_source(
    len: usize,
    fail_at: usize,
) -> impl Iterator<Item = Result<usize, SourceFault>> {
    (0..len).map(move |i| {
        if i == fail_at {
            Err(SourceFault(i))
        } else {
            Ok(i)
        }
    })
}
