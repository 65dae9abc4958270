use crate::Result;

mod descriptor;
#[cfg(feature = "h5")]
mod h5;
mod kaggle;

pub use descriptor::*;
#[cfg(feature = "h5")]
pub use h5::*;
pub use kaggle::*;

/// A fixed-length, indexable collection of `(image, label)` pairs.
///
/// Implementations take `&self` everywhere and are immutable once built, so a
/// multi-worker loader can share one instance across threads.
pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetches and decodes the item at `index`.
    ///
    /// Fails with [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange)
    /// when `index >= self.len()`.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Human-readable name of a class id, if the dataset knows one.
    fn class_name(&self, _class: usize) -> Option<String> {
        None
    }

    fn iter(&self) -> Iter<'_, Self>
    where
        Self: Sized,
    {
        Iter {
            dataset: self,
            pos: 0,
        }
    }
}

/// Sequential iterator over a dataset, yielding one `Result` per item.
pub struct Iter<'a, D> {
    dataset: &'a D,
    pos: usize,
}

impl<'a, D: Dataset> Iterator for Iter<'a, D> {
    type Item = Result<D::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.pos);
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.dataset.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

impl<'a, D: Dataset> ExactSizeIterator for Iter<'a, D> {}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(crate::Error::IndexOutOfRange { index, len })
    }
}
