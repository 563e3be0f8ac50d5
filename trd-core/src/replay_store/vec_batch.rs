//! A [`BatchData`] implementation backed by a flat vector.
use crate::BatchData;

/// A column storing one value per slot in a flat vector.
///
/// Suitable for scalar or small fixed-size observations and actions when no
/// tensor backend is involved, and for tests. A column created through
/// [`BatchData::new`] is zero-initialized at full capacity; a per-step value
/// is wrapped with [`from_value`](VecBatch::from_value).
#[derive(Clone, Debug, PartialEq)]
pub struct VecBatch<T> {
    data: Vec<T>,
}

impl<T> VecBatch<T> {
    /// Creates a column holding a single value.
    pub fn from_value(value: T) -> Self {
        Self { data: vec![value] }
    }

    /// Returns the stored values.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T> BatchData for VecBatch<T>
where
    T: Clone + Default,
{
    fn new(capacity: usize) -> Self {
        Self {
            data: vec![T::default(); capacity],
        }
    }

    fn push(&mut self, ix: usize, data: Self) {
        let capacity = self.data.len();
        let mut j = ix;
        for v in data.data.into_iter() {
            self.data[j] = v;
            j += 1;
            if j == capacity {
                j = 0;
            }
        }
    }

    fn sample(&self, ixs: &Vec<usize>) -> Self {
        Self {
            data: ixs.iter().map(|ix| self.data[*ix].clone()).collect(),
        }
    }
}
