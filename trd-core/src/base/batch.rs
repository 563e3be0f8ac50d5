//! Columnar storage of observations and actions.

/// A column of observations or actions.
///
/// Implementations back the columns of an experience store as well as the
/// per-step values handed to the aggregator. A column created with
/// [`new`](BatchData::new) holds `capacity` slots; [`push`](BatchData::push)
/// writes rows at a rotating position and [`sample`](BatchData::sample)
/// gathers rows by index.
pub trait BatchData {
    /// Creates a column with the given number of slots.
    fn new(capacity: usize) -> Self;

    /// Writes the rows of `data` starting at slot `ix`, wrapping around to
    /// slot 0 when the end of the column is reached.
    fn push(&mut self, ix: usize, data: Self);

    /// Gathers the rows at the given slots into a new column.
    fn sample(&self, ixs: &Vec<usize>) -> Self;
}
