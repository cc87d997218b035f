use ndarray::Array2;

use crate::error::SplitError;
use crate::split::Split;

/// Largest knapsack table `calc` will allocate: 2^28 u64 cells (2 GiB).
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 1 << 28;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Batch {
    First,
    Second,
}

/// Divides a set of numbers into two batches, trying to make the sums of
/// the result batches as equal as possible.
///
/// The items are fixed at construction. `calc` reduces the problem to 0-1
/// knapsack with capacity equal to half the total sum and stores a batch
/// label per item; the batch getters project that map into index lists and
/// return empty lists until `calc` has run.
#[derive(Debug, Clone)]
pub struct Partitioner {
    items: Vec<u64>,
    batches_map: Vec<Batch>,
}

impl Partitioner {
    /// Rejects the first negative item; values must be non-negative.
    pub fn new(items: Vec<i64>) -> Result<Self, SplitError> {
        if let Some((index, &value)) = items.iter().enumerate().find(|(_, &v)| v < 0) {
            return Err(SplitError::NegativeItem { index, value });
        }
        Ok(Self::from_values(items.into_iter().map(|v| v as u64).collect()))
    }

    pub fn from_values(items: Vec<u64>) -> Self {
        Self {
            items,
            batches_map: Vec::new(),
        }
    }

    pub fn items(&self) -> &[u64] {
        &self.items
    }

    /// Recomputes the batch assignment from scratch. Calling it again on
    /// unchanged items yields the same batches.
    pub fn calc(&mut self) -> Result<(), SplitError> {
        self.calc_with_table_limit(DEFAULT_MAX_TABLE_CELLS)
    }

    pub fn calc_with_table_limit(&mut self, max_cells: u64) -> Result<(), SplitError> {
        let total_sum = self.total_items_sum()?;

        // Target is to get two batches close to half of the total sum.
        let target_sum = total_sum / 2;

        let cells = (self.items.len() as u128 + 1) * (target_sum as u128 + 1);
        if cells > max_cells as u128 {
            return Err(SplitError::TableTooLarge {
                cells,
                limit: max_cells as u128,
            });
        }

        let matrix = build_knapsack_matrix(&self.items, target_sum as usize);
        self.batches_map = build_batches_map(&self.items, &matrix, target_sum as usize);
        Ok(())
    }

    fn total_items_sum(&self) -> Result<u64, SplitError> {
        self.items
            .iter()
            .try_fold(0u64, |sum, &item| sum.checked_add(item))
            .ok_or(SplitError::SumOverflow)
    }

    /// Original indices assigned to `batch`, in ascending order. Empty
    /// before the first `calc`.
    pub fn batch(&self, batch: Batch) -> Vec<usize> {
        self.batches_map
            .iter()
            .enumerate()
            .filter(|(_, &assigned)| assigned == batch)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn first_batch(&self) -> Vec<usize> {
        self.batch(Batch::First)
    }

    pub fn second_batch(&self) -> Vec<usize> {
        self.batch(Batch::Second)
    }

    pub fn split(&self) -> Split {
        Split {
            first: self.first_batch(),
            second: self.second_batch(),
        }
    }
}

/// Constructs and solves a partitioner in one call.
pub fn solve(items: &[u64]) -> Result<Split, SplitError> {
    let mut partitioner = Partitioner::from_values(items.to_vec());
    partitioner.calc()?;
    Ok(partitioner.split())
}

/// Builds the 0-1 knapsack matrix, with the only difference from the
/// textbook problem being that the weight of an item equals its value.
/// Cell (i, s) holds the best value packable from items 0..i within
/// capacity s; row 0 and column 0 stay zero.
fn build_knapsack_matrix(items: &[u64], target_sum: usize) -> Array2<u64> {
    let mut matrix = Array2::<u64>::zeros((items.len() + 1, target_sum + 1));

    for (index, &item) in items.iter().enumerate() {
        let row = index + 1;
        for sum in 1..=target_sum {
            let excluded = matrix[[row - 1, sum]];
            matrix[[row, sum]] = if item <= sum as u64 {
                let included = item + matrix[[row - 1, sum - item as usize]];
                included.max(excluded)
            } else {
                excluded
            };
        }
    }

    matrix
}

/// Walks the matrix backward, from the last item to the first, to recover
/// which items the optimal selection included. Index of every entry in the
/// result map corresponds to the index in the source items.
fn build_batches_map(items: &[u64], matrix: &Array2<u64>, target_sum: usize) -> Vec<Batch> {
    let mut batches_map = vec![Batch::Second; items.len()];

    // Starting from the bottom-right corner of the matrix.
    let mut sum_index = target_sum;

    for row in (1..=items.len()).rev() {
        // If the cell differs from the one right above it, this item was
        // selected; its value cannot exceed the remaining capacity.
        if matrix[[row, sum_index]] != matrix[[row - 1, sum_index]] {
            batches_map[row - 1] = Batch::First;
            sum_index -= items[row - 1] as usize;
        }

        // Done once capacity runs out or no value is achievable from the
        // remaining prefix.
        if sum_index < 1 || matrix[[row - 1, sum_index]] == 0 {
            break;
        }
    }

    batches_map
}
