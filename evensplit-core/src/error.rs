use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("item at index {index} is negative ({value})")]
    NegativeItem { index: usize, value: i64 },

    #[error("total sum of items overflows u64")]
    SumOverflow,

    #[error("knapsack table would need {cells} cells (limit {limit})")]
    TableTooLarge { cells: u128, limit: u128 },
}
