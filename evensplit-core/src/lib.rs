//! Divides a set of non-negative integers into two batches whose sums are
//! as close to equal as possible, via a 0-1 knapsack reduction.

pub mod error;
pub mod instance;
pub mod partition;
pub mod split;

pub use error::SplitError;
pub use instance::{Instance, Params};
pub use partition::{solve, Batch, Partitioner, DEFAULT_MAX_TABLE_CELLS};
pub use split::{verify_split, Split};
