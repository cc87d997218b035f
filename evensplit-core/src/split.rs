use std::collections::HashSet;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};

/// A computed division: two batches of indices into the original item
/// sequence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
}

impl TryFrom<Map<String, Value>> for Split {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

/// Checks that `split` is a valid two-way division of `items` and returns
/// the sums of the two batches. Every index must appear exactly once
/// across both batches.
pub fn verify_split(items: &[u64], split: &Split) -> Result<(u64, u64)> {
    let mut seen = HashSet::new();
    for &index in split.first.iter().chain(&split.second) {
        if index >= items.len() {
            return Err(anyhow!("Item index ({}) is out of bounds", index));
        }
        if !seen.insert(index) {
            return Err(anyhow!("Item index ({}) appears more than once", index));
        }
    }
    if seen.len() != items.len() {
        return Err(anyhow!(
            "Split covers {} of {} items",
            seen.len(),
            items.len()
        ));
    }

    Ok((batch_sum(items, &split.first)?, batch_sum(items, &split.second)?))
}

fn batch_sum(items: &[u64], batch: &[usize]) -> Result<u64> {
    batch.iter().try_fold(0u64, |sum, &index| {
        sum.checked_add(items[index])
            .ok_or_else(|| anyhow!("Batch sum overflows u64"))
    })
}
