use anyhow::{anyhow, Result};
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};

use crate::partition;
use crate::split::{verify_split, Split};

#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct Params {
    pub num_items: usize,
    pub min_value: u64,
    pub max_value: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_items: 1000,
            min_value: 100,
            max_value: 299,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Instance {
    pub seed: [u8; 32],
    pub params: Params,
    pub items: Vec<u64>,
}

impl Instance {
    pub fn generate(seed: &[u8; 32], params: &Params) -> Result<Self> {
        if params.min_value > params.max_value {
            return Err(anyhow!(
                "min_value ({}) must not exceed max_value ({})",
                params.min_value,
                params.max_value
            ));
        }

        // Generate item values uniformly in [min_value, max_value]
        let mut rng = SmallRng::from_seed(StdRng::from_seed(seed.clone()).gen());
        let items = (0..params.num_items)
            .map(|_| rng.gen_range(params.min_value..=params.max_value))
            .collect();

        Ok(Self {
            seed: seed.clone(),
            params: params.clone(),
            items,
        })
    }

    pub fn solve(&self) -> Result<Split> {
        Ok(partition::solve(&self.items)?)
    }

    pub fn verify_split(&self, split: &Split) -> Result<(u64, u64)> {
        verify_split(&self.items, split)
    }
}
