use evensplit_core::{solve, Partitioner, Split, SplitError};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn batch_sums(items: &[u64], split: &Split) -> (u64, u64) {
    (
        split.first.iter().map(|&index| items[index]).sum(),
        split.second.iter().map(|&index| items[index]).sum(),
    )
}

fn covered_indices(split: &Split) -> Vec<usize> {
    let mut indices: Vec<usize> = split.first.iter().chain(&split.second).cloned().collect();
    indices.sort();
    indices
}

fn brute_force_min_diff(items: &[u64]) -> u64 {
    let total: u64 = items.iter().sum();
    let mut best = total;
    for mask in 0u32..(1u32 << items.len()) {
        let first: u64 = items
            .iter()
            .enumerate()
            .filter(|(index, _)| mask >> index & 1 == 1)
            .map(|(_, &item)| item)
            .sum();
        best = best.min(first.abs_diff(total - first));
    }
    best
}

#[test]
fn test_batches_cover_every_index_exactly_once() {
    let items = vec![3, 1, 4, 1, 5, 9, 2, 6];
    let split = solve(&items).unwrap();
    assert_eq!(covered_indices(&split), (0..items.len()).collect::<Vec<_>>());
}

#[test]
fn test_batch_sums_add_up_to_total() {
    let items = vec![17, 3, 29, 8, 12, 44, 5];
    let split = solve(&items).unwrap();
    let (first_sum, second_sum) = batch_sums(&items, &split);
    assert_eq!(first_sum + second_sum, items.iter().sum::<u64>());
}

#[test]
fn test_empty_input() {
    let split = solve(&[]).unwrap();
    assert!(split.first.is_empty());
    assert!(split.second.is_empty());
}

#[test]
fn test_single_item_stays_in_second_batch() {
    let split = solve(&[5]).unwrap();
    assert!(split.first.is_empty());
    assert_eq!(split.second, vec![0]);
}

#[test]
fn test_all_equal_items_split_evenly() {
    let items = vec![10, 10, 10, 10];
    let split = solve(&items).unwrap();
    let (first_sum, second_sum) = batch_sums(&items, &split);
    assert_eq!(first_sum, 20);
    assert_eq!(second_sum, 20);
}

#[test]
fn test_five_equal_items() {
    let items = vec![100, 100, 100, 100, 100];
    let split = solve(&items).unwrap();
    assert_eq!(split.first, vec![0, 1]);
    assert_eq!(split.second, vec![2, 3, 4]);
    let (first_sum, second_sum) = batch_sums(&items, &split);
    assert_eq!(first_sum.abs_diff(second_sum), 100);
}

#[test]
fn test_zero_valued_items_land_in_second_batch() {
    let items = vec![0, 7, 0, 7];
    let split = solve(&items).unwrap();
    let (first_sum, second_sum) = batch_sums(&items, &split);
    assert_eq!(first_sum, 7);
    assert_eq!(second_sum, 7);
    assert!(split.second.contains(&0));
    assert!(split.second.contains(&2));
}

#[test]
fn test_all_zero_items() {
    let items = vec![0, 0, 0];
    let split = solve(&items).unwrap();
    assert!(split.first.is_empty());
    assert_eq!(split.second, vec![0, 1, 2]);
}

#[test]
fn test_batches_are_empty_before_calc() {
    let partitioner = Partitioner::new(vec![1, 2, 3]).unwrap();
    assert!(partitioner.first_batch().is_empty());
    assert!(partitioner.second_batch().is_empty());
}

#[test]
fn test_calc_is_idempotent() {
    let mut partitioner = Partitioner::new(vec![7, 3, 2, 5, 8]).unwrap();
    partitioner.calc().unwrap();
    let batches = (partitioner.first_batch(), partitioner.second_batch());
    partitioner.calc().unwrap();
    assert_eq!(
        batches,
        (partitioner.first_batch(), partitioner.second_batch())
    );
}

#[test]
fn test_negative_item_is_rejected() {
    let err = Partitioner::new(vec![3, -1, 2]).unwrap_err();
    assert_eq!(err, SplitError::NegativeItem { index: 1, value: -1 });
}

#[test]
fn test_sum_overflow_is_detected() {
    let mut partitioner = Partitioner::new(vec![i64::MAX, i64::MAX, i64::MAX]).unwrap();
    assert_eq!(partitioner.calc().unwrap_err(), SplitError::SumOverflow);
}

#[test]
fn test_default_table_limit_rejects_huge_capacities() {
    let mut partitioner = Partitioner::new(vec![1 << 40, 1 << 40]).unwrap();
    assert!(matches!(
        partitioner.calc().unwrap_err(),
        SplitError::TableTooLarge { .. }
    ));
}

#[test]
fn test_explicit_table_limit_is_enforced() {
    let mut partitioner = Partitioner::new(vec![1 << 20, 1 << 20]).unwrap();
    match partitioner.calc_with_table_limit(1024).unwrap_err() {
        SplitError::TableTooLarge { cells, limit } => {
            assert_eq!(limit, 1024);
            assert!(cells > limit);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_matches_brute_force_on_small_instances() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for num_items in 0..=12 {
        for _ in 0..20 {
            // gen_range includes 0, so zero-valued items are covered too.
            let items: Vec<u64> = (0..num_items).map(|_| rng.gen_range(0..=30)).collect();
            let split = solve(&items).unwrap();

            assert_eq!(covered_indices(&split), (0..items.len()).collect::<Vec<_>>());
            let (first_sum, second_sum) = batch_sums(&items, &split);
            assert_eq!(first_sum + second_sum, items.iter().sum::<u64>());
            assert_eq!(
                first_sum.abs_diff(second_sum),
                brute_force_min_diff(&items),
                "items: {:?}",
                items
            );
        }
    }
}
