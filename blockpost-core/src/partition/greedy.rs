//! Greedy, step-based list partitioner: walks a sliding window outward by
//! `step` elements at a time, closing the current partition as soon as
//! growing it would raise its bits-per-posting cost.
//!
//! `compute_weight` uses `ceil(log2(universe_of_window / size_of_window))`
//! — the definition consistent with [`super::mc_optimal`]'s cost function
//! family, per the resolved open question (see crate root `DESIGN.md`);
//! the alternative definition found in some source copies, `end /
//! block_size`, was rejected.

/// Cost of encoding the window `list[begin..=end]`: bits needed per
/// posting, rounded up, for its local doc-id span.
fn compute_weight(list: &[u32], begin: usize, end: usize) -> u32 {
    let size = (end - begin + 1) as f64;
    let span = (list[end] - list[begin] + 1) as f64;
    (span / size).log2().ceil().max(0.0) as u32
}

/// Partitions ascending `list` by greedily extending a window `step`
/// elements at a time; returns chunk sizes summing to `list.len()`.
pub fn greedy_partition(list: &[u32], step: usize) -> Vec<usize> {
    let n = list.len();
    if n == 0 {
        return Vec::new();
    }
    let step = step.max(1);

    let mut partitions = Vec::new();
    let mut begin = 0usize;
    let mut end = (step - 1).min(n - 1);
    let mut cur_cost = compute_weight(list, begin, end);

    loop {
        let candidate_end = (end + step).min(n - 1);
        if candidate_end == end {
            partitions.push(end - begin + 1);
            break;
        }
        let new_cost = compute_weight(list, begin, candidate_end);
        if new_cost > cur_cost {
            partitions.push(end - begin + 1);
            begin = end + 1;
            end = (begin + step - 1).min(n - 1);
            cur_cost = compute_weight(list, begin, end);
        } else {
            end = candidate_end;
            cur_cost = new_cost;
        }
    }
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outlier_tail_splits_off_its_own_partition() {
        let mut list: Vec<u32> = (1..=16).collect();
        list.push(10089);
        let partitions = greedy_partition(&list, 8);
        assert_eq!(partitions, vec![16, 1]);
        assert_eq!(partitions.iter().sum::<usize>(), list.len());
    }

    #[test]
    fn uniform_list_forms_few_large_partitions() {
        let list: Vec<u32> = (0..256u32).collect();
        let partitions = greedy_partition(&list, 8);
        assert_eq!(partitions.iter().sum::<usize>(), list.len());
        assert!(partitions.len() <= 4);
    }

    #[test]
    fn empty_list_has_no_partitions() {
        assert!(greedy_partition(&[], 8).is_empty());
    }

    #[test]
    fn single_element_list_is_one_partition() {
        assert_eq!(greedy_partition(&[42], 8), vec![1]);
    }
}
