//! Mixed-cost optimal partitioner: a dynamic program over exponentially
//! spaced cost-bounded windows, ported from PISA's
//! `mc_optimal_partition.hpp`. Slower than [`super::greedy`] but finds a
//! partition whose total estimated cost is within `(1 + eps1)(1 + eps2)`
//! of optimal.

/// Estimated cost, in bits, of packing `size` postings drawn from a span
/// of `universe` doc-ids into one block: `size * ceil(log2(universe /
/// size))`, the same bits-per-posting estimate the greedy partitioner
/// uses, scaled by block length.
pub type CostFn = fn(universe: u64, size: u64) -> u64;

pub fn default_cost_fn(universe: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    let bits_per_posting = (universe as f64 / size as f64).log2().ceil().max(0.0) as u64;
    bits_per_posting * size
}

/// A sliding `[start, end)` window over `list` whose cost (under `cost_fn`)
/// stays below `cost_upper_bound`; `advance_end`/`advance_start` grow or
/// shrink it by one element, tracking running min/max doc-id so `universe`
/// and `size` are O(1) to query.
struct CostWindow<'a> {
    list: &'a [u32],
    base: u32,
    start: usize,
    end: usize,
    min_p: u32,
    max_p: u32,
    cost_upper_bound: u64,
}

impl<'a> CostWindow<'a> {
    fn new(list: &'a [u32], base: u32, cost_upper_bound: u64) -> Self {
        CostWindow {
            list,
            base,
            start: 0,
            end: 0,
            min_p: u32::MAX,
            max_p: 0,
            cost_upper_bound,
        }
    }

    fn universe(&self) -> u64 {
        if self.end <= self.start {
            0
        } else {
            let lo = if self.start == 0 {
                self.base
            } else {
                self.min_p
            };
            (self.max_p - lo + 1) as u64
        }
    }

    fn size(&self) -> u64 {
        (self.end - self.start) as u64
    }

    fn advance_end(&mut self) {
        let abs = self.list[self.end];
        self.min_p = self.min_p.min(abs);
        self.max_p = self.max_p.max(abs);
        self.end += 1;
    }

    fn advance_start(&mut self) {
        self.start += 1;
        if self.start >= self.end {
            self.min_p = u32::MAX;
            self.max_p = 0;
        } else {
            self.min_p = self.list[self.start];
            self.max_p = self.list[self.end - 1];
        }
    }
}

/// `block_count_min_cost` in the original: a fixed per-block overhead
/// (block-maxima + endpoint table entries) folded into the single-block
/// baseline cost so the DP doesn't prefer many tiny blocks over one big
/// one purely because the posting-cost estimate ignores table overhead.
const BLOCK_COUNT_MIN_COST: u64 = 8;

/// Partitions the ascending absolute doc-ids in `list` into chunk sizes,
/// minimizing total `cost_fun` subject to `eps1`/`eps2` bounding how many
/// windows the search considers. `base` is the doc-id the first element is
/// offset from (the running base the caller is building the next block
/// from); `universe` bounds the whole list.
pub fn mc_optimal_partition(
    list: &[u32],
    base: u32,
    universe: u32,
    cost_fun: CostFn,
    eps1: f64,
    eps2: f64,
) -> Vec<usize> {
    let size = list.len();
    if size == 0 {
        return Vec::new();
    }

    let single_block_cost =
        cost_fun((universe - base) as u64, size as u64).saturating_sub(BLOCK_COUNT_MIN_COST);

    let mut min_cost = vec![single_block_cost; size + 1];
    min_cost[0] = 0;

    let mut windows: Vec<CostWindow> = Vec::new();
    let cost_lb = cost_fun(1, 1);
    let mut cost_bound = cost_lb.max(1);
    loop {
        windows.push(CostWindow::new(list, base, cost_bound));
        if cost_bound >= single_block_cost {
            break;
        }
        if eps1 != 0.0 && (cost_bound as f64) >= (cost_lb as f64) / eps1 {
            break;
        }
        let grown = (cost_bound as f64) * (1.0 + eps2);
        let next_bound = grown.ceil() as u64;
        cost_bound = if next_bound > cost_bound {
            next_bound
        } else {
            cost_bound + 1
        };
    }

    let mut path = vec![0usize; size + 1];

    for i in 0..size {
        let mut last_end = i + 1;
        for window in windows.iter_mut() {
            while window.end < last_end {
                window.advance_end();
            }
            loop {
                let window_cost = cost_fun(window.universe(), window.size());
                if min_cost[i] + window_cost < min_cost[window.end] {
                    min_cost[window.end] = min_cost[i] + window_cost;
                    path[window.end] = i;
                }
                last_end = window.end;
                if window.end == size {
                    break;
                }
                if window_cost >= window.cost_upper_bound {
                    break;
                }
                window.advance_end();
            }
            window.advance_start();
        }
    }

    let mut boundaries = Vec::new();
    let mut curr_pos = size;
    while curr_pos != 0 {
        boundaries.push(curr_pos);
        curr_pos = path[curr_pos];
    }
    boundaries.reverse();

    let mut sizes = Vec::with_capacity(boundaries.len());
    let mut prev = 0usize;
    for b in boundaries {
        sizes.push(b - prev);
        prev = b;
    }
    sizes
}
