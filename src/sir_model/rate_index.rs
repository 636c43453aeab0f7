/// # Prefix sums over the node rates
/// * Fenwick tree: point update and "first index whose prefix sum exceeds x"
///   both in `O(log N)`
/// * keeps the leaf values, so the tree can be rebuilt exactly from them
#[derive(Clone, Debug)]
pub struct CumulativeRateIndex
{
    leaves: Vec<f64>,
    tree: Vec<f64>,
    highest_bit: usize,
    updates_since_rebuild: usize,
}

impl CumulativeRateIndex
{
    pub fn new(n: usize) -> Self
    {
        let highest_bit = if n == 0 {
            0
        } else {
            1 << (usize::BITS - 1 - n.leading_zeros())
        };
        Self{
            leaves: vec![0.0; n],
            tree: vec![0.0; n + 1],
            highest_bit,
            updates_since_rebuild: 0
        }
    }

    pub fn len(&self) -> usize
    {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.leaves.is_empty()
    }

    #[inline]
    pub fn rate(&self, index: usize) -> f64
    {
        self.leaves[index]
    }

    pub fn set(&mut self, index: usize, rate: f64)
    {
        debug_assert!(rate >= 0.0);
        let delta = rate - self.leaves[index];
        if delta == 0.0 {
            return;
        }
        self.leaves[index] = rate;

        // rounding errors of the incremental updates are flushed regularly
        self.updates_since_rebuild += 1;
        if self.updates_since_rebuild >= self.leaves.len().max(64) {
            self.rebuild();
            return;
        }

        let mut i = index + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    /// recompute the tree from the leaves in O(N)
    pub fn rebuild(&mut self)
    {
        self.tree[0] = 0.0;
        self.tree[1..].copy_from_slice(&self.leaves);
        for i in 1..self.tree.len() {
            let parent = i + (i & i.wrapping_neg());
            if parent < self.tree.len() {
                self.tree[parent] += self.tree[i];
            }
        }
        self.updates_since_rebuild = 0;
    }

    pub fn clear(&mut self)
    {
        self.leaves.iter_mut().for_each(|r| *r = 0.0);
        self.tree.iter_mut().for_each(|r| *r = 0.0);
        self.updates_since_rebuild = 0;
    }

    /// Sum of all rates
    pub fn total(&self) -> f64
    {
        self.prefix_sum(self.leaves.len())
    }

    /// sum of the first `count` rates
    pub fn prefix_sum(&self, count: usize) -> f64
    {
        let mut sum = 0.0;
        let mut i = count;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// # Smallest index whose prefix sum strictly exceeds `draw`
    /// * returns `None` if there is no such index
    pub fn find(&self, draw: f64) -> Option<usize>
    {
        let mut pos = 0;
        let mut remaining = draw;
        let mut step = self.highest_bit;
        while step > 0 {
            let next = pos + step;
            if next < self.tree.len() && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        // pos is the largest count whose prefix sum is <= draw
        (pos < self.leaves.len()).then_some(pos)
    }

    /// # Select a node proportional to its rate
    /// * same as `find`, but never returns an index with rate 0.
    ///   Those can only be hit through rounding at the interval borders
    pub fn select(&self, draw: f64) -> Option<usize>
    {
        let found = self.find(draw)
            .unwrap_or(self.leaves.len().saturating_sub(1));
        if self.leaves.get(found).is_some_and(|&r| r > 0.0) {
            return Some(found);
        }
        self.leaves[found..].iter()
            .position(|&r| r > 0.0)
            .map(|offset| found + offset)
            .or_else(
                || self.leaves[..found].iter().rposition(|&r| r > 0.0)
            )
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn index_from(rates: &[f64]) -> CumulativeRateIndex
    {
        let mut index = CumulativeRateIndex::new(rates.len());
        for (i, &r) in rates.iter().enumerate() {
            index.set(i, r);
        }
        index
    }

    #[test]
    fn prefix_sums()
    {
        let index = index_from(&[1.0, 0.0, 2.0, 0.5, 3.0]);
        assert_eq!(index.prefix_sum(0), 0.0);
        assert_eq!(index.prefix_sum(1), 1.0);
        assert_eq!(index.prefix_sum(3), 3.0);
        assert_eq!(index.total(), 6.5);
    }

    #[test]
    fn first_index_strictly_exceeding()
    {
        let index = index_from(&[1.0, 0.0, 2.0, 0.5, 3.0]);
        assert_eq!(index.find(0.0), Some(0));
        assert_eq!(index.find(0.999), Some(0));
        // prefix sum of index 0 is exactly 1.0, which does not exceed 1.0
        assert_eq!(index.find(1.0), Some(2));
        assert_eq!(index.find(2.99), Some(2));
        assert_eq!(index.find(3.0), Some(3));
        assert_eq!(index.find(3.5), Some(4));
        assert_eq!(index.find(6.4), Some(4));
        assert_eq!(index.find(6.5), None);
    }

    #[test]
    fn select_skips_zero_rates()
    {
        let index = index_from(&[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(index.select(0.5), Some(1));
        // past the end: fall back to the last node with a positive rate
        assert_eq!(index.select(1.0), Some(1));

        let empty = index_from(&[0.0, 0.0]);
        assert_eq!(empty.select(0.1), None);
    }

    #[test]
    fn updates_and_rebuild_agree()
    {
        let mut index = index_from(&[0.3, 0.1, 0.2, 0.7, 0.0, 1.1, 0.4]);
        index.set(3, 0.0);
        index.set(4, 2.0);
        index.set(0, 0.1);
        let before: Vec<_> = (0..=7).map(|c| index.prefix_sum(c)).collect();
        index.rebuild();
        for (c, b) in before.into_iter().enumerate() {
            assert!((index.prefix_sum(c) - b).abs() < 1e-12);
        }
        assert!((index.total() - 3.9).abs() < 1e-12);
    }
}
