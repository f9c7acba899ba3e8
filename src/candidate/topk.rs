//! Bounded top-K selection of the closest records.

use std::cmp::Ordering;

/// Distance of one database record to the query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Hit {
    /// Position of the record in the database snapshot.
    pub index: usize,
    pub distance: f64,
}

/// Ascending distance, then ascending database position.
fn hit_cmp_asc(a: &Hit, b: &Hit) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.index.cmp(&b.index))
}

pub(crate) fn sort_hits_asc(hits: &mut [Hit]) {
    hits.sort_by(hit_cmp_asc);
}

/// Top-K container with O(k) insertion cost.
pub(crate) struct TopK {
    k: usize,
    items: Vec<Hit>,
}

impl TopK {
    /// Creates a collector for the `k` closest of at most `candidates` hits.
    ///
    /// Only `min(k, candidates)` slots are reserved, so a huge `k` costs
    /// nothing up front.
    pub(crate) fn new(k: usize, candidates: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k.min(candidates)),
        }
    }

    /// Pushes a hit, evicting the farthest one if at capacity.
    pub(crate) fn push(&mut self, hit: Hit) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(hit);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if hit_cmp_asc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if hit_cmp_asc(&hit, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = hit;
        }
    }

    /// Returns hits sorted closest first.
    pub(crate) fn into_sorted_asc(mut self) -> Vec<Hit> {
        sort_hits_asc(&mut self.items);
        self.items
    }
}

impl Extend<Hit> for TopK {
    fn extend<I: IntoIterator<Item = Hit>>(&mut self, iter: I) {
        for hit in iter {
            self.push(hit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Hit, TopK};

    fn hit(index: usize, distance: f64) -> Hit {
        Hit { index, distance }
    }

    #[test]
    fn keeps_closest_hits_in_order() {
        let mut topk = TopK::new(2, 4);
        topk.extend([hit(0, 3.0), hit(1, 1.0), hit(2, 2.0), hit(3, 5.0)]);
        assert_eq!(topk.into_sorted_asc(), vec![hit(1, 1.0), hit(2, 2.0)]);
    }

    #[test]
    fn ties_prefer_earlier_records() {
        let mut topk = TopK::new(2, 4);
        topk.extend([hit(4, 1.0), hit(2, 1.0), hit(7, 1.0), hit(0, 1.0)]);
        assert_eq!(topk.into_sorted_asc(), vec![hit(0, 1.0), hit(2, 1.0)]);
    }

    #[test]
    fn unbounded_k_keeps_every_hit() {
        let mut topk = TopK::new(usize::MAX, 3);
        topk.extend([hit(2, 0.5), hit(0, 2.0), hit(1, 1.0)]);
        assert_eq!(
            topk.into_sorted_asc(),
            vec![hit(2, 0.5), hit(1, 1.0), hit(0, 2.0)]
        );
    }

    #[test]
    fn zero_capacity_collects_nothing() {
        let mut topk = TopK::new(0, 1);
        topk.push(hit(0, 0.0));
        assert!(topk.into_sorted_asc().is_empty());
    }
}
