use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::{Error, Result};

#[derive(Debug, Clone)]
struct HeapEntry<V, P> {
    item: V,
    priority: P,
    /// Insertion sequence number, used to break priority ties.
    seq: u64,
}

/// A binary min-heap over items keyed by priority, with in-place priority decrease.
///
/// The heap keeps an `item -> slot` index that is updated on every swap, so
/// `decrease_priority` finds an item in O(1) and restores heap order in
/// O(log n). Equal priorities are extracted in insertion order.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: PartialOrd + Copy + Debug,
{
    /// Heap-ordered entries; the minimum lives at slot 0
    entries: Vec<HeapEntry<V, P>>,

    /// Current slot of every item held in `entries`
    positions: HashMap<V, usize>,

    next_seq: u64,
}

impl<V, P> Default for PriorityFrontier<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: PartialOrd + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> PriorityFrontier<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: PartialOrd + Copy + Debug,
{
    /// Creates a new empty frontier
    pub fn new() -> Self {
        PriorityFrontier {
            entries: Vec::new(),
            positions: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Creates a new empty frontier with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        PriorityFrontier {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Creates a frontier holding only `item`
    pub fn singleton(item: V, priority: P) -> Self {
        let mut positions = HashMap::new();
        positions.insert(item, 0);
        PriorityFrontier {
            entries: vec![HeapEntry {
                item,
                priority,
                seq: 0,
            }],
            positions,
            next_seq: 1,
        }
    }

    /// Returns true if the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of items in the frontier
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if `item` is currently held
    pub fn contains(&self, item: &V) -> bool {
        self.positions.contains_key(item)
    }

    /// Returns the current priority of `item`, if it is held
    pub fn priority(&self, item: &V) -> Option<P> {
        self.positions.get(item).map(|&slot| self.entries[slot].priority)
    }

    /// Returns the item with the smallest priority without removing it
    pub fn peek(&self) -> Option<(V, P)> {
        self.entries.first().map(|entry| (entry.item, entry.priority))
    }

    /// Adds an item that is not currently held.
    ///
    /// Returns [`Error::DuplicateFrontierEntry`] if the item is already
    /// present; use [`PriorityFrontier::decrease_priority`] to update it.
    pub fn insert(&mut self, item: V, priority: P) -> Result<()> {
        if self.positions.contains_key(&item) {
            return Err(Error::DuplicateFrontierEntry(format!("{:?}", item)));
        }

        let slot = self.entries.len();
        self.entries.push(HeapEntry {
            item,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.positions.insert(item, slot);
        self.sift_up(slot);
        Ok(())
    }

    /// Removes and returns the item with the smallest priority.
    ///
    /// # Panics
    ///
    /// Panics if the frontier is empty. Callers are expected to guard the
    /// call with [`PriorityFrontier::is_empty`]; see
    /// [`PriorityFrontier::try_extract_min`] for the non-panicking form.
    pub fn extract_min(&mut self) -> (V, P) {
        match self.try_extract_min() {
            Some(min) => min,
            None => panic!("extract_min called on an empty priority frontier"),
        }
    }

    /// Removes and returns the item with the smallest priority, or `None` if empty
    pub fn try_extract_min(&mut self) -> Option<(V, P)> {
        if self.entries.is_empty() {
            return None;
        }

        let last = self.entries.len() - 1;
        self.swap(0, last);
        let entry = self.entries.pop()?;
        self.positions.remove(&entry.item);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((entry.item, entry.priority))
    }

    /// Lowers the priority of a held item and restores heap order.
    ///
    /// Returns false, leaving the frontier untouched, if the item is not held
    /// or `priority` is not strictly smaller than its current priority.
    pub fn decrease_priority(&mut self, item: V, priority: P) -> bool {
        let slot = match self.positions.get(&item) {
            Some(&slot) => slot,
            None => return false,
        };
        let lowers = matches!(
            priority.partial_cmp(&self.entries[slot].priority),
            Some(Ordering::Less)
        );
        if !lowers {
            return false;
        }

        self.entries[slot].priority = priority;
        self.sift_up(slot);
        true
    }

    /// Clears the frontier
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    /// Heap order: smaller priority first, then earlier insertion.
    fn precedes(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.entries[i], &self.entries[j]);
        match a.priority.partial_cmp(&b.priority) {
            Some(Ordering::Less) => true,
            Some(Ordering::Greater) => false,
            Some(Ordering::Equal) | None => a.seq < b.seq,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.entries.swap(i, j);
        self.positions.insert(self.entries[i].item, i);
        self.positions.insert(self.entries[j].item, j);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.precedes(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.precedes(left, smallest) {
                smallest = left;
            }
            if right < len && self.precedes(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    impl<V, P> PriorityFrontier<V, P>
    where
        V: Copy + Eq + Hash + Debug,
        P: PartialOrd + Copy + Debug,
    {
        fn assert_invariants(&self) {
            assert_eq!(self.entries.len(), self.positions.len());
            for (slot, entry) in self.entries.iter().enumerate() {
                assert_eq!(self.positions[&entry.item], slot);
                if slot > 0 {
                    assert!(!self.precedes(slot, (slot - 1) / 2));
                }
            }
        }
    }

    #[test]
    fn positions_track_every_swap() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut frontier: PriorityFrontier<u32, u32> = PriorityFrontier::new();
        let mut live: HashMap<u32, u32> = HashMap::new();
        let mut next_item = 0u32;

        for _ in 0..2_000 {
            match rng.gen_range(0..3) {
                0 => {
                    let priority = rng.gen_range(0..1_000);
                    frontier.insert(next_item, priority).unwrap();
                    live.insert(next_item, priority);
                    next_item += 1;
                }
                1 if !live.is_empty() => {
                    let (item, priority) = frontier.extract_min();
                    let expected_min = *live.values().min().unwrap();
                    assert_eq!(priority, expected_min);
                    assert_eq!(live.remove(&item), Some(priority));
                }
                _ if !live.is_empty() => {
                    let item = *live.keys().choose(&mut rng).unwrap();
                    let current = live[&item];
                    let lowered = current.saturating_sub(rng.gen_range(0..50));
                    let changed = frontier.decrease_priority(item, lowered);
                    assert_eq!(changed, lowered < current);
                    live.insert(item, lowered);
                }
                _ => {}
            }
            frontier.assert_invariants();
            assert_eq!(frontier.len(), live.len());
        }
    }

    #[test]
    fn decrease_keeps_discovery_order_for_ties() {
        let mut frontier = PriorityFrontier::new();
        frontier.insert('a', 5).unwrap();
        frontier.insert('b', 9).unwrap();
        frontier.insert('c', 7).unwrap();

        // 'b' was inserted before 'c', so after both drop to 5 it still follows 'a'.
        assert!(frontier.decrease_priority('c', 5));
        assert!(frontier.decrease_priority('b', 5));

        assert_eq!(frontier.extract_min(), ('a', 5));
        assert_eq!(frontier.extract_min(), ('b', 5));
        assert_eq!(frontier.extract_min(), ('c', 5));
        assert!(frontier.is_empty());
    }
}
