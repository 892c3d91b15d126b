use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
struct Entry<K, P> {
    key: K,
    priority: P,
    sequence: u64,
}

impl<K, P: Ord> Entry<K, P> {
    #[inline]
    fn precedes(&self, other: &Self) -> bool {
        (&self.priority, self.sequence) < (&other.priority, other.sequence)
    }
}

/// Binary min-heap keyed by `K` with decrease-key.
///
/// Each key appears at most once. Equal priorities pop in the order their
/// current priority was set, which keeps searches reproducible.
#[derive(Clone, Debug)]
pub struct PriorityQueue<K, P> {
    heap: Vec<Entry<K, P>>,
    positions: FxHashMap<K, usize>,
    next_sequence: u64,
}

impl<K, P> Default for PriorityQueue<K, P>
where
    K: Copy + Eq + Hash,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> PriorityQueue<K, P>
where
    K: Copy + Eq + Hash,
    P: Ord + Copy,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn priority(&self, key: &K) -> Option<P> {
        self.positions.get(key).map(|&index| self.heap[index].priority)
    }

    /// Inserts `key`, or lowers its priority if it is already queued with a
    /// higher one. Returns whether the queue changed.
    pub fn push(&mut self, key: K, priority: P) -> bool {
        let sequence = self.next_sequence;
        match self.positions.get(&key).copied() {
            Some(index) => {
                if priority >= self.heap[index].priority {
                    return false;
                }
                self.next_sequence += 1;
                let entry = &mut self.heap[index];
                entry.priority = priority;
                entry.sequence = sequence;
                self.sift_up(index);
            }
            None => {
                self.next_sequence += 1;
                let index = self.heap.len();
                self.heap.push(Entry {
                    key,
                    priority,
                    sequence,
                });
                self.positions.insert(key, index);
                self.sift_up(index);
            }
        }
        true
    }

    pub fn pop(&mut self) -> Option<(K, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions.remove(&entry.key);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.key, entry.priority))
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].key, a);
        self.positions.insert(self.heap[b].key, b);
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.heap[index].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}
