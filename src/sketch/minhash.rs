//! Bottom-k (KMV) and k-hash-function (KHF) MinHash sketches.
//!
//! Both are optional companions to the histosketch: they see the same
//! stream of hashed minimizers and summarise set membership rather than the
//! frequency spectrum. They share a minimal interface: `add_hash`,
//! `finalize`, `similarity`.

use std::collections::{BinaryHeap, HashSet};

/// K-hash-functions MinHash: slot i tracks the minimum of the i-th derived
/// hash `h + i*h` over the stream.
#[derive(Debug, Clone)]
pub struct KhfSketch {
    sketch: Vec<u64>,
}

impl KhfSketch {
    pub fn new(sketch_size: usize) -> Self {
        KhfSketch {
            sketch: vec![u64::MAX; sketch_size],
        }
    }

    /// Evaluate a hash against every slot, keeping any new minimum.
    pub fn add_hash(&mut self, hash: u64) {
        for (i, slot) in self.sketch.iter_mut().enumerate() {
            let derived = hash.wrapping_add((i as u64).wrapping_mul(hash));
            if derived < *slot {
                *slot = derived;
            }
        }
    }

    /// Keep the per-slot minimum of two sketches.
    pub fn merge(&mut self, other: &KhfSketch) {
        for (slot, &theirs) in self.sketch.iter_mut().zip(&other.sketch) {
            if theirs < *slot {
                *slot = theirs;
            }
        }
    }

    /// The sketch as a slot array.
    pub fn finalize(&self) -> Vec<u64> {
        self.sketch.clone()
    }

    /// Jaccard estimate by positional slot equality.
    pub fn similarity(&self, other: &KhfSketch) -> f64 {
        khf_similarity(&self.sketch, &other.sketch)
    }
}

/// Positional-equality similarity over the shared prefix of two slot arrays.
pub fn khf_similarity(a: &[u64], b: &[u64]) -> f64 {
    let shared = a.len().min(b.len());
    if shared == 0 {
        return 0.0;
    }
    let matching = a.iter().zip(b).filter(|(x, y)| x == y).count();
    matching as f64 / shared as f64
}

/// Bottom-k MinHash: a max-heap of capacity L holding the smallest L
/// distinct hashes seen so far.
#[derive(Debug, Clone)]
pub struct KmvSketch {
    capacity: usize,
    heap: BinaryHeap<u64>,
    members: HashSet<u64>,
}

impl KmvSketch {
    pub fn new(capacity: usize) -> Self {
        KmvSketch {
            capacity,
            heap: BinaryHeap::with_capacity(capacity + 1),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Offer a hash to the sketch.
    ///
    /// Duplicates are ignored. Once the heap is full the root (the largest
    /// retained hash) is replaced whenever a smaller hash arrives.
    pub fn add_hash(&mut self, hash: u64) {
        if self.members.contains(&hash) {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(hash);
            self.members.insert(hash);
        } else if let Some(&root) = self.heap.peek() {
            if hash < root {
                self.heap.pop();
                self.members.remove(&root);
                self.heap.push(hash);
                self.members.insert(hash);
            }
        }
    }

    /// Materialise the retained hashes as a sorted ascending array.
    pub fn finalize(&self) -> Vec<u64> {
        let mut values: Vec<u64> = self.heap.iter().copied().collect();
        values.sort_unstable();
        values
    }

    /// Jaccard estimate from the intersection of two bottom-k sketches.
    pub fn similarity(&self, other: &KmvSketch) -> f64 {
        kmv_similarity(&self.finalize(), &other.finalize())
    }
}

/// Intersection of two bottom-k arrays divided by the larger cardinality.
pub fn kmv_similarity(a: &[u64], b: &[u64]) -> f64 {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if longer.is_empty() {
        return 0.0;
    }
    let members: HashSet<u64> = longer.iter().copied().collect();
    let intersect = shorter.iter().filter(|h| members.contains(h)).count();
    intersect as f64 / longer.len() as f64
}
