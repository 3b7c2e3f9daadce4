//! Minimizer extraction.
//!
//! For each window of `w` consecutive k-mers the canonical k-mer with the
//! smallest hash is the window's minimizer. A monotonic deque keeps the
//! sliding-window minimum in O(n): the front always holds the minimum of the
//! current window, entries that left the window are popped from the front,
//! and entries dominated by a new (smaller) hash are popped from the back.

use super::encoding::{hash64, KmerPair};
use super::workspace::MinimizerWorkspace;

/// Extract the unique canonical minimizers of one sequence.
///
/// Every emitted value is `hash64(canonical) << 8 | k`, with the k-mer span
/// in the low byte. Each distinct minimizer is emitted exactly once per
/// sequence, in first-seen order, into `ws.buffer`.
///
/// Sequences shorter than `w + k - 1` produce no minimizers; that is not an
/// error at this stage. Strand-symmetric k-mers (forward == reverse
/// complement) are skipped because their strand cannot be resolved, and any
/// k-mer overlapping a non-ACGT base is suppressed.
///
/// # Arguments
/// * `seq` - sequence bytes (case insensitive; non-ACGT resets validity)
/// * `k` - k-mer size (1..=31, validated upstream)
/// * `w` - window size in k-mers (1..=256, validated upstream)
/// * `ws` - worker scratch space; output lands in `ws.buffer`
pub fn extract_into(seq: &[u8], k: usize, w: usize, ws: &mut MinimizerWorkspace) {
    ws.buffer.clear();
    ws.queue.clear();
    ws.seen.clear();

    let len = seq.len();
    if len < w + k - 1 {
        return;
    }

    let span = k as u64;
    let mut kmers = KmerPair::new(k);

    for (i, &byte) in seq.iter().enumerate() {
        kmers.push(byte);

        // no k-mer ends before position k-1
        if i + 1 < k {
            continue;
        }
        // a non-ACGT base inside the current k-mer suppresses it
        if !kmers.is_complete() {
            continue;
        }
        let canonical = match kmers.canonical() {
            Some(c) => c,
            None => continue,
        };

        let pos = i + 1 - k;
        let hash = (hash64(canonical, kmers.mask()) << 8) | span;

        // evict k-mers that have left the window
        while let Some(&(p, _)) = ws.queue.front() {
            if p + w <= pos {
                ws.queue.pop_front();
            } else {
                break;
            }
        }
        // hashes >= the incoming one can never be a window minimum again
        while let Some(&(_, v)) = ws.queue.back() {
            if v >= hash {
                ws.queue.pop_back();
            } else {
                break;
            }
        }
        ws.queue.push_back((pos, hash));

        // a full window of w k-mers ends at i = w + k - 2
        if i >= w + k - 2 {
            if let Some(&(_, min_h)) = ws.queue.front() {
                if ws.seen.insert(min_h) {
                    ws.buffer.push(min_h);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(seq: &[u8], k: usize, w: usize) -> Vec<u64> {
        let mut ws = MinimizerWorkspace::new();
        extract_into(seq, k, w, &mut ws);
        ws.buffer.clone()
    }

    fn reverse_complement_seq(seq: &[u8]) -> Vec<u8> {
        seq.iter()
            .rev()
            .map(|b| match b {
                b'A' => b'T',
                b'C' => b'G',
                b'G' => b'C',
                b'T' => b'A',
                other => *other,
            })
            .collect()
    }

    #[test]
    fn test_extract_basic() {
        let mins = extract(b"ACGTACGTACGT", 4, 4);
        assert!(!mins.is_empty());
    }

    #[test]
    fn test_extract_short_sequence() {
        // needs at least w + k - 1 = 7 bases
        assert!(extract(b"ACGTAC", 4, 4).is_empty());
        assert!(!extract(b"ACGTACGTA", 4, 4).is_empty());
    }

    #[test]
    fn test_span_in_low_byte() {
        for m in extract(b"ACGGTCAGGTCAGGAC", 5, 4) {
            assert_eq!(m & 0xFF, 5);
        }
    }

    #[test]
    fn test_unique_per_sequence() {
        // a repetitive sequence re-selects the same minimizers; the output
        // set must still be duplicate free
        let seq: Vec<u8> = b"ACGGTCA".iter().cycle().take(140).copied().collect();
        let mins = extract(&seq, 7, 5);
        let mut deduped = mins.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(mins.len(), deduped.len());
    }

    #[test]
    fn test_strand_symmetry() {
        // canonical k-mers make a sequence and its reverse complement
        // decompose to the same minimizer set
        let seq = b"GGACTTCAGGTCAACGGTTACCAGGACT";
        let rc = reverse_complement_seq(seq);

        let mut fwd = extract(seq, 5, 5);
        let mut rev = extract(&rc, 5, 5);
        fwd.sort_unstable();
        rev.sort_unstable();
        assert_eq!(fwd, rev);
    }

    /// O(n*w) reference implementation used to validate the deque.
    fn reference_minimizers(seq: &[u8], k: usize, w: usize) -> Vec<u64> {
        if seq.len() < w + k - 1 {
            return vec![];
        }
        // hash of the canonical k-mer starting at pos, or None if the k-mer
        // overlaps a non-ACGT base or is strand symmetric
        let mut hashes: Vec<Option<u64>> = Vec::new();
        let mut pair = KmerPair::new(k);
        for (i, &b) in seq.iter().enumerate() {
            pair.push(b);
            if i + 1 < k {
                continue;
            }
            let h = if pair.is_complete() {
                pair.canonical()
                    .map(|c| (hash64(c, pair.mask()) << 8) | k as u64)
            } else {
                None
            };
            hashes.push(h);
        }

        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for pos in 0..hashes.len() {
            // windows are only evaluated when the k-mer ending the window exists
            if hashes[pos].is_none() {
                continue;
            }
            let i = pos + k - 1;
            if i < w + k - 2 {
                continue;
            }
            let lo = pos.saturating_sub(w - 1);
            let min = (lo..=pos).filter_map(|p| hashes[p]).min();
            if let Some(m) = min {
                if seen.insert(m) {
                    out.push(m);
                }
            }
        }
        out
    }

    #[test]
    fn test_matches_reference_implementation() {
        let cases: Vec<(&[u8], usize, usize)> = vec![
            (b"ACGTACGTACGT", 4, 4),
            (b"ACGGTCAGGTCAGGACGGTCAGGTCAGGAC", 5, 4),
            (b"ACGGTCAGGTCAGGNCGGTCAGGTCAGGAC", 5, 4),
            (b"GGACTTCAGGTCAACGGTTACCAGGACT", 7, 3),
            (b"ACGGTCAGGACT", 5, 1),
        ];
        for (seq, k, w) in cases {
            assert_eq!(
                extract(seq, k, w),
                reference_minimizers(seq, k, w),
                "mismatch for k={} w={}",
                k,
                w
            );
        }
    }

    #[test]
    fn test_n_suppresses_overlapping_kmers() {
        let with_n = extract(b"ACGGTCAGGTCAGGNCGGTCAGGTCAGGAC", 5, 4);
        assert!(!with_n.is_empty());
        assert_eq!(
            with_n,
            reference_minimizers(b"ACGGTCAGGTCAGGNCGGTCAGGTCAGGAC", 5, 4)
        );
    }

    #[test]
    fn test_n_only_sequence_yields_nothing() {
        let seq = vec![b'N'; 64];
        assert!(extract(&seq, 5, 4).is_empty());
    }

    #[test]
    fn test_symmetric_kmers_are_skipped() {
        // every 4-mer of an AT repeat (ATAT, TATA) is its own reverse
        // complement, so the strand can never be resolved
        let seq: Vec<u8> = b"AT".iter().cycle().take(40).copied().collect();
        assert!(extract(&seq, 4, 4).is_empty());
    }

    #[test]
    fn test_window_one_emits_every_canonical_kmer() {
        let seq = b"ACGGTCAGGACT";
        let k = 5;
        let mins = extract(seq, k, 1);
        // w = 1: each non-symmetric k-mer is its own window minimum
        let mut expected = std::collections::HashSet::new();
        let mut pair = KmerPair::new(k);
        for (i, &b) in seq.iter().enumerate() {
            pair.push(b);
            if i + 1 >= k && pair.is_complete() {
                if let Some(c) = pair.canonical() {
                    expected.insert((hash64(c, pair.mask()) << 8) | k as u64);
                }
            }
        }
        let got: std::collections::HashSet<u64> = mins.into_iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_deterministic() {
        let seq: Vec<u8> = b"ACGGTCAGGTTACCAGGACTAACGGTTAC"
            .iter()
            .cycle()
            .take(300)
            .copied()
            .collect();
        assert_eq!(extract(&seq, 7, 10), extract(&seq, 7, 10));
    }
}
