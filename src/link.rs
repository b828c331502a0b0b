use std::collections::VecDeque;

use crate::consistency::check_consistency;
use crate::store::WalkStore;

/// Closes each root's walk over the walks of every contig it reaches.
pub struct Linker {
    debug: bool,
}

impl Linker {
    pub fn new(debug: bool) -> Self {
        Linker { debug }
    }

    /// Grow `root`'s walk by folding in the original walk of every
    /// contig it mentions, transitively, and record the result.
    ///
    /// Candidates always come from `originals`, so the order roots are
    /// processed in cannot change any single result. An inconsistent or
    /// ambiguous candidate is skipped, leaving both walks as they were.
    pub fn discover(&self, root: usize, originals: &WalkStore, results: &mut WalkStore) {
        let mut canonical = match originals.get(root) {
            Some(walk) => walk.clone(),
            None => return,
        };
        if self.debug {
            eprintln!("[link] initial canonical walk ({}): {}", root, canonical);
        }

        let mut pending: VecDeque<_> = canonical.steps().iter().copied().collect();
        while let Some(step) = pending.pop_front() {
            let node = step.contig_id();
            if node == root {
                continue;
            }
            let mut candidate = match originals.get(node) {
                Some(walk) => walk.clone(),
                None => continue,
            };
            if self.debug {
                eprintln!("[link] checking node {}", node);
                eprintln!("  ref: {}", canonical);
                eprintln!("   in: {}", candidate);
            }
            let alignment = match check_consistency(node, &canonical, &mut candidate, self.debug) {
                Some(alignment) => alignment,
                None => continue,
            };
            let before = candidate.steps()[..alignment.start2].to_vec();
            let after = candidate.steps()[alignment.end2 + 1..].to_vec();
            pending.extend(before.iter().copied());
            pending.extend(after.iter().copied());
            canonical.prepend(&before);
            canonical.append(&after);
            if self.debug {
                eprintln!("  new: {}", canonical);
            }
        }
        results.put(root, canonical);
    }

    /// Drop walks that `root`'s walk already covers.
    ///
    /// Unlike discovery this pass compares closed walks against each
    /// other, so a walk consumed here must be removed from `results`
    /// before later roots are processed. A root whose walk was removed
    /// by an earlier pass is skipped.
    pub fn consolidate(&self, root: usize, results: &mut WalkStore) {
        let canonical = match results.remove(root) {
            Some(walk) => walk,
            None => return,
        };
        let mut keep = true;

        let mut pending: VecDeque<_> = canonical.steps().iter().copied().collect();
        while let Some(step) = pending.pop_front() {
            let node = step.contig_id();
            if node == root {
                continue;
            }
            let mut candidate = match results.get(node) {
                Some(walk) => walk.clone(),
                None => continue,
            };
            if self.debug {
                eprintln!("[link] checking node {}", node);
                eprintln!("  ref: {}", canonical);
                eprintln!("   in: {}", candidate);
            }
            let alignment = match check_consistency(node, &canonical, &mut candidate, self.debug) {
                Some(alignment) => alignment,
                None => continue,
            };

            if alignment.start2 == 0 && alignment.end2 == candidate.last_index() {
                if self.debug {
                    eprintln!("[link] removing subsumed: {}", candidate);
                }
                results.remove(node);
                continue;
            }

            // The walks agree on their overlap but each extends past the
            // other, which a straight-line layout cannot produce. If one
            // walk's contig set strictly contains the other's, the
            // smaller walk is a fragment of a cycle through the larger
            // and is dropped; otherwise neither can be trusted.
            let canonical_ids = canonical.contig_ids();
            let candidate_ids = candidate.contig_ids();
            let canonical_covers = candidate_ids.is_subset(&canonical_ids);
            let candidate_covers = canonical_ids.is_subset(&candidate_ids);
            if canonical_covers && !candidate_covers {
                if self.debug {
                    eprintln!("[link] removing circular: {}", candidate);
                }
                results.remove(node);
                continue;
            }
            if candidate_covers && !canonical_covers {
                if self.debug {
                    eprintln!("[link] removing circular: {}", canonical);
                }
                keep = false;
                break;
            }
            eprintln!(
                "pathmerge: warning: possible circular paths involving contig {}",
                node
            );
        }

        if keep {
            results.put(root, canonical);
        }
    }
}
