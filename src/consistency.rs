use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::path::Walk;

/// The aligned index ranges found by `check_consistency`.
///
/// `start1..=end1` in the first walk lines up index for index with
/// `start2..=end2` in the second. `flipped` records whether the second
/// walk had to be reverse-complemented relative to the orientation it
/// was passed in with; on return the walk is left in that orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub start1: usize,
    pub end1: usize,
    pub start2: usize,
    pub end2: usize,
    pub flipped: bool,
}

/// One trial alignment, keyed in the candidate map by its run length.
#[derive(Clone, Copy)]
struct Candidate {
    start1: usize,
    end1: usize,
    start2: usize,
    end2: usize,
    flipped: bool,
    duplicate: bool,
}

/// Indices whose step refers to `anchor`, highest first.
fn anchor_indices(anchor: usize, walk: &Walk) -> Vec<usize> {
    (0..walk.len())
        .rev()
        .filter(|&index| walk.step(index).contig_id() == anchor)
        .collect()
}

/// Decide whether two walks describe the same underlying stretch around
/// a shared anchor contig, and where they line up.
///
/// Every pairing of an anchor occurrence in `walk1` with one in `walk2`
/// seeds a trial alignment: if the strand bits at the paired indices
/// disagree, `walk2` is reverse-complemented first; the run is then
/// extended greedily in both directions while the contig ids agree, and
/// is only valid if neither direction stopped on a mismatch. The longest
/// valid run wins. A tie between runs of the same length is rejected as
/// ambiguous unless the run already consumes the shorter walk entirely.
///
/// Returns `None` when the walks are inconsistent or the choice would be
/// arbitrary; closure treats that as "skip", not as an error.
pub fn check_consistency(
    anchor: usize,
    walk1: &Walk,
    walk2: &mut Walk,
    debug: bool,
) -> Option<Alignment> {
    let coords1 = anchor_indices(anchor, walk1);
    let coords2 = anchor_indices(anchor, walk2);
    if coords1.is_empty() || coords2.is_empty() {
        return None;
    }

    let max1 = walk1.last_index();
    let max2 = walk2.last_index();
    let mut flipped = false;
    let mut candidates: BTreeMap<usize, Candidate> = BTreeMap::new();

    for &coord1 in &coords1 {
        for &coord2 in &coords2 {
            let mut start1 = coord1;
            let mut end1 = coord1;
            // coords2 indexes walk2 as it was passed in; mirror the index
            // when the walk is currently flipped.
            let mut start2 = if flipped { max2 - coord2 } else { coord2 };
            let mut end2 = start2;

            if walk1.step(start1).is_reverse() != walk2.step(start2).is_reverse() {
                walk2.reverse_complement();
                flipped = !flipped;
                start2 = max2 - start2;
                end2 = start2;
            }

            let mut low_valid = true;
            loop {
                if walk1.step(start1).contig_id() != walk2.step(start2).contig_id() {
                    low_valid = false;
                    break;
                }
                if start1 == 0 || start2 == 0 {
                    break;
                }
                start1 -= 1;
                start2 -= 1;
            }

            let mut high_valid = true;
            loop {
                if walk1.step(end1).contig_id() != walk2.step(end2).contig_id() {
                    high_valid = false;
                    break;
                }
                if end1 == max1 || end2 == max2 {
                    break;
                }
                end1 += 1;
                end2 += 1;
            }

            if low_valid && high_valid {
                let run = end1 - start1;
                assert_eq!(end2 - start2, run, "aligned runs must have equal length");
                match candidates.entry(run) {
                    Entry::Vacant(slot) => {
                        slot.insert(Candidate {
                            start1,
                            end1,
                            start2,
                            end2,
                            flipped,
                            duplicate: false,
                        });
                    }
                    Entry::Occupied(mut slot) => slot.get_mut().duplicate = true,
                }
            }
        }
    }

    let (run, best) = match candidates.iter().next_back() {
        Some((&run, best)) => (run, *best),
        None => {
            if debug {
                eprintln!("[consistency] no alignment at anchor {}", anchor);
                eprintln!("[consistency]   walk1: {}", walk1);
                eprintln!("[consistency]   walk2: {}", walk2);
            }
            return None;
        }
    };

    // The greedy extension stops only at walk ends, so the longest run
    // must reach the start of one walk and the end of one walk.
    assert!(
        best.start1 == 0 || best.start2 == 0,
        "maximal alignment does not reach the start of either walk"
    );
    assert!(
        best.end1 == max1 || best.end2 == max2,
        "maximal alignment does not reach the end of either walk"
    );

    // Equal-length runs at different seeds would make the merge
    // arbitrary; the tie is harmless only when the run spans the shorter
    // walk completely.
    if best.duplicate && run != max1.min(max2) {
        if debug {
            eprintln!(
                "[consistency] ambiguous alignment at anchor {} (tied run length {})",
                anchor, run
            );
        }
        return None;
    }

    if best.flipped != flipped {
        walk2.reverse_complement();
    }

    // Re-check the winning run after any re-flip.
    for offset in 0..run {
        if walk1.step(best.start1 + offset).contig_id()
            != walk2.step(best.start2 + offset).contig_id()
        {
            if debug {
                eprintln!("[consistency] re-check mismatch at anchor {}", anchor);
            }
            return None;
        }
    }

    Some(Alignment {
        start1: best.start1,
        end1: best.end1,
        start2: best.start2,
        end2: best.end2,
        flipped: best.flipped,
    })
}
