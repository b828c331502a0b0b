use std::io;

use crate::fasta::Contig;
use crate::path::Walk;
use crate::sequence::reverse_complement;

/// The merged sequence for one walk plus the summed read coverage of
/// the contigs it visits.
#[derive(Debug)]
pub struct StitchedWalk {
    pub seq: Vec<u8>,
    pub coverage: u64,
}

fn defect(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::Other, message)
}

fn contig_at(contigs: &[Contig], id: usize) -> io::Result<&Contig> {
    contigs.get(id).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "walk references contig {} but only {} contigs were loaded",
                id,
                contigs.len()
            ),
        )
    })
}

fn oriented_seq(contig: &Contig, reverse: bool) -> Vec<u8> {
    if reverse {
        reverse_complement(&contig.seq)
    } else {
        contig.seq.clone()
    }
}

/// Splice the walk's contig sequences into one, dropping the `kmer - 1`
/// base overlap between adjacent contigs.
///
/// Adjacent contigs in a walk came out of the same de Bruijn graph, so
/// their oriented sequences must share a `kmer - 1` base junction; a
/// mismatch means the paths and contigs disagree and the merge cannot
/// be trusted.
pub fn stitch_walk(walk: &Walk, contigs: &[Contig], kmer: usize) -> io::Result<StitchedWalk> {
    assert!(kmer > 0, "k-mer size must be positive");
    let overlap = kmer - 1;

    let first = walk.first();
    let contig = contig_at(contigs, first.contig_id())?;
    let mut seq = oriented_seq(contig, first.is_reverse());
    let mut coverage = contig.coverage;

    for index in 1..walk.len() {
        let step = walk.step(index);
        let contig = contig_at(contigs, step.contig_id())?;
        let piece = oriented_seq(contig, step.is_reverse());
        if seq.len() < overlap || piece.len() < overlap {
            return Err(defect(format!(
                "internal: contig {} is shorter than the {} base overlap in walk {}",
                step.contig_id(),
                overlap,
                walk
            )));
        }
        let tail = &seq[seq.len() - overlap..];
        let head = &piece[..overlap];
        if tail != head {
            return Err(defect(format!(
                "internal: overlap mismatch at {} in walk {}: {} != {}",
                step,
                walk,
                String::from_utf8_lossy(tail),
                String::from_utf8_lossy(head)
            )));
        }
        seq.extend_from_slice(&piece[overlap..]);
        coverage += contig.coverage;
    }

    Ok(StitchedWalk { seq, coverage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathStep;

    fn walk(steps: &[(usize, bool)]) -> Walk {
        Walk::from_steps(
            steps
                .iter()
                .map(|&(id, rev)| PathStep::new(id, rev))
                .collect(),
        )
    }

    fn contig(name: &str, seq: &str, coverage: u64) -> Contig {
        Contig {
            name: name.to_string(),
            seq: seq.as_bytes().to_vec(),
            coverage,
        }
    }

    #[test]
    fn test_stitch_forward_chain() {
        let contigs = vec![
            contig("0", "TTAC", 10),
            contig("1", "ACGT", 20),
            contig("2", "GTAC", 30),
        ];
        let walk = walk(&[(0, false), (1, false), (2, false)]);
        let merged = stitch_walk(&walk, &contigs, 3).unwrap();
        assert_eq!(merged.seq, b"TTACGTAC");
        assert_eq!(merged.coverage, 60);
    }

    #[test]
    fn test_stitch_reverse_step() {
        // rc("GGAC") = "GTCC", which continues "TTACGT".
        let contigs = vec![
            contig("0", "TTAC", 5),
            contig("1", "ACGT", 6),
            contig("2", "GGAC", 7),
        ];
        let walk = walk(&[(0, false), (1, false), (2, true)]);
        let merged = stitch_walk(&walk, &contigs, 3).unwrap();
        assert_eq!(merged.seq, b"TTACGTCC");
        assert_eq!(merged.coverage, 18);
    }

    #[test]
    fn test_stitch_single_step() {
        let contigs = vec![contig("0", "ACGT", 9)];
        let merged = stitch_walk(&walk(&[(0, true)]), &contigs, 3).unwrap();
        assert_eq!(merged.seq, b"ACGT");
        assert_eq!(merged.coverage, 9);
    }

    #[test]
    fn test_stitch_kmer_one_concatenates() {
        let contigs = vec![contig("0", "AA", 1), contig("1", "CC", 2)];
        let walk = walk(&[(0, false), (1, false)]);
        let merged = stitch_walk(&walk, &contigs, 1).unwrap();
        assert_eq!(merged.seq, b"AACC");
    }

    #[test]
    fn test_stitch_overlap_mismatch_is_error() {
        let contigs = vec![contig("0", "AAAA", 1), contig("1", "GGGG", 1)];
        let walk = walk(&[(0, false), (1, false)]);
        let error = stitch_walk(&walk, &contigs, 3).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_stitch_short_contig_is_error() {
        let contigs = vec![contig("0", "ACGTACGT", 1), contig("1", "GT", 1)];
        let walk = walk(&[(0, false), (1, false)]);
        let error = stitch_walk(&walk, &contigs, 5).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::Other);
    }

    #[test]
    fn test_stitch_unknown_contig_is_error() {
        let contigs = vec![contig("0", "ACGT", 1)];
        let walk = walk(&[(0, false), (7, false)]);
        let error = stitch_walk(&walk, &contigs, 3).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }
}
