mod common;

use std::fs;
use std::io::{ErrorKind, Write};

use pathmerge::run_pathmerge;
use tempfile::NamedTempFile;

use common::{contig_args, path_args};

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.as_file_mut().sync_all().unwrap();
    file
}

fn path_of(file: &NamedTempFile) -> &str {
    file.path().to_str().unwrap()
}

#[test]
fn merges_overlapping_paths_into_fasta() {
    let contigs = write_file(
        ">0 4 10\nTTAC\n>1 4 20\nACGT\n>2 4 30\nGTAC\n>3 4 40\nGTTT\n",
    );
    let paths = write_file("@0+ -> 1+,2+\n@2+ -> 1+,3+\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(contig_args(path_of(&contigs), path_of(&paths), path_of(&out), 3)).unwrap();

    // Both paths collapse into one walk that visits contig 1 twice.
    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, ">4 12 120 0+,1+,2+,1+,3+\nTTACGTACGTTT\n");
}

#[test]
fn lists_merged_paths() {
    let paths = write_file("@0+ -> 1+,2+\n@2+ -> 1+,3+\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(path_args(path_of(&paths), Some(path_of(&out)))).unwrap();

    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "0 0+,1+,2+,1+,3+\n");
}

#[test]
fn keeps_inconsistent_paths_apart() {
    // The walks disagree about what follows contig 5, so neither merges.
    let paths = write_file("@4+ -> 5+,6+\n@5+ -> 7+,8+\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(path_args(path_of(&paths), Some(path_of(&out)))).unwrap();

    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "0 4+,5+,6+\n1 5+,7+,8+\n");
}

#[test]
fn merges_paths_recorded_on_opposite_strands() {
    // The second record describes the same stretch walked from the
    // other end.
    let paths = write_file("@0+ -> 1+,2-\n@2+ -> 1-,0-\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(path_args(path_of(&paths), Some(path_of(&out)))).unwrap();

    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "0 0+,1+,2-\n");
}

#[test]
fn stitches_reverse_complement_steps() {
    let contigs = write_file(">0 4 5\nTTAC\n>1 4 6\nACGT\n>2 4 7\nGGAC\n");
    let paths = write_file("@0+ -> 1+,2-\n@2+ -> 1-,0-\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(contig_args(path_of(&contigs), path_of(&paths), path_of(&out), 3)).unwrap();

    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, ">3 8 18 0+,1+,2-\nTTACGTCC\n");
}

#[test]
fn copies_unused_contigs_through() {
    let contigs = write_file(">0 4 8\nTTAC\n>1 4 6\nACGG\n>2 4 4\nCCCC\n");
    let paths = write_file("@0+ -> 1+\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(contig_args(path_of(&contigs), path_of(&paths), path_of(&out), 3)).unwrap();

    // Contig 2 is not part of any walk and passes through unchanged.
    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, ">2 4 4\nCCCC\n>3 6 14 0+,1+\nTTACGG\n");
}

#[test]
fn reverse_records_extend_leftward() {
    let paths = write_file("@1+ -> 2+\n@1- -> 0+\n");
    let out = NamedTempFile::new().unwrap();

    run_pathmerge(path_args(path_of(&paths), Some(path_of(&out)))).unwrap();

    let written = fs::read_to_string(out.path()).unwrap();
    assert_eq!(written, "0 0+,1+,2+\n");
}

#[test]
fn record_order_does_not_change_output() {
    let forward = write_file("@0+ -> 1+,2+\n@1+ -> 2+\n@5+ -> 6+\n");
    let shuffled = write_file("@5+ -> 6+\n@1+ -> 2+\n@0+ -> 1+,2+\n");
    let out1 = NamedTempFile::new().unwrap();
    let out2 = NamedTempFile::new().unwrap();

    run_pathmerge(path_args(path_of(&forward), Some(path_of(&out1)))).unwrap();
    run_pathmerge(path_args(path_of(&shuffled), Some(path_of(&out2)))).unwrap();

    let first = fs::read_to_string(out1.path()).unwrap();
    let second = fs::read_to_string(out2.path()).unwrap();
    assert_eq!(first, "0 0+,1+,2+\n1 5+,6+\n");
    assert_eq!(first, second);
}

#[test]
fn rejects_malformed_record() {
    let paths = write_file("0+ -> 1+\n");
    let error = run_pathmerge(path_args(path_of(&paths), None)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidData);
    assert!(error.to_string().contains("line 1"));
}

#[test]
fn requires_existing_path_file() {
    let error = run_pathmerge(path_args("/nonexistent/paths.txt", None)).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn detects_overlap_mismatch() {
    // The path says contigs 0 and 1 overlap, but their sequences share
    // no junction.
    let contigs = write_file(">0 4 1\nAAAA\n>1 4 1\nGGGG\n");
    let paths = write_file("@0+ -> 1+\n");
    let out = NamedTempFile::new().unwrap();

    let error =
        run_pathmerge(contig_args(path_of(&contigs), path_of(&paths), path_of(&out), 3))
            .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Other);
}

#[test]
fn rejects_duplicate_contig_names() {
    let contigs = write_file(">7 4 1\nACGT\n>7 4 1\nACGT\n");
    let paths = write_file("@0+ -> 1+\n");
    let out = NamedTempFile::new().unwrap();

    let error =
        run_pathmerge(contig_args(path_of(&contigs), path_of(&paths), path_of(&out), 3))
            .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidData);
}
