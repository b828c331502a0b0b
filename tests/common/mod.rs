use pathmerge::Args;

/// Args for merging a path file on its own.
pub fn path_args(path_file: &str, out: Option<&str>) -> Args {
    Args {
        files: vec![path_file.to_string()],
        kmer: None,
        out: out.map(str::to_string),
        verbose: 0,
    }
}

/// Args for merging contigs with a path file.
pub fn contig_args(contig_file: &str, path_file: &str, out: &str, kmer: usize) -> Args {
    Args {
        files: vec![contig_file.to_string(), path_file.to_string()],
        kmer: Some(kmer),
        out: Some(out.to_string()),
        verbose: 0,
    }
}
