use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use bitvec::prelude::*;
use clap::Parser;

use crate::dictionary::ContigNames;
use crate::fasta::{read_contigs, write_contig, write_record, Contig};
use crate::link::Linker;
use crate::path::Walk;
use crate::stitch::stitch_walk;
use crate::store::{read_walks, WalkStore};

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pathmerge",
    version,
    about = "Merge paths and contigs. If CONTIG is specified, the output is FASTA and merged paths otherwise."
)]
pub struct Args {
    /// Input files: PATH, or CONTIG PATH
    #[arg(value_name = "FILE", num_args = 1..=2, required = true)]
    pub files: Vec<String>,

    /// k-mer size used to assemble the contigs
    #[arg(short, long, value_name = "KMER_SIZE")]
    pub kmer: Option<usize>,

    /// Write the merged contigs or path listing to FILE
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<String>,

    /// Increase verbosity; give twice for debug traces
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn invalid_input(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// Run the merge described by `args`.
///
/// With one input file the paths are merged and listed; with two, the
/// merged walks are also stitched into contig sequences and everything
/// is written as FASTA.
pub fn run_pathmerge(args: Args) -> io::Result<()> {
    let debug = args.verbose > 1;
    match args.files.as_slice() {
        [path_file] => {
            let walks = merge_walks(path_file, debug)?;
            write_walk_listing(&walks, args.out.as_deref())
        }
        [contig_file, path_file] => {
            let kmer = match args.kmer {
                Some(kmer) if kmer > 0 => kmer,
                _ => return Err(invalid_input("missing -k,--kmer option")),
            };
            let out_path = match args.out.as_deref() {
                Some(path) => path,
                None => return Err(invalid_input("missing -o,--out option")),
            };
            let contigs = read_contigs(contig_file)?;
            if contigs.is_empty() {
                return Err(invalid_data(format!("{}: no contig records", contig_file)));
            }
            let mut names = ContigNames::new();
            for contig in &contigs {
                names.intern(&contig.name).map_err(invalid_data)?;
            }
            let walks = merge_walks(path_file, debug)?;
            write_merged_fasta(&walks, &contigs, &names, kmer, out_path, args.verbose)
        }
        [] => Err(invalid_input("missing arguments")),
        _ => Err(invalid_input("too many arguments")),
    }
}

/// Read the path records and close them into merged walks.
///
/// Roots are visited in sorted order in both passes and the result is
/// sorted and deduplicated, so equal inputs give equal outputs no
/// matter how the records were ordered in the file.
fn merge_walks(path_file: &str, debug: bool) -> io::Result<Vec<Walk>> {
    let reader = BufReader::new(File::open(path_file)?);
    let originals = read_walks(reader)?;

    let linker = Linker::new(debug);
    let mut results = WalkStore::new();
    let mut roots = originals.roots();
    roots.sort_unstable();
    for root in roots {
        linker.discover(root, &originals, &mut results);
        if debug {
            if let Some(walk) = results.get(root) {
                eprintln!("[pathmerge] provisional walk for {}: {}", root, walk);
            }
        }
    }

    let mut roots = results.roots();
    roots.sort_unstable();
    for root in roots {
        linker.consolidate(root, &mut results);
    }

    let mut walks = results.into_walks();
    walks.sort_unstable();
    walks.dedup();
    Ok(walks)
}

fn write_walk_listing(walks: &[Walk], out: Option<&str>) -> io::Result<()> {
    let mut out: Box<dyn Write> = match out {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    for (index, walk) in walks.iter().enumerate() {
        writeln!(out, "{} {}", index, walk)?;
    }
    out.flush()
}

/// Write the contigs no walk uses, then one record per merged walk.
///
/// Merged records carry `>id length coverage walk` headers; the walk
/// comment uses contig names so the merge can be traced back.
fn write_merged_fasta(
    walks: &[Walk],
    contigs: &[Contig],
    names: &ContigNames,
    kmer: usize,
    out_path: &str,
    verbose: u8,
) -> io::Result<()> {
    let seen = mark_used_contigs(walks, contigs.len())?;
    let mut out = BufWriter::new(File::create(out_path)?);

    for (id, contig) in contigs.iter().enumerate() {
        if !seen[id] {
            write_contig(&mut out, contig)?;
        }
    }

    let (min_single, min_merged) = coverage_summary(contigs, &seen, kmer)?;
    println!("The minimum coverage of single-end contigs is {}.", min_single);
    println!("The minimum coverage of merged contigs is {}.", min_merged);
    if min_single < min_merged {
        println!(
            "Consider increasing the coverage threshold parameter, c, to {}.",
            min_merged
        );
    }

    let mut record_id = names.next_merged_id();
    for walk in walks {
        let comment = names.render_walk(walk);
        if verbose > 0 {
            println!("{}", comment);
        }
        let merged = stitch_walk(walk, contigs, kmer)?;
        let header = format!("{} {} {}", merged.seq.len(), merged.coverage, comment);
        write_record(&mut out, record_id, &header, &merged.seq)?;
        record_id += 1;
    }
    out.flush()
}

fn mark_used_contigs(walks: &[Walk], contig_count: usize) -> io::Result<BitVec<u64, Lsb0>> {
    let mut seen = BitVec::repeat(false, contig_count);
    for walk in walks {
        for step in walk.steps() {
            let id = step.contig_id();
            if id >= contig_count {
                return Err(invalid_data(format!(
                    "walk references contig {} but only {} contigs were loaded",
                    id, contig_count
                )));
            }
            seen.set(id, true);
        }
    }
    Ok(seen)
}

/// Minimum per-kmer coverage over all contigs and over the merged ones.
///
/// Contigs with no recorded coverage are ignored. A contig shorter than
/// the k-mer size cannot have come from the same assembly, so it is an
/// input error rather than a value to clamp.
fn coverage_summary(
    contigs: &[Contig],
    seen: &BitVec<u64, Lsb0>,
    kmer: usize,
) -> io::Result<(f64, f64)> {
    let mut min_single = f64::INFINITY;
    let mut min_merged = f64::INFINITY;
    for (id, contig) in contigs.iter().enumerate() {
        if contig.coverage == 0 {
            continue;
        }
        if contig.seq.len() < kmer {
            return Err(invalid_data(format!(
                "contig {} is shorter than the k-mer size",
                contig.name
            )));
        }
        let kmers = (contig.seq.len() - kmer + 1) as f64;
        let cov = contig.coverage as f64 / kmers;
        min_single = min_single.min(cov);
        if seen[id] {
            min_merged = min_merged.min(cov);
        }
    }
    Ok((min_single, min_merged))
}
