use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

/// One contig record: its header name, sequence, and the read coverage
/// carried as the third header field (0 when absent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub name: String,
    pub seq: Vec<u8>,
    pub coverage: u64,
}

fn malformed(number: usize, message: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: {}", number, message),
    )
}

/// Read contig records in the order they appear.
///
/// Headers look like `>name [length] [coverage]`; the length field is
/// ignored and the coverage field defaults to 0 when missing or not a
/// number. Record bodies may span multiple lines.
pub fn read_contigs(path: &str) -> io::Result<Vec<Contig>> {
    let reader = BufReader::new(File::open(path)?);
    let mut contigs: Vec<Contig> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let number = index + 1;

        if let Some(header) = line.strip_prefix('>') {
            let mut fields = header.split_whitespace();
            let name = match fields.next() {
                Some(name) => name.to_string(),
                None => return Err(malformed(number, "empty header")),
            };
            let coverage = match fields.nth(1) {
                Some(field) => field.parse().ok().unwrap_or(0),
                None => 0,
            };
            contigs.push(Contig {
                name,
                seq: Vec::new(),
                coverage,
            });
        } else {
            match contigs.last_mut() {
                Some(contig) => contig.seq.extend_from_slice(line.as_bytes()),
                None => {
                    return Err(malformed(number, "sequence data before the first header"))
                }
            }
        }
    }

    Ok(contigs)
}

/// Write a contig back out with the `>name length coverage` header.
pub fn write_contig<W: Write>(out: &mut W, contig: &Contig) -> io::Result<()> {
    writeln!(out, ">{} {} {}", contig.name, contig.seq.len(), contig.coverage)?;
    out.write_all(&contig.seq)?;
    writeln!(out)
}

/// Write a freshly merged record under a numeric id.
pub fn write_record<W: Write>(
    out: &mut W,
    id: usize,
    comment: &str,
    seq: &[u8],
) -> io::Result<()> {
    writeln!(out, ">{} {}", id, comment)?;
    out.write_all(seq)?;
    writeln!(out)
}
