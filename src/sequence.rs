/// Compute the reverse complement of a DNA sequence.
///
/// Lowercase bases are complemented to uppercase, `N` stays `N`, and any
/// other byte is passed through unchanged.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&base| match base {
            b'A' | b'a' => b'T',
            b'T' | b't' => b'A',
            b'C' | b'c' => b'G',
            b'G' | b'g' => b'C',
            b'N' | b'n' => b'N',
            _ => base,
        })
        .collect()
}
