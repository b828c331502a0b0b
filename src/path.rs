use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One step of a walk: an oriented reference to a contig.
/// The least significant bit (LSB) holds the strand:
/// - 0 = forward (`+`)
/// - 1 = reverse complement (`-`)
/// The remaining bits store the contig id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathStep(u64);

impl PathStep {
    /// Create a step for the given contig id and strand.
    pub fn new(contig_id: usize, is_reverse: bool) -> Self {
        let mut value = (contig_id as u64) << 1;
        if is_reverse {
            value |= 1;
        }
        PathStep(value)
    }

    /// Create a forward step for the given contig id.
    pub fn forward(contig_id: usize) -> Self {
        Self::new(contig_id, false)
    }

    /// Create a reverse step for the given contig id.
    pub fn reverse(contig_id: usize) -> Self {
        Self::new(contig_id, true)
    }

    /// Get the contig id of this step.
    pub fn contig_id(&self) -> usize {
        (self.0 >> 1) as usize
    }

    /// Check if this step traverses the contig in reverse orientation.
    pub fn is_reverse(&self) -> bool {
        (self.0 & 1) == 1
    }

    /// Get the strand as a char (`+` or `-`).
    pub fn strand_char(&self) -> char {
        if self.is_reverse() {
            '-'
        } else {
            '+'
        }
    }

    /// Flip the strand of this step.
    pub fn flip(&self) -> Self {
        PathStep(self.0 ^ 1)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contig_id(), self.strand_char())
    }
}

impl FromStr for PathStep {
    type Err = String;

    /// Parse the `<id><strand>` notation, e.g. `12+` or `3-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, is_reverse) = if let Some(id) = s.strip_suffix('+') {
            (id, false)
        } else if let Some(id) = s.strip_suffix('-') {
            (id, true)
        } else {
            return Err(format!("invalid node '{}': missing strand", s));
        };
        let contig_id = id
            .parse::<usize>()
            .map_err(|_| format!("invalid node '{}': bad contig id", s))?;
        Ok(PathStep::new(contig_id, is_reverse))
    }
}

/// A walk through contigs: an ordered, non-empty sequence of oriented steps.
///
/// The derived ordering compares steps index by index (contig id, then
/// strand) with a shorter prefix ordering first. It exists only to give
/// the final output a canonical order independent of map iteration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Walk {
    steps: Vec<PathStep>,
}

impl Walk {
    /// Create a walk from a step sequence. The sequence must be non-empty.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        assert!(!steps.is_empty(), "a walk cannot be empty");
        Walk { steps }
    }

    /// Create a single-step walk.
    pub fn single(step: PathStep) -> Self {
        Walk { steps: vec![step] }
    }

    /// Number of steps in the walk.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Index of the last step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Get the step at `index`.
    pub fn step(&self, index: usize) -> PathStep {
        self.steps[index]
    }

    /// All steps, in walk order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// First step of the walk.
    pub fn first(&self) -> PathStep {
        self.steps[0]
    }

    /// Add steps after the end of the walk.
    pub fn append(&mut self, steps: &[PathStep]) {
        self.steps.extend_from_slice(steps);
    }

    /// Add steps before the start of the walk, preserving their order.
    pub fn prepend(&mut self, steps: &[PathStep]) {
        self.steps.splice(0..0, steps.iter().copied());
    }

    /// Reverse-complement the walk in place: the step order is reversed
    /// and every strand bit is flipped. Applying this twice restores the
    /// original walk.
    pub fn reverse_complement(&mut self) {
        self.steps.reverse();
        for step in &mut self.steps {
            *step = step.flip();
        }
    }

    /// The set of contig ids traversed by the walk, ignoring strand and
    /// repeats.
    pub fn contig_ids(&self) -> BTreeSet<usize> {
        self.steps.iter().map(|s| s.contig_id()).collect()
    }
}

impl fmt::Display for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
