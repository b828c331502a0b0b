use std::collections::HashMap;

use crate::path::Walk;

/// Interning table for contig names.
///
/// Contigs are assigned dense ids in the order their names are first
/// seen, so id `i` is the `i`-th record of the contig file. Walks refer
/// to contigs by id only.
#[derive(Debug, Default)]
pub struct ContigNames {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl ContigNames {
    pub fn new() -> Self {
        ContigNames::default()
    }

    /// Intern a new name and return its id. Names must be unique.
    pub fn intern(&mut self, name: &str) -> Result<usize, String> {
        if self.index.contains_key(name) {
            return Err(format!("duplicate contig name '{}'", name));
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up the id of a name.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The name of contig `id`.
    pub fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The first free name for newly merged contigs: one past the last
    /// contig name if that name is numeric, otherwise the contig count.
    pub fn next_merged_id(&self) -> usize {
        match self.names.last().map(|s| s.parse::<usize>()) {
            Some(Ok(n)) => n + 1,
            _ => self.names.len(),
        }
    }

    /// Render a walk as `<name><strand>` steps joined by commas, falling
    /// back to the numeric contig id when no name is interned.
    pub fn render_walk(&self, walk: &Walk) -> String {
        let mut rendered = String::new();
        for (index, step) in walk.steps().iter().enumerate() {
            if index > 0 {
                rendered.push(',');
            }
            let id = step.contig_id();
            if id < self.names.len() {
                rendered.push_str(&self.names[id]);
            } else {
                rendered.push_str(&id.to_string());
            }
            rendered.push(step.strand_char());
        }
        rendered
    }
}
