use std::collections::HashMap;
use std::io::{self, BufRead};

use crate::path::{PathStep, Walk};

/// Owning map from a root contig id to the canonical walk anchored at it.
///
/// Every walk is exclusively owned by its entry; replacing or removing an
/// entry drops (or hands back) the previous walk.
#[derive(Debug, Default)]
pub struct WalkStore {
    walks: HashMap<usize, Walk>,
}

impl WalkStore {
    pub fn new() -> Self {
        WalkStore::default()
    }

    /// The walk registered for `root`, if any.
    pub fn get(&self, root: usize) -> Option<&Walk> {
        self.walks.get(&root)
    }

    /// Register `walk` under `root`, dropping any previous walk there.
    pub fn put(&mut self, root: usize, walk: Walk) {
        self.walks.insert(root, walk);
    }

    /// Remove the entry for `root`, returning the owned walk.
    pub fn remove(&mut self, root: usize) -> Option<Walk> {
        self.walks.remove(&root)
    }

    pub fn contains(&self, root: usize) -> bool {
        self.walks.contains_key(&root)
    }

    /// All registered roots, in no particular order.
    pub fn roots(&self) -> Vec<usize> {
        self.walks.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.walks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Consume the store, yielding the owned walks in no particular order.
    pub fn into_walks(self) -> Vec<Walk> {
        self.walks.into_values().collect()
    }
}

fn malformed(number: usize, message: String) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line {}: {}", number, message),
    )
}

/// Read path-fragment records of the form
/// `@<root><strand> -> <node><strand>,<node><strand>,...` and accumulate
/// them into one walk per root contig.
///
/// The entry for a root starts as the single forward step `<root>+`. A
/// forward record (`@N+`) must be the first record for its root and
/// appends its node list after the root; a reverse record (`@N-`)
/// prepends its node list in reversed order and may follow a forward
/// record but not another reverse one. Anything else is a fatal input
/// error carrying the 1-based line number.
pub fn read_walks<R: BufRead>(reader: R) -> io::Result<WalkStore> {
    let mut store = WalkStore::new();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line?;

        let mut fields = line.split_whitespace();
        let pivot = match fields.next() {
            Some(field) => field,
            None => return Err(malformed(number, "empty record".to_string())),
        };
        let pivot = match pivot.strip_prefix('@') {
            Some(rest) => rest,
            None => return Err(malformed(number, "record must start with '@'".to_string())),
        };
        let pivot: PathStep = pivot.parse().map_err(|e| malformed(number, e))?;
        match fields.next() {
            Some("->") => {}
            _ => return Err(malformed(number, "expected '->' separator".to_string())),
        }
        let list = match fields.next() {
            Some(field) => field,
            None => return Err(malformed(number, "missing node list".to_string())),
        };
        if fields.next().is_some() {
            return Err(malformed(number, "trailing fields after node list".to_string()));
        }
        let mut nodes = list
            .split(',')
            .map(|token| token.parse::<PathStep>())
            .collect::<Result<Vec<PathStep>, String>>()
            .map_err(|e| malformed(number, e))?;

        let root = pivot.contig_id();
        let root_step = PathStep::forward(root);
        let walk = store
            .walks
            .entry(root)
            .or_insert_with(|| Walk::single(root_step));
        if !pivot.is_reverse() {
            // A forward record must be the first one for its root.
            if walk.len() != 1 || walk.first() != root_step {
                return Err(malformed(
                    number,
                    format!("duplicate or out-of-order forward record for root {}", root),
                ));
            }
            walk.append(&nodes);
        } else {
            // At most one reverse record; it keeps the forward root in front.
            if walk.first() != root_step {
                return Err(malformed(
                    number,
                    format!("duplicate reverse record for root {}", root),
                ));
            }
            nodes.reverse();
            walk.prepend(&nodes);
        }
    }
    Ok(store)
}
