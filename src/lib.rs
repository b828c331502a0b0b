pub mod consistency;
pub mod dictionary;
pub mod fasta;
pub mod link;
pub mod path;
pub mod pathmerge;
pub mod sequence;
pub mod stitch;
pub mod store;

pub use consistency::{check_consistency, Alignment};
pub use path::{PathStep, Walk};
pub use pathmerge::{run_pathmerge, Args};
pub use stitch::{stitch_walk, StitchedWalk};
pub use store::{read_walks, WalkStore};
