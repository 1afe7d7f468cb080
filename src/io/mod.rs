pub mod features;
pub mod sequence;

pub use sequence::{FileFormat, SequenceRecord};
