pub mod field;
pub mod pos;
pub mod types;

pub use field::Field;
pub use types::{InternalType, OccurrenceRecord};
