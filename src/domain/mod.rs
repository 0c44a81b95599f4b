pub mod constraints;
pub mod error;

pub use constraints::{json_type_name, ConstraintSet, FieldType, Violation};
pub use error::InputError;
