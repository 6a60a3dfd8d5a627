//! Domain layer: records, patches and the declarative schemas that
//! validate them.

pub mod contact;
pub mod field;
pub mod record;
pub mod schema;
pub mod todo;

pub use contact::{Contact, ContactInput, ContactPatch};
pub use field::FieldPatch;
pub use record::{Record, RecordId, Timestamp, sort_for_listing};
pub use schema::{Choice, FieldError, FieldRule, Mode, ValidationError, Validator};
pub use todo::{Priority, Todo, TodoInput, TodoPatch, TodoStatus};
