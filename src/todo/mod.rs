pub mod entry;
pub mod store;

pub use entry::TodoEntry;
pub use store::{TodoMap, TodoStore};
