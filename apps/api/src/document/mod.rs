// Operations over the résumé document model: explicit ordering, in-place
// edits, convention checks and Markdown rendering. The model itself
// (`models::resume`) stays a plain data shape.

pub mod conventions;
pub mod editing;
pub mod ordering;
pub mod render;

pub use editing::DocumentError;
pub use ordering::SortDirection;
