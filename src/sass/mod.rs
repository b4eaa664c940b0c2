pub mod serialize;

// Re-export commonly used items
pub use serialize::{serialize_value, transform_document, transform_json, MAX_DEPTH};
