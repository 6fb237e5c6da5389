pub mod schema;
pub mod snippet;
pub mod transform;
