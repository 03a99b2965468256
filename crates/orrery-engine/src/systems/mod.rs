pub mod fields;
pub mod lighting;
pub mod render;
