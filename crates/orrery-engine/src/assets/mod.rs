pub mod bodies;
pub mod catalog;
pub mod registry;
