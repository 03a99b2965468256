// extensions/mod.rs
//
// Pure per-frame math helpers. Nothing here holds state; scene code feeds
// in descriptors and elapsed time and gets transforms back.

pub mod transform;

pub use transform::{Hover, Transform, transform_at, ring_transform_at, element_transform_at, accent_transform_at};
