// extensions/mod.rs
//
// Math building blocks shared by the engine systems.
// Neither module knows about parts, words, or the stage.

pub mod transform;
pub mod wave;

pub use transform::{TransformGraph, LocalTransform};
pub use wave::Wave;
