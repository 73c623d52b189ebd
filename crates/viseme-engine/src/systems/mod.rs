pub mod geometry;
pub mod lighting;
pub mod articulation;
pub mod render;
