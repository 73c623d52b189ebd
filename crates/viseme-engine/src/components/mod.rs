pub mod mesh;
pub mod part;
pub mod pose;
