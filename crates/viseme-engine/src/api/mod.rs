pub mod types;
pub mod stage;
