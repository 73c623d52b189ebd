pub mod scoring;
pub mod words;
pub mod session;
