pub mod classifier;
pub mod handlers;
pub mod upload;
