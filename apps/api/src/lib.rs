pub mod analysis;
pub mod config;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod training;

#[cfg(test)]
mod test_fixtures;
