pub mod cli;
pub mod config;
pub mod logging;

// Pipeline modules, leaf-first.
pub mod batch;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod organize;
pub mod resolver;
pub mod tags;
