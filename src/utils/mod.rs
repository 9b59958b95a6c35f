pub mod executor;
pub mod paths;
