pub mod aggregator;
pub mod distribution;
pub mod encoder;
pub mod pruning;
pub mod types;
