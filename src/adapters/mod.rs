// Adapters layer: concrete implementations of the domain ports that are not HTTP sources.

pub mod storage;

pub use storage::JsonFileSink;
