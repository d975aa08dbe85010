pub mod types;
mod core;

// Re-export cache types
pub use types::*;
// Re-export the query cache
pub use core::{QueryCache, Subscription};
