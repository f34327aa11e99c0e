pub mod aggregate;
pub mod analyzer;
pub mod prompt;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use analyzer::{validate_identifier, ProfileAggregator};
pub use traits::DirectoryService;
