//! Configuration module

mod blog;

pub use blog::BlogConfig;
pub use blog::DuplicatePolicy;
pub use blog::HighlightConfig;
pub use blog::LookupMode;
