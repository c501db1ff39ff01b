pub mod allocation;
pub mod contract;
pub mod error;
pub mod plan;
pub mod source;
pub mod stash;
pub mod summary;
