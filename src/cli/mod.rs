pub mod export;
pub mod report;

pub use report::Format;
