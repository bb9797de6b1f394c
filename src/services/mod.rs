pub mod homepage;

pub use homepage::{FetchPolicy, HomepageAggregator, HomepageOutcome};
