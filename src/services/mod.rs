pub mod error;
pub mod merge;
pub mod radius_policy;
pub mod search_aggregator;
