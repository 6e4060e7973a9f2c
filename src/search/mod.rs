pub mod aggregator;

pub use aggregator::SearchAggregator;
