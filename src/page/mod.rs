mod aggregator;
mod embed;
mod fields;

pub use aggregator::PageAggregator;
