mod aggregator;
mod package_filter;
mod parent_graph_builder;

pub use aggregator::{Aggregation, AggregationPolicy, Aggregator, DEFAULT_MAX_PARENTS};
pub use package_filter::PackageFilter;
pub use parent_graph_builder::{MatchMode, ParentGraphBuilder, ParentGraphStats};
