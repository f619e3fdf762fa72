//! Remote media resolution: URL deduplication, retries, staging.

pub mod resolver;
