//! Provider traits giving the rollup node access to its L1 data source.

pub use l1::{DelayedInboxWriter, L1Provider, L1ProviderError};
mod l1;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
