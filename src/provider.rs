//! Host-facing search provider.
//!
//! This module connects the scoring core to its collaborators: the record
//! source it searches, the activator that opens results, the icon lookup used
//! for display, and the aggregator the provider registers with.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lately::provider::{
//!     CommandActivator, ProviderRegistry, ProviderSlot, RecentFilesProvider, SearchProvider,
//! };
//! use lately::query::Terms;
//! use lately::record::Record;
//! use lately::search::SearchConfig;
//! use lately::source::memory::MemorySource;
//!
//! # fn main() -> lately::error::Result<()> {
//! let source = Arc::new(MemorySource::with_records(vec![
//!     Record::new("report_final", "https://example.com/report.txt"),
//! ]));
//!
//! let registry = ProviderRegistry::new();
//! let slot = ProviderSlot::new();
//! slot.enable(&registry, || {
//!     let provider = RecentFilesProvider::new(
//!         source.clone(),
//!         Arc::new(CommandActivator::new()),
//!         SearchConfig::default(),
//!     )?;
//!     Ok(Arc::new(provider) as Arc<dyn SearchProvider>)
//! })?;
//!
//! let results = registry.initial_search(&Terms::parse("report"));
//! assert_eq!(results[0].hits.len(), 1);
//!
//! slot.disable(&registry);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod meta;
pub mod recent;
pub mod registry;

pub use self::activation::{ActivationOutcome, Activator, CommandActivator, FnActivator};
pub use self::meta::{ExtensionIconResolver, IconResolver, ResultMeta};
pub use self::recent::RecentFilesProvider;
pub use self::registry::{
    ProviderRegistry, ProviderResults, ProviderSlot, SearchAggregator, SearchProvider,
};
