//! Registration of search providers with a host aggregator.

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::{LatelyError, Result};
use crate::provider::activation::ActivationOutcome;
use crate::provider::meta::ResultMeta;
use crate::query::ranker::RecordHit;
use crate::query::terms::Terms;

/// A search provider as seen by the host.
pub trait SearchProvider: Send + Sync + Debug {
    /// Unique identifier of the provider.
    fn id(&self) -> &str;

    /// Section title shown above the results.
    fn title(&self) -> &str;

    /// Search all records.
    fn initial_result_set(&self, terms: &Terms) -> Result<Vec<RecordHit>>;

    /// Search among the hits of a previous search. `terms` is the full
    /// current term sequence.
    fn subsearch_result_set(&self, previous: &[RecordHit], terms: &Terms) -> Vec<RecordHit>;

    /// Describe hits for display.
    fn result_metas(&self, hits: &[RecordHit]) -> Vec<ResultMeta>;

    /// Open a selected hit. Failures are reported, not raised.
    fn activate_result(&self, hit: &RecordHit) -> ActivationOutcome;

    /// Release subscriptions and cached data.
    fn destroy(&self);
}

/// The host side that collects results from several providers.
pub trait SearchAggregator: Send + Sync {
    /// Register a provider.
    fn add_search_provider(&self, provider: Arc<dyn SearchProvider>) -> Result<()>;

    /// Unregister a provider by id.
    fn remove_search_provider(&self, id: &str) -> Option<Arc<dyn SearchProvider>>;
}

/// Results of one provider for an aggregated search.
#[derive(Debug, Clone)]
pub struct ProviderResults {
    /// Provider id.
    pub provider_id: String,
    /// Provider title.
    pub title: String,
    /// Ranked hits.
    pub hits: Vec<RecordHit>,
}

/// A simple in-process aggregator.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: RwLock<Vec<Arc<dyn SearchProvider>>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// Check whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    /// Get a provider by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn SearchProvider>> {
        self.providers.read().iter().find(|p| p.id() == id).cloned()
    }

    /// Run an initial search on every provider.
    ///
    /// A provider that fails is logged and left out; providers without hits
    /// are left out as well.
    pub fn initial_search(&self, terms: &Terms) -> Vec<ProviderResults> {
        let providers: Vec<_> = self.providers.read().clone();
        providers
            .into_iter()
            .filter_map(|provider| match provider.initial_result_set(terms) {
                Ok(hits) if !hits.is_empty() => Some(ProviderResults {
                    provider_id: provider.id().to_string(),
                    title: provider.title().to_string(),
                    hits,
                }),
                Ok(_) => None,
                Err(e) => {
                    warn!(provider = provider.id(), error = %e, "provider search failed");
                    None
                }
            })
            .collect()
    }

    /// Narrow earlier aggregated results.
    pub fn subsearch(&self, previous: &[ProviderResults], terms: &Terms) -> Vec<ProviderResults> {
        previous
            .iter()
            .filter_map(|prev| {
                let provider = self.get(&prev.provider_id)?;
                let hits = provider.subsearch_result_set(&prev.hits, terms);
                (!hits.is_empty()).then(|| ProviderResults {
                    provider_id: prev.provider_id.clone(),
                    title: prev.title.clone(),
                    hits,
                })
            })
            .collect()
    }
}

impl SearchAggregator for ProviderRegistry {
    fn add_search_provider(&self, provider: Arc<dyn SearchProvider>) -> Result<()> {
        let mut providers = self.providers.write();
        if providers.iter().any(|p| p.id() == provider.id()) {
            return Err(LatelyError::provider(format!(
                "provider {} is already registered",
                provider.id()
            )));
        }
        providers.push(provider);
        Ok(())
    }

    fn remove_search_provider(&self, id: &str) -> Option<Arc<dyn SearchProvider>> {
        let mut providers = self.providers.write();
        let index = providers.iter().position(|p| p.id() == id)?;
        Some(providers.remove(index))
    }
}

/// Holds the single live instance of a provider.
///
/// `enable` and `disable` may be called any number of times; only the first
/// `enable` after a `disable` creates and registers a new instance.
#[derive(Debug, Default)]
pub struct ProviderSlot {
    instance: Mutex<Option<Arc<dyn SearchProvider>>>,
}

impl ProviderSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a provider is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.instance.lock().is_some()
    }

    /// Get the enabled provider.
    pub fn instance(&self) -> Option<Arc<dyn SearchProvider>> {
        self.instance.lock().clone()
    }

    /// Create and register a provider unless one is already enabled.
    ///
    /// Returns true if a new provider was registered.
    pub fn enable<F>(&self, aggregator: &dyn SearchAggregator, factory: F) -> Result<bool>
    where
        F: FnOnce() -> Result<Arc<dyn SearchProvider>>,
    {
        let mut instance = self.instance.lock();
        if instance.is_some() {
            return Ok(false);
        }

        let provider = factory()?;
        if let Err(e) = aggregator.add_search_provider(Arc::clone(&provider)) {
            provider.destroy();
            return Err(e);
        }
        info!(provider = provider.id(), "search provider enabled");
        *instance = Some(provider);
        Ok(true)
    }

    /// Unregister and destroy the enabled provider, if any.
    ///
    /// Returns true if a provider was disabled.
    pub fn disable(&self, aggregator: &dyn SearchAggregator) -> bool {
        let Some(provider) = self.instance.lock().take() else {
            return false;
        };

        aggregator.remove_search_provider(provider.id());
        provider.destroy();
        info!(provider = provider.id(), "search provider disabled");
        true
    }
}
