//! Search provider over the recently used file history.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::Result;
use crate::provider::activation::{ActivationOutcome, Activator};
use crate::provider::meta::{IconResolver, ResultMeta};
use crate::provider::registry::SearchProvider;
use crate::query::ranker::RecordHit;
use crate::query::terms::Terms;
use crate::record::Record;
use crate::search::config::SearchConfig;
use crate::search::session::SearchSession;
use crate::source::{RecordSource, SubscriptionId};

/// Default provider id.
pub const DEFAULT_PROVIDER_ID: &str = "recently-used";

/// Default section title.
pub const DEFAULT_TITLE: &str = "Recently Used";

/// Search provider over a [`RecordSource`].
///
/// The provider keeps a snapshot of the source records. The snapshot is
/// rebuilt before the next initial search whenever the source reports a
/// change.
pub struct RecentFilesProvider {
    id: String,
    title: String,
    config: SearchConfig,
    session: SearchSession,
    source: Arc<dyn RecordSource>,
    activator: Arc<dyn Activator>,
    icons: Option<Arc<dyn IconResolver>>,
    records: RwLock<Vec<Arc<Record>>>,
    stale: Arc<AtomicBool>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl fmt::Debug for RecentFilesProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecentFilesProvider")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("config", &self.config)
            .field("source", &self.source)
            .field("activator", &self.activator)
            .field("records", &self.records.read().len())
            .field("stale", &self.stale.load(Ordering::SeqCst))
            .finish()
    }
}

impl RecentFilesProvider {
    /// Create a provider and subscribe to source changes.
    pub fn new(
        source: Arc<dyn RecordSource>,
        activator: Arc<dyn Activator>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;

        let stale = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&stale);
        let subscription = source.subscribe(Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
        }));

        Ok(RecentFilesProvider {
            id: DEFAULT_PROVIDER_ID.to_string(),
            title: DEFAULT_TITLE.to_string(),
            session: SearchSession::with_config(&config),
            config,
            source,
            activator,
            icons: None,
            records: RwLock::new(Vec::new()),
            stale,
            subscription: Mutex::new(Some(subscription)),
        })
    }

    /// Set the provider id.
    pub fn with_id<S: Into<String>>(mut self, id: S) -> Self {
        self.id = id.into();
        self
    }

    /// Set the section title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set the icon resolver used for records without an icon hint.
    pub fn with_icon_resolver(mut self, icons: Arc<dyn IconResolver>) -> Self {
        self.icons = Some(icons);
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Check whether the snapshot will be rebuilt before the next search.
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Check whether the provider still listens to source changes.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Rebuild the record snapshot from the source.
    pub fn refresh(&self) -> Result<usize> {
        // Clear first so that a change during the rebuild marks it stale again.
        self.stale.store(false, Ordering::SeqCst);

        let records = match self.source.list_current_records() {
            Ok(records) => records,
            Err(e) => {
                self.stale.store(true, Ordering::SeqCst);
                return Err(e);
            }
        };

        let total = records.len();
        let records: Vec<Arc<Record>> = records
            .into_iter()
            .filter(|record| !self.config.skip_missing_files || still_exists(record))
            .map(Arc::new)
            .collect();

        debug!(
            provider = %self.id,
            total,
            kept = records.len(),
            "rebuilt record snapshot"
        );

        let count = records.len();
        *self.records.write() = records;
        Ok(count)
    }

    /// Get the current snapshot, rebuilding it first if the source changed.
    pub fn records(&self) -> Result<Vec<Arc<Record>>> {
        if self.is_stale() {
            self.refresh()?;
        }
        Ok(self.records.read().clone())
    }

    /// The hits handed to the presentation layer, capped by `max_results`.
    pub fn presented<'a>(&self, hits: &'a [RecordHit]) -> &'a [RecordHit] {
        match self.config.max_results {
            Some(max) => &hits[..max.min(hits.len())],
            None => hits,
        }
    }
}

impl SearchProvider for RecentFilesProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn initial_result_set(&self, terms: &Terms) -> Result<Vec<RecordHit>> {
        let records = self.records()?;
        Ok(self.session.initial(&records, terms).hits)
    }

    fn subsearch_result_set(&self, previous: &[RecordHit], terms: &Terms) -> Vec<RecordHit> {
        self.session.refine_hits(previous, terms).hits
    }

    fn result_metas(&self, hits: &[RecordHit]) -> Vec<ResultMeta> {
        self.presented(hits)
            .iter()
            .map(|hit| ResultMeta::from_hit(hit, self.icons.as_deref()))
            .collect()
    }

    fn activate_result(&self, hit: &RecordHit) -> ActivationOutcome {
        let record = &hit.record;
        match self.activator.activate(&record.launch_target, &record.location) {
            Ok(()) => {
                debug!(location = %record.location, "activated result");
                ActivationOutcome::Launched
            }
            Err(e) => {
                warn!(location = %record.location, error = %e, "failed to activate result");
                ActivationOutcome::Failed(e.to_string())
            }
        }
    }

    fn destroy(&self) {
        if let Some(id) = self.subscription.lock().take() {
            self.source.unsubscribe(id);
        }
        self.records.write().clear();
        self.stale.store(true, Ordering::SeqCst);
    }
}

impl Drop for RecentFilesProvider {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn still_exists(record: &Record) -> bool {
    match record.local_path() {
        Some(path) => path.exists(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::activation::FnActivator;
    use crate::provider::meta::ExtensionIconResolver;
    use crate::source::memory::MemorySource;

    fn source() -> Arc<MemorySource> {
        Arc::new(MemorySource::with_records(vec![
            Record::builder()
                .name("Budget Report")
                .location("https://example.com/docs/budget.pdf")
                .last_visited_secs(100)
                .build(),
            Record::builder()
                .name("report_final")
                .location("https://example.com/report.txt")
                .last_visited_secs(200)
                .build(),
        ]))
    }

    fn noop() -> Arc<dyn Activator> {
        Arc::new(FnActivator::new(|_: &crate::record::LaunchTarget, _: &str| Ok(())))
    }

    #[test]
    fn test_initial_and_subsearch() {
        let provider = RecentFilesProvider::new(source(), noop(), SearchConfig::default()).unwrap();

        let hits = provider.initial_result_set(&Terms::parse("report")).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.name, "report_final");

        let hits = provider.subsearch_result_set(&hits, &Terms::parse("report budget"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.name, "Budget Report");
    }

    #[test]
    fn test_source_change_marks_snapshot_stale() {
        let source = source();
        let provider =
            RecentFilesProvider::new(source.clone(), noop(), SearchConfig::default()).unwrap();

        assert!(provider.is_stale());
        assert_eq!(provider.records().unwrap().len(), 2);
        assert!(!provider.is_stale());

        source.push(Record::new("report draft", "https://example.com/draft"));
        assert!(provider.is_stale());

        let hits = provider.initial_result_set(&Terms::parse("report")).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_max_results_caps_only_presented_hits() {
        let config = SearchConfig::default().with_max_results(1);
        let provider = RecentFilesProvider::new(source(), noop(), config).unwrap();

        let hits = provider.initial_result_set(&Terms::parse("report")).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(provider.presented(&hits).len(), 1);

        let metas = provider.result_metas(&hits);
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "report_final");
    }

    #[test]
    fn test_subsearch_with_max_results_matches_fresh_search() {
        let config = SearchConfig::default().with_max_results(1);
        let provider = RecentFilesProvider::new(source(), noop(), config).unwrap();

        let hits = provider.initial_result_set(&Terms::parse("report")).unwrap();
        let narrowed = Terms::parse("report budget");
        let refined = provider.subsearch_result_set(&hits, &narrowed);
        let fresh = provider.initial_result_set(&narrowed).unwrap();

        assert_eq!(refined, fresh);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].record.name, "Budget Report");
    }

    #[test]
    fn test_skip_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "x").unwrap();
        let missing = dir.path().join("missing.txt");

        let source = Arc::new(MemorySource::with_records(vec![
            Record::new("present", format!("file://{}", present.display())),
            Record::new("missing", format!("file://{}", missing.display())),
            Record::new("remote", "https://example.com/x"),
        ]));

        let provider =
            RecentFilesProvider::new(source.clone(), noop(), SearchConfig::default()).unwrap();
        assert_eq!(provider.refresh().unwrap(), 2);

        let config = SearchConfig::default().with_skip_missing_files(false);
        let provider = RecentFilesProvider::new(source, noop(), config).unwrap();
        assert_eq!(provider.refresh().unwrap(), 3);
    }

    #[test]
    fn test_result_metas_resolve_icons() {
        let provider = RecentFilesProvider::new(source(), noop(), SearchConfig::default())
            .unwrap()
            .with_icon_resolver(Arc::new(ExtensionIconResolver::new()));

        let hits = provider.initial_result_set(&Terms::parse("report")).unwrap();
        let metas = provider.result_metas(&hits);
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].id, "https://example.com/report.txt");
        assert_eq!(metas[0].icon.as_deref(), Some("text-x-generic"));
        assert_eq!(metas[1].icon.as_deref(), Some("application-pdf"));
    }

    #[test]
    fn test_activation_failure_is_reported() {
        let failing: Arc<dyn Activator> = Arc::new(FnActivator::new(
            |_: &crate::record::LaunchTarget, location: &str| {
                anyhow::bail!("no handler found for {location}")
            },
        ));
        let provider = RecentFilesProvider::new(source(), failing, SearchConfig::default()).unwrap();

        let hits = provider.initial_result_set(&Terms::parse("budget")).unwrap();
        match provider.activate_result(&hits[0]) {
            ActivationOutcome::Failed(reason) => assert!(reason.contains("no handler found")),
            ActivationOutcome::Launched => panic!("activation should fail"),
        }

        let provider = RecentFilesProvider::new(source(), noop(), SearchConfig::default()).unwrap();
        assert!(provider.activate_result(&hits[0]).is_launched());
    }

    #[test]
    fn test_destroy_unsubscribes() {
        let source = source();
        let provider =
            RecentFilesProvider::new(source.clone(), noop(), SearchConfig::default()).unwrap();
        assert_eq!(source.subscriber_count(), 1);
        assert!(provider.is_subscribed());

        provider.destroy();
        assert_eq!(source.subscriber_count(), 0);
        assert!(!provider.is_subscribed());

        // Calling it again is harmless.
        provider.destroy();
        drop(provider);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let source = source();
        {
            let _provider =
                RecentFilesProvider::new(source.clone(), noop(), SearchConfig::default()).unwrap();
            assert_eq!(source.subscriber_count(), 1);
        }
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SearchConfig::default();
        config.weights.name_prefix = 0;
        assert!(RecentFilesProvider::new(source(), noop(), config).is_err());
    }
}
