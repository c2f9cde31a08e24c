//! Prometheus counters for the page surface, exposed at `/metrics`.

use prometheus_client::encoding::text;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

type Labels = Vec<(String, String)>;

pub struct AppMetrics {
    registry: Registry,
    page_views: Family<Labels, Counter>,
    content_writes: Family<Labels, Counter>,
}

impl AppMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let page_views = Family::<Labels, Counter>::default();
        registry.register(
            "agora_page_views",
            "Number of page renders by page kind",
            page_views.clone(),
        );

        let content_writes = Family::<Labels, Counter>::default();
        registry.register(
            "agora_content_writes",
            "Number of create and delete operations by entity and action",
            content_writes.clone(),
        );

        Self {
            registry,
            page_views,
            content_writes,
        }
    }

    pub fn record_page(&self, page: &str) {
        self.page_views
            .get_or_create(&vec![("page".to_string(), page.to_string())])
            .inc();
    }

    pub fn record_write(&self, entity: &str, action: &str) {
        self.content_writes
            .get_or_create(&vec![
                ("entity".to_string(), entity.to_string()),
                ("action".to_string(), action.to_string()),
            ])
            .inc();
    }

    /// Renders the registry in the OpenMetrics text format.
    pub fn encode(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        text::encode(&mut out, &self.registry)?;
        Ok(out)
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
