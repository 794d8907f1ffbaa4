//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::AdminConfig,
    services::bulk_update::BulkUpdater,
    shopify::AdminClient,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    shopify: AdminClient,
    updater: BulkUpdater<AdminClient>,
}

impl AppState {
    /// Build the state from configuration.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let shopify = AdminClient::new(&config.shopify);
        let updater = BulkUpdater::new(Arc::new(shopify.clone()), config.bulk_update.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                updater,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn shopify(&self) -> &AdminClient {
        &self.inner.shopify
    }

    #[must_use]
    pub fn updater(&self) -> &BulkUpdater<AdminClient> {
        &self.inner.updater
    }
}
