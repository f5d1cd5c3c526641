use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::{models::GenreCatalog, services::catalog::CatalogClient};

/// Process-lifetime cache of the catalog's genre list
///
/// The list is fetched on first use. A failed fetch degrades to an empty catalog
/// for that call and is not cached, so a later call tries the network again.
pub struct GenreCatalogCache {
    client: Arc<dyn CatalogClient>,
    catalog: OnceCell<GenreCatalog>,
}

impl GenreCatalogCache {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            catalog: OnceCell::new(),
        }
    }

    pub async fn get(&self) -> GenreCatalog {
        let result = self
            .catalog
            .get_or_try_init(|| async {
                let catalog: GenreCatalog = self.client.get_genres().await?.into_iter().collect();
                tracing::info!(genres = catalog.len(), "Genre catalog cached");
                Ok::<_, crate::error::AppError>(catalog)
            })
            .await;

        match result {
            Ok(catalog) => catalog.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "Genre fetch failed, serving empty catalog");
                GenreCatalog::default()
            }
        }
    }

    pub fn is_cached(&self) -> bool {
        self.catalog.initialized()
    }
}
