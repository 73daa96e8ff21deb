pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::{
    catalog::{CatalogService, ShikimoriClient},
    checkpoint::{CheckpointStore, FileCheckpointStore},
    enrichment::{EnrichmentService, KodikClient},
    pipeline::{
        domain::AssetUrls, CollectionTrigger, FandubFilter, PipelineComponents, Transformer,
    },
    publishing::{HttpPublisher, Publisher},
};
use shared::{AppConfig, AppResult};

/// Wire the production adapters from configuration
pub fn build_components(config: &AppConfig) -> AppResult<PipelineComponents> {
    let catalog = Arc::new(CatalogService::new(
        Arc::new(ShikimoriClient::from_config(config)?),
        modules::catalog::infrastructure::client::PROVIDER_NAME,
    ));
    let enrichment = Arc::new(EnrichmentService::new(
        Arc::new(KodikClient::from_config(config)?),
        modules::enrichment::infrastructure::client::PROVIDER_NAME,
    ));

    if config.enrichment_token.is_empty() {
        log_warn!("ENRICHMENT_TOKEN is not set; enrichment lookups will most likely fail");
    }

    let transformer = Arc::new(Transformer::new(
        Arc::clone(&catalog),
        AssetUrls::new(config.asset_base_url.clone())?,
        config.catalog_site_url.clone(),
        &config.player_host,
    ));

    let publisher: Arc<dyn Publisher> = Arc::new(HttpPublisher::from_config(config)?);
    let checkpoint_store: Arc<dyn CheckpointStore> =
        Arc::new(FileCheckpointStore::new(config.checkpoint_path.clone()));

    Ok(PipelineComponents {
        catalog,
        enrichment,
        transformer,
        publisher,
        checkpoint_store,
        filter: Arc::new(FandubFilter::new(&config.fandub_token)?),
    })
}

pub fn build_trigger(config: &AppConfig) -> AppResult<CollectionTrigger> {
    Ok(CollectionTrigger::new(
        build_components(config)?,
        config.default_start_id,
        config.default_end_id,
    ))
}
