/// Pipeline builders shared by the integration tests
use std::sync::Arc;

use anicollect_lib::modules::catalog::CatalogService;
use anicollect_lib::modules::checkpoint::CheckpointStore;
use anicollect_lib::modules::enrichment::EnrichmentService;
use anicollect_lib::modules::pipeline::domain::AssetUrls;
use anicollect_lib::modules::pipeline::{FandubFilter, PipelineComponents, Transformer};
use reqwest::Url;

use super::fakes::{FakeCatalog, FakeEnrichment, RecordingPublisher};

pub const ASSET_BASE: &str = "https://assets.example.org/bucket";
pub const SITE: &str = "https://shikimori.one";

/// Wire fakes the same way `build_components` wires the real adapters
pub fn build_test_components(
    catalog: Arc<FakeCatalog>,
    enrichment: FakeEnrichment,
    publisher: Arc<RecordingPublisher>,
    store: Arc<dyn CheckpointStore>,
) -> PipelineComponents {
    let catalog_service = Arc::new(CatalogService::new(catalog, "Shikimori"));
    let transformer = Arc::new(Transformer::new(
        catalog_service.clone(),
        AssetUrls::new(Url::parse(ASSET_BASE).unwrap()).unwrap(),
        Url::parse(SITE).unwrap(),
        "//kodik.info",
    ));

    PipelineComponents {
        catalog: catalog_service,
        enrichment: Arc::new(EnrichmentService::new(Arc::new(enrichment), "Kodik")),
        transformer,
        publisher,
        checkpoint_store: store,
        filter: Arc::new(FandubFilter::new("AniLibria").unwrap()),
    }
}
