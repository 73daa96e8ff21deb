//! Catalog + enrichment -> destination record

use std::sync::Arc;

use reqwest::Url;

use super::translations::{translate_kind, translate_status};
use super::urls::{AssetUrls, MediaUrls};
use crate::modules::catalog::{CatalogRecord, CatalogService};
use crate::modules::enrichment::EnrichmentRecord;
use crate::modules::publishing::domain::entities::{
    AssociatedEntry, ExternalLinkEntry, NameEntry, OutboundRecord, UrlEntry, DEFAULT_COUNTRIES,
    DEFAULT_DESCRIPTION, DEFAULT_MINIMAL_AGE, DEFAULT_QUALITY, DEFAULT_SEASON,
};

/// Only links to this site make it into `externallinks`
pub const REVIEW_SITE: &str = "kinopoisk";

pub struct Transformer {
    catalog: Arc<CatalogService>,
    assets: AssetUrls,
    media: MediaUrls,
}

impl Transformer {
    pub fn new(
        catalog: Arc<CatalogService>,
        assets: AssetUrls,
        site_url: Url,
        player_host: &str,
    ) -> Self {
        Self {
            catalog,
            assets,
            media: MediaUrls::new(site_url, player_host),
        }
    }

    pub async fn build(
        &self,
        record: &CatalogRecord,
        enrichment: Option<&EnrichmentRecord>,
    ) -> OutboundRecord {
        let mut outbound = self.base_record(record);
        outbound.associated = self.resolve_associated(record).await;
        if let Some(enrichment) = enrichment {
            self.apply_enrichment(&mut outbound, enrichment);
        }
        outbound
    }

    /// Catalog-only projection with every default filled in
    pub fn base_record(&self, record: &CatalogRecord) -> OutboundRecord {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        OutboundRecord {
            id: record.id.clone(),
            licensenameru: record
                .license_name_ru
                .as_deref()
                .is_some_and(|name| !name.is_empty()),
            name: text(&record.name),
            russian: text(&record.russian),
            japanese: text(&record.japanese),
            quality: DEFAULT_QUALITY.to_string(),
            poster: self.assets.poster(&record.id),
            kind: translate_kind(record.kind.as_deref().unwrap_or_default()),
            score: format_score(record.score),
            status: translate_status(record.status.as_deref().unwrap_or_default()),
            episodes: record.episodes.unwrap_or(0),
            duration: record.duration.unwrap_or(0),
            season: text(&record.season),
            released: record
                .aired_on
                .as_ref()
                .and_then(|date| date.date.clone())
                .unwrap_or_default(),
            minimal_age: DEFAULT_MINIMAL_AGE.to_string(),
            countries: DEFAULT_COUNTRIES.to_string(),
            description: record
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            actors: Vec::new(),
            studios: Vec::new(),
            directors: Vec::new(),
            genres: Vec::new(),
            externallinks: review_links(record),
            screenshots: self
                .assets
                .screenshots(&record.id)
                .into_iter()
                .map(|url| UrlEntry { url })
                .collect(),
            opening: Vec::new(),
            trailer: Vec::new(),
            associated: Vec::new(),
            list: Vec::new(),
            alternative_player: String::new(),
            fandubbers: record.fandubbers.join(", "),
        }
    }

    async fn resolve_associated(&self, record: &CatalogRecord) -> Vec<AssociatedEntry> {
        let ids = record.related_anime_ids();
        if ids.is_empty() {
            return Vec::new();
        }

        self.catalog
            .fetch_related(&ids)
            .await
            .into_iter()
            .map(|summary| AssociatedEntry {
                poster: self.media.absolutize(summary.poster_url.as_deref()),
                id: summary.id,
                title: summary.title,
            })
            .collect()
    }

    /// Enrichment values replace the catalog-derived defaults wholesale
    pub fn apply_enrichment(&self, outbound: &mut OutboundRecord, enrichment: &EnrichmentRecord) {
        let material = enrichment.material();

        outbound.alternative_player = self.media.player_url(enrichment.link.as_deref());
        outbound.minimal_age = material
            .minimal_age
            .unwrap_or_else(|| DEFAULT_MINIMAL_AGE.to_string());
        outbound.countries = material
            .countries
            .filter(|countries| !countries.is_empty())
            .map(|countries| countries.join(", "))
            .unwrap_or_else(|| DEFAULT_COUNTRIES.to_string());
        outbound.description = material
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        outbound.genres = NameEntry::list(material.anime_genres.as_deref());
        outbound.studios = NameEntry::list(material.anime_studios.as_deref());
        outbound.actors = NameEntry::list(material.actors.as_deref());
        outbound.directors = NameEntry::list(material.directors.as_deref());
        outbound.season = enrichment
            .last_season
            .clone()
            .unwrap_or_else(|| DEFAULT_SEASON.to_string());
    }
}

/// One decimal place, ties rounded up; missing or zero scores stay unset
pub fn format_score(score: Option<f64>) -> Option<String> {
    score
        .filter(|s| s.is_finite() && *s != 0.0)
        .map(|s| format!("{:.1}", (s * 10.0).round() / 10.0))
}

fn review_links(record: &CatalogRecord) -> Vec<ExternalLinkEntry> {
    record
        .external_links
        .iter()
        .filter(|link| link.kind.as_deref() == Some(REVIEW_SITE))
        .filter_map(|link| link.url.clone())
        .map(|url| ExternalLinkEntry {
            site: REVIEW_SITE.to_string(),
            url,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::repository::MockCatalogSource;
    use crate::modules::catalog::domain::{
        ExternalLink, IncompleteDate, Poster, RelatedEntry, RelatedRef, Video,
    };
    use crate::modules::enrichment::MaterialData;
    use mockall::predicate::eq;

    fn transformer(source: MockCatalogSource) -> Transformer {
        let catalog = Arc::new(CatalogService::new(Arc::new(source), "Shikimori"));
        Transformer::new(
            catalog,
            AssetUrls::new(Url::parse("https://assets.example.org/bucket").unwrap()).unwrap(),
            Url::parse("https://shikimori.one").unwrap(),
            "//kodik.info",
        )
    }

    fn anime(id: &str) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            name: Some("Prétear".to_string()),
            russian: Some("Претир".to_string()),
            kind: Some("tv".to_string()),
            status: Some("released".to_string()),
            episodes: Some(13),
            duration: Some(24),
            season: Some("spring_2001".to_string()),
            aired_on: Some(IncompleteDate {
                date: Some("2001-04-04".to_string()),
                ..Default::default()
            }),
            fandubbers: vec!["AniLibria".to_string(), "AniDUB".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn score_formatting() {
        assert_eq!(format_score(None), None);
        assert_eq!(format_score(Some(7.666)).as_deref(), Some("7.7"));
        assert_eq!(format_score(Some(8.0)).as_deref(), Some("8.0"));
        assert_eq!(format_score(Some(0.0)), None);
        assert_eq!(format_score(Some(8.25)).as_deref(), Some("8.3"));
        assert_eq!(format_score(Some(6.25)).as_deref(), Some("6.3"));
        assert_eq!(format_score(Some(7.75)).as_deref(), Some("7.8"));
        assert_eq!(format_score(Some(8.24)).as_deref(), Some("8.2"));
    }

    #[test]
    fn base_record_fills_defaults() {
        let out = transformer(MockCatalogSource::new()).base_record(&CatalogRecord {
            id: "5".to_string(),
            ..Default::default()
        });

        assert_eq!(out.name, "");
        assert_eq!(out.russian, "");
        assert_eq!(out.japanese, "");
        assert_eq!(out.score, None);
        assert_eq!(out.minimal_age, "16");
        assert_eq!(out.countries, "Япония");
        assert_eq!(out.description, "Нет описания");
        assert_eq!(out.quality, "HD");
        assert_eq!(out.released, "");
        assert_eq!(out.episodes, 0);
        assert!(!out.licensenameru);
        assert!(out.genres.is_empty() && out.actors.is_empty());
        assert_eq!(out.fandubbers, "");
    }

    #[test]
    fn base_record_projects_catalog_fields() {
        let mut record = anime("100");
        record.license_name_ru = Some("Претир".to_string());
        record.score = Some(7.666);
        record.external_links = vec![
            ExternalLink {
                kind: Some("kinopoisk".to_string()),
                url: Some("https://www.kinopoisk.ru/film/1".to_string()),
                ..Default::default()
            },
            ExternalLink {
                kind: Some("wikipedia".to_string()),
                url: Some("https://en.wikipedia.org/wiki/Pretear".to_string()),
                ..Default::default()
            },
        ];
        record.videos = vec![
            Video {
                kind: Some("op".to_string()),
                url: Some("https://youtu.be/op".to_string()),
                ..Default::default()
            },
            Video {
                kind: Some("pv".to_string()),
                url: Some("https://youtu.be/pv".to_string()),
                ..Default::default()
            },
        ];

        let out = transformer(MockCatalogSource::new()).base_record(&record);

        assert!(out.licensenameru);
        assert_eq!(out.kind, "TV Сериал");
        assert_eq!(out.status, "Вышел");
        assert_eq!(out.score.as_deref(), Some("7.7"));
        assert_eq!(out.released, "2001-04-04");
        assert_eq!(out.fandubbers, "AniLibria, AniDUB");
        assert_eq!(out.poster, "https://assets.example.org/bucket/anime/100/poster.jpeg");
        assert_eq!(out.screenshots.len(), 4);
        assert_eq!(
            out.externallinks,
            vec![ExternalLinkEntry {
                site: "kinopoisk".to_string(),
                url: "https://www.kinopoisk.ru/film/1".to_string()
            }]
        );
        // catalog videos never reach the destination
        assert!(out.opening.is_empty());
        assert!(out.trailer.is_empty());
        assert!(out.list.is_empty());
    }

    #[tokio::test]
    async fn related_anime_are_resolved_once_each() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_anime()
            .with(eq("200"))
            .times(1)
            .returning(|id| {
                Ok(Some(CatalogRecord {
                    id: id.to_string(),
                    name: Some("Sequel".to_string()),
                    poster: Some(Poster {
                        original_url: Some(
                            "https://shikimori.onehttps://shikimori.one/system/200.jpg".to_string(),
                        ),
                        ..Default::default()
                    }),
                    ..Default::default()
                }))
            });
        source
            .expect_fetch_anime()
            .with(eq("300"))
            .times(1)
            .returning(|_| Ok(None));

        let mut record = anime("100");
        let entry = |id: &str| RelatedEntry {
            anime: Some(RelatedRef {
                id: id.to_string(),
                name: None,
            }),
            relation_kind: Some("sequel".to_string()),
            ..Default::default()
        };
        record.related = vec![entry("200"), entry("300"), entry("200")];

        let out = transformer(source).build(&record, None).await;
        assert_eq!(
            out.associated,
            vec![AssociatedEntry {
                id: "200".to_string(),
                title: "Sequel".to_string(),
                poster: "https://shikimori.one/system/200.jpg".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn absent_enrichment_keeps_defaults() {
        let out = transformer(MockCatalogSource::new())
            .build(&anime("100"), None)
            .await;

        assert!(out.genres.is_empty());
        assert!(out.studios.is_empty());
        assert!(out.actors.is_empty());
        assert!(out.directors.is_empty());
        assert_eq!(out.minimal_age, "16");
        assert_eq!(out.countries, "Япония");
        assert_eq!(out.alternative_player, "");
        assert_eq!(out.season, "spring_2001");
    }

    #[test]
    fn enrichment_replaces_catalog_values() {
        let transformer = transformer(MockCatalogSource::new());
        let mut out = transformer.base_record(&anime("100"));
        let enrichment = EnrichmentRecord {
            link: Some("//kodik.info//kodik.info/serial/1/abc/720p".to_string()),
            last_season: Some("2".to_string()),
            material_data: Some(MaterialData {
                minimal_age: Some("18".to_string()),
                countries: Some(vec!["Япония".to_string(), "Корея".to_string()]),
                description: Some("Описание".to_string()),
                anime_genres: Some(vec!["драма".to_string(), "фэнтези".to_string()]),
                anime_studios: Some(vec!["Studio Pierrot".to_string()]),
                actors: Some(vec!["Кана Уэда".to_string()]),
                directors: Some(vec!["Дзюнъити Сато".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        };

        transformer.apply_enrichment(&mut out, &enrichment);

        assert_eq!(out.alternative_player, "//kodik.info/serial/1/abc/720p");
        assert_eq!(out.minimal_age, "18");
        assert_eq!(out.countries, "Япония, Корея");
        assert_eq!(out.description, "Описание");
        assert_eq!(out.season, "2");
        assert_eq!(
            out.genres,
            vec![
                NameEntry {
                    name: "драма".to_string()
                },
                NameEntry {
                    name: "фэнтези".to_string()
                }
            ]
        );
        assert_eq!(out.studios.len(), 1);
        assert_eq!(out.actors[0].name, "Кана Уэда");
        assert_eq!(out.directors[0].name, "Дзюнъити Сато");
    }

    #[test]
    fn sparse_enrichment_falls_back_to_defaults() {
        let transformer = transformer(MockCatalogSource::new());
        let mut out = transformer.base_record(&anime("100"));

        transformer.apply_enrichment(&mut out, &EnrichmentRecord::default());

        assert_eq!(out.alternative_player, "");
        assert_eq!(out.minimal_age, "16");
        assert_eq!(out.countries, "Япония");
        assert_eq!(out.description, "Нет описания");
        assert_eq!(out.season, "1");
        assert!(out.genres.is_empty());
    }

    #[test]
    fn enrichment_description_has_no_secondary_source() {
        let transformer = transformer(MockCatalogSource::new());
        let mut out = transformer.base_record(&anime("100"));
        let enrichment = EnrichmentRecord {
            material_data: Some(MaterialData {
                anime_description: Some("Описание аниме".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        transformer.apply_enrichment(&mut out, &enrichment);

        assert_eq!(out.description, "Нет описания");
    }
}
