/// Test data factories using builder pattern
///
/// Provides catalog and enrichment records with sensible defaults
use anicollect_lib::modules::catalog::domain::{
    ExternalLink, IncompleteDate, Poster, RelatedEntry, RelatedRef,
};
use anicollect_lib::modules::catalog::CatalogRecord;
use anicollect_lib::modules::enrichment::{EnrichmentRecord, MaterialData};

pub struct AnimeFactory {
    record: CatalogRecord,
}

impl AnimeFactory {
    pub fn new(id: u32) -> Self {
        Self {
            record: CatalogRecord {
                id: id.to_string(),
                name: Some(format!("Test Anime {}", id)),
                russian: Some(format!("Тестовое аниме {}", id)),
                kind: Some("tv".to_string()),
                status: Some("released".to_string()),
                ..Default::default()
            },
        }
    }

    /// Fully populated record, dubbed by AniLibria
    pub fn complete(id: u32) -> Self {
        Self::new(id)
            .with_fandubbers(&["AniLibria", "AniDUB"])
            .with_score(8.12)
            .with_episodes(13, 24)
            .with_aired_on("2001-04-04")
            .with_poster(&format!("/system/animes/original/{}.jpg", id))
            .with_kinopoisk_link("https://www.kinopoisk.ru/film/12345/")
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.record.name = Some(name.to_string());
        self
    }

    pub fn with_fandubbers(mut self, fandubbers: &[&str]) -> Self {
        self.record.fandubbers = fandubbers.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.record.score = Some(score);
        self
    }

    pub fn with_episodes(mut self, episodes: i64, duration: i64) -> Self {
        self.record.episodes = Some(episodes);
        self.record.duration = Some(duration);
        self
    }

    pub fn with_aired_on(mut self, date: &str) -> Self {
        self.record.aired_on = Some(IncompleteDate {
            date: Some(date.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_poster(mut self, original_url: &str) -> Self {
        self.record.poster = Some(Poster {
            original_url: Some(original_url.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_kinopoisk_link(mut self, url: &str) -> Self {
        self.record.external_links.push(ExternalLink {
            kind: Some("kinopoisk".to_string()),
            url: Some(url.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_related_anime(mut self, id: u32, relation: &str) -> Self {
        self.record.related.push(RelatedEntry {
            anime: Some(RelatedRef {
                id: id.to_string(),
                name: None,
            }),
            relation_kind: Some(relation.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> CatalogRecord {
        self.record
    }
}

pub fn enrichment_for(catalog_id: &str) -> EnrichmentRecord {
    EnrichmentRecord {
        id: Some(format!("serial-{}", catalog_id)),
        link: Some(format!("//kodik.info/serial/{}/abc/720p", catalog_id)),
        shikimori_id: Some(catalog_id.to_string()),
        last_season: Some("2".to_string()),
        material_data: Some(MaterialData {
            minimal_age: Some("12".to_string()),
            countries: Some(vec!["Япония".to_string(), "Китай".to_string()]),
            description: Some("Описание".to_string()),
            anime_genres: Some(vec!["драма".to_string(), "фэнтези".to_string()]),
            anime_studios: Some(vec!["Studio Test".to_string()]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
