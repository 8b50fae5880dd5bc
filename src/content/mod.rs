//! Read-only content API
//!
//! Serves the CMS-authored models the page renders (hero copy, timeline,
//! reasons, future memories, places, terms, audio tracks, no-click
//! reactions). Without a store lists are empty and single documents absent.

mod assets;
pub mod models;

pub use assets::AssetUrls;
pub use models::ContentModel;

use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::db::schemas::{
    AudioTrackDoc, FutureGalleryDoc, FutureMemoryDoc, HeroDoc, MetricsDoc, MilestoneDoc,
    NarrativeDoc, PlaceDoc, ReasonDoc, TermDoc,
};
use crate::db::MongoClient;
use crate::types::{Result, VallyError};

/// Content collections addressable under `/api/content/{kind}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Hero,
    Narrative,
    Milestones,
    Reasons,
    FutureMemories,
    FutureGallery,
    Places,
    Terms,
    AudioTracks,
    Reactions,
}

impl ContentKind {
    pub const ALL: [ContentKind; 10] = [
        Self::Hero,
        Self::Narrative,
        Self::Milestones,
        Self::Reasons,
        Self::FutureMemories,
        Self::FutureGallery,
        Self::Places,
        Self::Terms,
        Self::AudioTracks,
        Self::Reactions,
    ];

    /// Path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Narrative => "narrative",
            Self::Milestones => "milestones",
            Self::Reasons => "reasons",
            Self::FutureMemories => "future-memories",
            Self::FutureGallery => "future-gallery",
            Self::Places => "places",
            Self::Terms => "terms",
            Self::AudioTracks => "audio-tracks",
            Self::Reactions => "reactions",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = VallyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| VallyError::NotFound(format!("Unknown content kind: {}", s)))
    }
}

/// Reads content collections and renders their views
#[derive(Clone)]
pub struct ContentService {
    mongo: Option<MongoClient>,
    assets: AssetUrls,
}

impl ContentService {
    pub fn new(mongo: Option<MongoClient>, assets: AssetUrls) -> Self {
        Self { mongo, assets }
    }

    /// Views of `kind`: an array, or one value for single-document kinds
    pub async fn list(&self, kind: ContentKind) -> Result<serde_json::Value> {
        match kind {
            ContentKind::Hero => self.list_model::<HeroDoc>().await,
            ContentKind::Narrative => self.list_model::<NarrativeDoc>().await,
            ContentKind::Milestones => self.list_model::<MilestoneDoc>().await,
            ContentKind::Reasons => self.list_model::<ReasonDoc>().await,
            ContentKind::FutureMemories => self.list_model::<FutureMemoryDoc>().await,
            ContentKind::FutureGallery => self.list_model::<FutureGalleryDoc>().await,
            ContentKind::Places => self.list_model::<PlaceDoc>().await,
            ContentKind::Terms => self.list_model::<TermDoc>().await,
            ContentKind::AudioTracks => self.list_model::<AudioTrackDoc>().await,
            ContentKind::Reactions => self.list_model::<MetricsDoc>().await,
        }
    }

    async fn list_model<T: ContentModel>(&self) -> Result<serde_json::Value> {
        let docs: Vec<T> = match self.mongo {
            Some(ref mongo) => {
                let docs = mongo
                    .find_sorted::<T>(T::COLLECTION, T::filter(), T::sort())
                    .await?;
                debug!(collection = T::COLLECTION, count = docs.len(), "Content loaded");
                docs
            }
            None => Vec::new(),
        };

        if T::FIRST_ONLY {
            self.render_first(docs)
        } else {
            self.render(docs)
        }
    }

    fn render<T: ContentModel>(&self, docs: Vec<T>) -> Result<serde_json::Value> {
        let views: Vec<T::View> = docs
            .into_iter()
            .map(|d| d.into_view(&self.assets))
            .collect();
        serde_json::to_value(views).map_err(|e| VallyError::Internal(e.to_string()))
    }

    fn render_first<T: ContentModel>(&self, docs: Vec<T>) -> Result<serde_json::Value> {
        match docs.into_iter().next() {
            Some(doc) => serde_json::to_value(doc.into_view(&self.assets))
                .map_err(|e| VallyError::Internal(e.to_string())),
            None => Ok(T::absent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ContentService {
        ContentService::new(None, AssetUrls::new("https://cdn.example", "p", "d"))
    }

    #[test]
    fn test_kind_parses_path_segments() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>().unwrap(), kind);
        }
        assert!(matches!(
            "metrics".parse::<ContentKind>(),
            Err(VallyError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_without_store_is_empty() {
        let value = service().list(ContentKind::Places).await.unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_single_kinds_without_store() {
        let service = service();
        assert!(service.list(ContentKind::Hero).await.unwrap().is_null());
        assert_eq!(
            service.list(ContentKind::Narrative).await.unwrap(),
            serde_json::json!([])
        );
        assert_eq!(
            service.list(ContentKind::Reactions).await.unwrap(),
            serde_json::json!({ "reactionImages": [], "reactionSounds": [] })
        );
    }

    #[test]
    fn test_hero_served_as_first_document() {
        let docs = vec![
            HeroDoc {
                title: "Us".to_string(),
                background_image: Some("image-a-1x1-png".to_string()),
                ..Default::default()
            },
            HeroDoc {
                title: "Draft".to_string(),
                ..Default::default()
            },
        ];
        let value = service().render_first(docs).unwrap();
        assert_eq!(value["title"], "Us");
        assert_eq!(
            value["backgroundImageUrl"],
            "https://cdn.example/images/p/d/a-1x1.png"
        );
    }

    #[test]
    fn test_render_keeps_order() {
        let docs = vec![
            TermDoc {
                title: "No snoring".to_string(),
                ..Default::default()
            },
            TermDoc {
                title: "Shared fries".to_string(),
                ..Default::default()
            },
        ];
        let value = service().render(docs).unwrap();
        assert_eq!(value[0]["title"], "No snoring");
        assert_eq!(value[1]["title"], "Shared fries");
    }
}
