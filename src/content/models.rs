//! Content views served to the page
//!
//! Each CMS document maps to a camelCase view with asset references already
//! resolved to URLs.

use bson::{doc, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::content::AssetUrls;
use crate::db::schemas::{
    AudioTrackDoc, FutureGalleryDoc, FutureMemoryDoc, HeroDoc, MetricsDoc, MilestoneDoc,
    NarrativeDoc, PlaceDoc, ReasonDoc, TermDoc, METRICS_COLLECTION, METRICS_DOC_ID,
};

/// A read-only content document and how to present it
pub trait ContentModel: DeserializeOwned + Unpin + Send + Sync {
    /// Backing collection
    const COLLECTION: &'static str;
    /// Serve only the first matching document instead of a list
    const FIRST_ONLY: bool = false;

    type View: Serialize;

    /// Documents to read
    fn filter() -> Document {
        doc! {}
    }

    /// Read order; `_id` last keeps ties stable
    fn sort() -> Document {
        doc! { "order": 1, "_id": 1 }
    }

    /// Body served by a `FIRST_ONLY` model when nothing is stored
    fn absent() -> serde_json::Value {
        serde_json::Value::Null
    }

    fn into_view(self, assets: &AssetUrls) -> Self::View;
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub title: String,
    pub subtitle: Option<String>,
    pub background_image_url: Option<String>,
}

impl ContentModel for HeroDoc {
    const COLLECTION: &'static str = "hero";
    const FIRST_ONLY: bool = true;
    type View = HeroView;

    fn sort() -> Document {
        doc! { "_id": 1 }
    }

    fn into_view(self, assets: &AssetUrls) -> HeroView {
        HeroView {
            title: self.title,
            subtitle: self.subtitle,
            background_image_url: assets.image_opt(self.background_image.as_deref()),
        }
    }
}

/// Served as the flat list of lines of the first narrative document
impl ContentModel for NarrativeDoc {
    const COLLECTION: &'static str = "narrative";
    const FIRST_ONLY: bool = true;
    type View = Vec<String>;

    fn sort() -> Document {
        doc! { "_id": 1 }
    }

    fn absent() -> serde_json::Value {
        serde_json::Value::Array(Vec::new())
    }

    fn into_view(self, _assets: &AssetUrls) -> Vec<String> {
        self.texts
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneView {
    pub title: String,
    pub category: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
}

impl ContentModel for MilestoneDoc {
    const COLLECTION: &'static str = "milestones";
    type View = MilestoneView;

    fn sort() -> Document {
        doc! { "order": 1, "year": 1, "_id": 1 }
    }

    fn into_view(self, assets: &AssetUrls) -> MilestoneView {
        MilestoneView {
            image_url: assets.image_opt(self.image.as_deref()),
            image_urls: assets.images(&self.images),
            title: self.title,
            category: self.category,
            year: self.year,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReasonView {
    pub text: String,
}

impl ContentModel for ReasonDoc {
    const COLLECTION: &'static str = "reasons";
    type View = ReasonView;

    fn into_view(self, _assets: &AssetUrls) -> ReasonView {
        ReasonView { text: self.text }
    }
}

/// Shared view for future memories and the future gallery
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
}

impl ContentModel for FutureMemoryDoc {
    const COLLECTION: &'static str = "future_memories";
    type View = CardView;

    fn into_view(self, assets: &AssetUrls) -> CardView {
        CardView {
            image_url: assets.image_opt(self.image.as_deref()),
            image_urls: Vec::new(),
            title: self.title,
            description: self.description,
        }
    }
}

impl ContentModel for FutureGalleryDoc {
    const COLLECTION: &'static str = "future_gallery";
    type View = CardView;

    fn into_view(self, assets: &AssetUrls) -> CardView {
        CardView {
            image_url: assets.image_opt(self.image.as_deref()),
            image_urls: assets.images(&self.images),
            title: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceView {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ContentModel for PlaceDoc {
    const COLLECTION: &'static str = "places";
    type View = PlaceView;

    fn into_view(self, assets: &AssetUrls) -> PlaceView {
        PlaceView {
            image_url: assets.image_opt(self.image.as_deref()),
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TermView {
    pub title: String,
    pub description: Option<String>,
}

impl ContentModel for TermDoc {
    const COLLECTION: &'static str = "terms";
    type View = TermView;

    fn into_view(self, _assets: &AssetUrls) -> TermView {
        TermView {
            title: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrackView {
    pub track_id: String,
    pub title: String,
    pub vibe: Option<String>,
    pub src: Option<String>,
}

impl ContentModel for AudioTrackDoc {
    const COLLECTION: &'static str = "audio_tracks";
    type View = AudioTrackView;

    fn sort() -> Document {
        doc! { "_id": 1 }
    }

    fn into_view(self, assets: &AssetUrls) -> AudioTrackView {
        // Uploaded file wins over the external URL
        let src = self
            .file
            .as_deref()
            .and_then(|r| assets.file(r))
            .or(self.url.filter(|u| !u.is_empty()));

        AudioTrackView {
            track_id: self.track_id,
            title: self.title,
            vibe: self.vibe,
            src,
        }
    }
}

/// No-click stickers and sounds authored on the metrics singleton
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReactionsView {
    pub reaction_images: Vec<String>,
    pub reaction_sounds: Vec<String>,
}

impl ContentModel for MetricsDoc {
    const COLLECTION: &'static str = METRICS_COLLECTION;
    const FIRST_ONLY: bool = true;
    type View = ReactionsView;

    fn filter() -> Document {
        doc! { "_id": METRICS_DOC_ID }
    }

    fn sort() -> Document {
        doc! { "_id": 1 }
    }

    fn absent() -> serde_json::Value {
        serde_json::json!({ "reactionImages": [], "reactionSounds": [] })
    }

    fn into_view(self, assets: &AssetUrls) -> ReactionsView {
        ReactionsView {
            reaction_images: assets.images(&self.reaction_images),
            reaction_sounds: assets.files(&self.reaction_sounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> AssetUrls {
        AssetUrls::new("https://cdn.example", "p", "d")
    }

    #[test]
    fn test_audio_prefers_uploaded_file() {
        let track = AudioTrackDoc {
            track_id: "intro".to_string(),
            title: "Intro".to_string(),
            vibe: None,
            file: Some("file-abc-mp3".to_string()),
            url: Some("https://elsewhere/a.mp3".to_string()),
        };
        assert_eq!(
            track.into_view(&assets()).src.as_deref(),
            Some("https://cdn.example/files/p/d/abc.mp3")
        );
    }

    #[test]
    fn test_audio_falls_back_to_url() {
        let track = AudioTrackDoc {
            track_id: "intro".to_string(),
            file: Some("garbage".to_string()),
            url: Some("https://elsewhere/a.mp3".to_string()),
            ..Default::default()
        };
        assert_eq!(
            track.into_view(&assets()).src.as_deref(),
            Some("https://elsewhere/a.mp3")
        );
    }

    #[test]
    fn test_milestone_view_resolves_images() {
        let milestone = MilestoneDoc {
            title: "First trip".to_string(),
            image: Some("image-a-10x20-png".to_string()),
            images: vec!["image-b-1x1-jpg".to_string(), "nope".to_string()],
            ..Default::default()
        };
        let view = milestone.into_view(&assets());
        assert_eq!(
            view.image_url.as_deref(),
            Some("https://cdn.example/images/p/d/a-10x20.png")
        );
        assert_eq!(view.image_urls, vec!["https://cdn.example/images/p/d/b-1x1.jpg"]);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("imageUrls").is_some());
    }

    #[test]
    fn test_reactions_resolve_to_urls() {
        let metrics = MetricsDoc {
            no_count: 7,
            reaction_images: vec!["image-cat-64x64-gif".to_string(), "bad".to_string()],
            reaction_sounds: vec!["file-sob-mp3".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(metrics.into_view(&assets())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "reactionImages": ["https://cdn.example/images/p/d/cat-64x64.gif"],
                "reactionSounds": ["https://cdn.example/files/p/d/sob.mp3"],
            })
        );
    }

    #[test]
    fn test_reactions_absent_matches_empty_view() {
        assert_eq!(
            MetricsDoc::absent(),
            serde_json::to_value(ReactionsView::default()).unwrap()
        );
    }

    #[test]
    fn test_milestones_tie_break_on_year() {
        let keys: Vec<String> = MilestoneDoc::sort().keys().cloned().collect();
        assert_eq!(keys, vec!["order", "year", "_id"]);
    }

    #[test]
    fn test_narrative_is_flat_lines() {
        let narrative = NarrativeDoc {
            texts: vec!["Once".to_string(), "Then".to_string()],
        };
        let json = serde_json::to_value(narrative.into_view(&assets())).unwrap();
        assert_eq!(json, serde_json::json!(["Once", "Then"]));
        assert_eq!(NarrativeDoc::absent(), serde_json::json!([]));
    }

    #[test]
    fn test_future_memory_omits_empty_gallery() {
        let memory = FutureMemoryDoc {
            title: "Paris".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(memory.into_view(&assets())).unwrap();
        assert!(json.get("imageUrls").is_none());
        assert!(json["imageUrl"].is_null());
    }
}
