//! Read-only content models
//!
//! Authored in the CMS and rendered by the page. Image and file fields hold
//! asset references (`image-<id>-<WxH>-<ext>`, `file-<id>-<ext>`), resolved to
//! CDN URLs by `crate::content::AssetUrls`. Unknown fields, including `_id`,
//! are ignored.

use serde::Deserialize;

/// Opening hero section (first document wins)
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeroDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
}

/// Scrolling narrative lines
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeDoc {
    #[serde(default)]
    pub texts: Vec<String>,
}

/// Timeline entry
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// "Why I like you" entry
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReasonDoc {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub order: Option<f64>,
}

/// Imagined future moment
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FutureMemoryDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// Future gallery card with extra images
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct FutureGalleryDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// Travel destination
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// Terms-of-service clause
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TermDoc {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
}

/// Background audio track
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrackDoc {
    #[serde(default)]
    pub track_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vibe: Option<String>,
    /// Uploaded file reference
    #[serde(default)]
    pub file: Option<String>,
    /// External URL, used when no file was uploaded
    #[serde(default)]
    pub url: Option<String>,
}
