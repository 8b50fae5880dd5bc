//! Asset reference to CDN URL resolution
//!
//! References look like `image-<id>-<W>x<H>-<ext>` and `file-<id>-<ext>`.

use crate::config::AssetArgs;

/// Resolves asset references against one CDN project/dataset
#[derive(Debug, Clone)]
pub struct AssetUrls {
    cdn_url: String,
    project_id: String,
    dataset: String,
}

impl AssetUrls {
    pub fn new(cdn_url: &str, project_id: &str, dataset: &str) -> Self {
        Self {
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
        }
    }

    pub fn from_args(args: &AssetArgs) -> Self {
        Self::new(&args.asset_cdn_url, &args.asset_project_id, &args.asset_dataset)
    }

    /// URL for an `image-...` reference, `None` if malformed
    pub fn image(&self, reference: &str) -> Option<String> {
        let mut parts = reference.split('-');
        if parts.next()? != "image" {
            return None;
        }
        let id = parts.next().filter(|s| !s.is_empty())?;
        let dimensions = parts.next().filter(|d| is_dimensions(d))?;
        let ext = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }

        Some(format!(
            "{}/images/{}/{}/{}-{}.{}",
            self.cdn_url, self.project_id, self.dataset, id, dimensions, ext
        ))
    }

    /// URL for a `file-...` reference, `None` if malformed
    pub fn file(&self, reference: &str) -> Option<String> {
        let mut parts = reference.split('-');
        if parts.next()? != "file" {
            return None;
        }
        let id = parts.next().filter(|s| !s.is_empty())?;
        let ext = parts.next().filter(|s| !s.is_empty())?;
        if parts.next().is_some() {
            return None;
        }

        Some(format!(
            "{}/files/{}/{}/{}.{}",
            self.cdn_url, self.project_id, self.dataset, id, ext
        ))
    }

    /// Resolve an optional image field
    pub fn image_opt(&self, reference: Option<&str>) -> Option<String> {
        reference.and_then(|r| self.image(r))
    }

    /// Resolve a list of image references, dropping malformed ones
    pub fn images(&self, references: &[String]) -> Vec<String> {
        references.iter().filter_map(|r| self.image(r)).collect()
    }

    /// Resolve a list of file references, dropping malformed ones
    pub fn files(&self, references: &[String]) -> Vec<String> {
        references.iter().filter_map(|r| self.file(r)).collect()
    }
}

fn is_dimensions(s: &str) -> bool {
    match s.split_once('x') {
        Some((w, h)) => {
            !w.is_empty()
                && !h.is_empty()
                && w.bytes().all(|b| b.is_ascii_digit())
                && h.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
