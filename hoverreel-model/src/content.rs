//! Content snapshot supplied by the catalog collaborator.
//!
//! A [`ContentSummary`] is immutable once handed to the preview subsystem;
//! everything here is read-only resolution over the catalog payload.

use crate::error::ModelError;
use crate::ids::ContentId;

/// Kind of media attached to a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AssetType {
    Poster,
    Backdrop,
    Thumbnail,
    Trailer,
    Clip,
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

impl AssetType {
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            AssetType::Poster | AssetType::Backdrop | AssetType::Thumbnail
        )
    }

    pub fn is_video(&self) -> bool {
        matches!(self, AssetType::Trailer | AssetType::Clip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentType {
    #[default]
    Movie,
    Series,
    Episode,
    Short,
    #[cfg_attr(feature = "serde", serde(other))]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MediaAsset {
    pub url: String,
    pub asset_type: AssetType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailerSource {
    pub url: String,
}

impl TrailerSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Certification label such as `PG-13` or `TV-Y7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgeRating(pub String);

impl AgeRating {
    const KID_SAFE: &'static [&'static str] =
        &["G", "PG", "U", "ALL", "TV-Y", "TV-Y7", "TV-G"];

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_kid_safe(&self) -> bool {
        let label = self.0.trim();
        Self::KID_SAFE
            .iter()
            .any(|safe| safe.eq_ignore_ascii_case(label))
    }
}

/// Catalog snapshot for one content tile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ContentSummary {
    pub id: ContentId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub media_assets: Vec<MediaAsset>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_image_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub trailer: Option<TrailerSource>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub content_type: ContentType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub age_rating: AgeRating,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_minutes: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub average_rating: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub genres: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_description: String,
}

impl ContentSummary {
    pub fn new(id: ContentId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            media_assets: Vec::new(),
            primary_image_url: None,
            trailer: None,
            content_type: ContentType::default(),
            age_rating: AgeRating::default(),
            duration_minutes: 0,
            average_rating: 0.0,
            genres: Vec::new(),
            short_description: String::new(),
        }
    }

    pub fn with_asset(
        mut self,
        url: impl Into<String>,
        asset_type: AssetType,
        is_primary: bool,
    ) -> Self {
        self.media_assets.push(MediaAsset {
            url: url.into(),
            asset_type,
            is_primary,
        });
        self
    }

    pub fn with_trailer(mut self, url: impl Into<String>) -> Self {
        self.trailer = Some(TrailerSource::new(url));
        self
    }

    pub fn with_primary_image(mut self, url: impl Into<String>) -> Self {
        self.primary_image_url = Some(url.into());
        self
    }

    /// Reject snapshots the preview cannot render at all.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidContent(format!(
                "content {} has no title",
                self.id
            )));
        }
        if self.media_assets.iter().any(|asset| asset.url.trim().is_empty())
        {
            return Err(ModelError::InvalidContent(format!(
                "content {} has an asset without a url",
                self.id
            )));
        }
        Ok(())
    }

    /// Poster shown before (and instead of) the trailer.
    ///
    /// Resolution order: explicit primary image, primary image asset, first
    /// poster, then any backdrop or thumbnail.
    pub fn poster_url(&self) -> Option<&str> {
        if let Some(url) = self.primary_image_url.as_deref()
            && !url.trim().is_empty()
        {
            return Some(url);
        }

        let images = || {
            self.media_assets
                .iter()
                .filter(|asset| asset.asset_type.is_image())
        };

        images()
            .find(|asset| asset.is_primary)
            .or_else(|| {
                images().find(|asset| asset.asset_type == AssetType::Poster)
            })
            .or_else(|| images().next())
            .map(|asset| asset.url.as_str())
    }

    /// Trailer source, falling back to trailer or clip assets.
    pub fn trailer_source(&self) -> Option<TrailerSource> {
        if let Some(trailer) = &self.trailer
            && !trailer.url.trim().is_empty()
        {
            return Some(trailer.clone());
        }

        let by_type = |kind: AssetType| {
            self.media_assets
                .iter()
                .find(|asset| asset.asset_type == kind)
        };

        by_type(AssetType::Trailer)
            .or_else(|| by_type(AssetType::Clip))
            .map(|asset| TrailerSource::new(asset.url.clone()))
    }

    pub fn has_trailer(&self) -> bool {
        self.trailer_source().is_some()
    }

    /// Runtime formatted as `1h 42m` or `42m`; empty when unknown.
    pub fn duration_label(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        match (hours, minutes) {
            (0, 0) => String::new(),
            (0, m) => format!("{m}m"),
            (h, 0) => format!("{h}h"),
            (h, m) => format!("{h}h {m}m"),
        }
    }

    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.average_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ContentSummary {
        ContentSummary::new(ContentId::new("c-1").unwrap(), "Night Train")
    }

    #[test]
    fn poster_prefers_explicit_primary_image() {
        let content = summary()
            .with_asset("https://cdn/poster.jpg", AssetType::Poster, false)
            .with_primary_image("https://cdn/primary.jpg");
        assert_eq!(content.poster_url(), Some("https://cdn/primary.jpg"));
    }

    #[test]
    fn poster_falls_back_through_assets() {
        let content = summary()
            .with_asset("https://cdn/backdrop.jpg", AssetType::Backdrop, false)
            .with_asset("https://cdn/poster.jpg", AssetType::Poster, false);
        assert_eq!(content.poster_url(), Some("https://cdn/poster.jpg"));

        let flagged = summary()
            .with_asset("https://cdn/poster.jpg", AssetType::Poster, false)
            .with_asset("https://cdn/thumb.jpg", AssetType::Thumbnail, true);
        assert_eq!(flagged.poster_url(), Some("https://cdn/thumb.jpg"));

        let backdrop_only = summary().with_asset(
            "https://cdn/backdrop.jpg",
            AssetType::Backdrop,
            false,
        );
        assert_eq!(
            backdrop_only.poster_url(),
            Some("https://cdn/backdrop.jpg")
        );

        assert_eq!(summary().poster_url(), None);
    }

    #[test]
    fn trailer_resolution_uses_assets_when_missing() {
        assert!(!summary().has_trailer());

        let clip_only =
            summary().with_asset("https://cdn/clip.mp4", AssetType::Clip, false);
        assert_eq!(
            clip_only.trailer_source(),
            Some(TrailerSource::new("https://cdn/clip.mp4"))
        );

        let explicit = clip_only.with_trailer("https://cdn/trailer.mp4");
        assert_eq!(
            explicit.trailer_source().map(|t| t.url),
            Some("https://cdn/trailer.mp4".to_string())
        );
    }

    #[test]
    fn duration_and_rating_labels() {
        let mut content = summary();
        assert_eq!(content.duration_label(), "");
        content.duration_minutes = 42;
        assert_eq!(content.duration_label(), "42m");
        content.duration_minutes = 102;
        assert_eq!(content.duration_label(), "1h 42m");
        content.duration_minutes = 120;
        assert_eq!(content.duration_label(), "2h");
        content.average_rating = 7.86;
        assert_eq!(content.rating_label(), "7.9");
    }

    #[test]
    fn kid_safe_ratings() {
        assert!(AgeRating::new("tv-y7").is_kid_safe());
        assert!(AgeRating::new("PG").is_kid_safe());
        assert!(!AgeRating::new("PG-13").is_kid_safe());
        assert!(!AgeRating::new("R").is_kid_safe());
    }

    #[test]
    fn validate_rejects_untitled_content() {
        let mut content = summary();
        assert!(content.validate().is_ok());
        content.title = "  ".into();
        assert!(content.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_catalog_payload() {
        let raw = r#"{
            "id": "c-9",
            "title": "Harbor Lights",
            "mediaAssets": [
                {"url": "https://cdn/p.jpg", "assetType": "poster", "isPrimary": true},
                {"url": "https://cdn/x.bin", "assetType": "hologram"}
            ],
            "trailer": {"url": "https://cdn/t.mp4"},
            "contentType": "series",
            "ageRating": "TV-G",
            "durationMinutes": 50,
            "averageRating": 8.1,
            "genres": ["Drama"],
            "shortDescription": "Lighthouse keepers."
        }"#;
        let content: ContentSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(content.id.as_str(), "c-9");
        assert_eq!(content.content_type, ContentType::Series);
        assert_eq!(content.media_assets[1].asset_type, AssetType::Other);
        assert!(content.age_rating.is_kid_safe());
        assert_eq!(content.poster_url(), Some("https://cdn/p.jpg"));
    }
}
