//! Builds image URLs for the upstream image-transformation proxy.
//!
//! The proxy reads `width`, `height`, `fit`, `quality` and `format` from the
//! query string; this module only constructs such URLs.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Fit {
    #[default]
    ScaleDown,
    Contain,
    Cover,
    Crop,
    Pad,
}

impl Fit {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ScaleDown => "scale-down",
            Self::Contain => "contain",
            Self::Cover => "cover",
            Self::Crop => "crop",
            Self::Pad => "pad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Auto,
    Webp,
    Avif,
    Json,
}

impl Format {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Webp => "webp",
            Self::Avif => "avif",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageTransform {
    pub width: u32,
    pub height: Option<u32>,
    pub fit: Fit,
    pub quality: u8,
    pub format: Format,
}

impl Default for ImageTransform {
    /// Mobile friendly defaults: 800px wide, quality 85.
    fn default() -> Self {
        Self {
            width: 800,
            height: None,
            fit: Fit::ScaleDown,
            quality: 85,
            format: Format::Auto,
        }
    }
}

/// Named transforms used across the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePreset {
    /// Small, fast loading textures for the 3D gallery.
    GalleryThumbnail,
    /// Higher quality full view.
    LightboxFull,
    /// Very small preview.
    TinyPreview,
    /// The image shown inside the lightbox drawer.
    LightboxDrawer,
}

impl ImagePreset {
    #[must_use]
    pub const fn transform(&self) -> ImageTransform {
        match self {
            Self::GalleryThumbnail => ImageTransform {
                width: 400,
                height: None,
                fit: Fit::Cover,
                quality: 80,
                format: Format::Auto,
            },
            Self::LightboxFull => ImageTransform {
                width: 1200,
                height: None,
                fit: Fit::ScaleDown,
                quality: 90,
                format: Format::Auto,
            },
            Self::TinyPreview => ImageTransform {
                width: 200,
                height: None,
                fit: Fit::Cover,
                quality: 70,
                format: Format::Auto,
            },
            Self::LightboxDrawer => ImageTransform {
                width: 1200,
                height: None,
                fit: Fit::Cover,
                quality: 80,
                format: Format::Auto,
            },
        }
    }

    #[must_use]
    pub fn apply(&self, image_url: &str) -> String {
        transform_image(image_url, &self.transform())
    }
}

/// Decorates `image_url` with transformation parameters.
///
/// Returns an empty string for an empty URL. Parameters are appended with `&`
/// when the URL already carries a query string.
#[must_use]
pub fn transform_image(image_url: &str, options: &ImageTransform) -> String {
    if image_url.is_empty() {
        return String::new();
    }

    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair("width", &options.width.to_string());
    if let Some(height) = options.height {
        params.append_pair("height", &height.to_string());
    }
    params.append_pair("fit", options.fit.as_str());
    params.append_pair("quality", &options.quality.to_string());
    params.append_pair("format", options.format.as_str());
    let query = params.finish();

    let separator = if image_url.contains('?') { '&' } else { '?' };
    format!("{image_url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_stays_empty() {
        assert_eq!(transform_image("", &ImageTransform::default()), "");
        assert_eq!(ImagePreset::GalleryThumbnail.apply(""), "");
    }

    #[test]
    fn default_transform() {
        assert_eq!(
            transform_image("https://a.b/p.jpg", &ImageTransform::default()),
            "https://a.b/p.jpg?width=800&fit=scale-down&quality=85&format=auto"
        );
    }

    #[test]
    fn height_is_optional() {
        let options = ImageTransform {
            height: Some(300),
            ..ImageTransform::default()
        };
        assert_eq!(
            transform_image("https://a.b/p.jpg", &options),
            "https://a.b/p.jpg?width=800&height=300&fit=scale-down&quality=85&format=auto"
        );
    }

    #[test]
    fn presets() {
        let url = "https://assets.example.com/gallery/1-abc-x.jpg";
        assert_eq!(
            ImagePreset::GalleryThumbnail.apply(url),
            format!("{url}?width=400&fit=cover&quality=80&format=auto")
        );
        assert_eq!(
            ImagePreset::TinyPreview.apply(url),
            format!("{url}?width=200&fit=cover&quality=70&format=auto")
        );
        assert_eq!(
            ImagePreset::LightboxFull.apply(url),
            format!("{url}?width=1200&fit=scale-down&quality=90&format=auto")
        );
    }

    #[test]
    fn existing_query_is_extended() {
        assert_eq!(
            ImagePreset::LightboxDrawer.apply("https://a.b/p.jpg?v=2"),
            "https://a.b/p.jpg?v=2&width=1200&fit=cover&quality=80&format=auto"
        );
    }
}
