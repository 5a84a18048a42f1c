use common_types::image_url::ImagePreset;
use common_types::{Photo, ScreenPosition};
use std::time::{Duration, Instant};

pub const DRAWER_DURATION: Duration = Duration::from_millis(650);
pub const CONTENT_DELAY: Duration = Duration::from_millis(140);
pub const STORY_DELAY: Duration = Duration::from_millis(260);
/// Extra time after the drawer has slid out before the lightbox is gone.
pub const CLOSE_GRACE: Duration = Duration::from_millis(120);

/// Which parts of the drawer are visible at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightboxStages {
    pub drawer: bool,
    pub content: bool,
    pub story: bool,
}

/// Detail drawer for one photo, anchored at the frame it was opened from.
#[derive(Debug, Clone)]
pub struct Lightbox {
    photo: Photo,
    anchor: ScreenPosition,
    shown_at: Option<Instant>,
    closing_since: Option<Instant>,
}

impl Lightbox {
    #[must_use]
    pub const fn open(photo: Photo, anchor: ScreenPosition) -> Self {
        Self {
            photo,
            anchor,
            shown_at: None,
            closing_since: None,
        }
    }

    /// Called once per display frame. The drawer starts sliding in on the
    /// first frame after opening.
    pub fn on_frame(&mut self, now: Instant) {
        if self.shown_at.is_none() && self.closing_since.is_none() {
            self.shown_at = Some(now);
        }
    }

    #[must_use]
    pub fn stages(&self, now: Instant) -> LightboxStages {
        if self.closing_since.is_some() {
            return LightboxStages::default();
        }
        let Some(shown_at) = self.shown_at else {
            return LightboxStages::default();
        };
        let elapsed = now.saturating_duration_since(shown_at);
        LightboxStages {
            drawer: true,
            content: elapsed >= CONTENT_DELAY,
            story: elapsed >= STORY_DELAY,
        }
    }

    /// Starts closing. Returns false if a close is already under way.
    pub fn close(&mut self, now: Instant) -> bool {
        if self.closing_since.is_some() {
            return false;
        }
        self.closing_since = Some(now);
        true
    }

    /// Keyboard handling; only Escape does anything.
    pub fn handle_key(&mut self, key: &str, now: Instant) -> bool {
        key == "Escape" && self.close(now)
    }

    #[must_use]
    pub const fn is_closing(&self) -> bool {
        self.closing_since.is_some()
    }

    /// True once the close animation has fully finished.
    #[must_use]
    pub fn is_closed(&self, now: Instant) -> bool {
        self.closing_since.is_some_and(|since| {
            now.saturating_duration_since(since) >= DRAWER_DURATION + CLOSE_GRACE
        })
    }

    #[must_use]
    pub const fn photo(&self) -> &Photo {
        &self.photo
    }

    #[must_use]
    pub const fn anchor(&self) -> ScreenPosition {
        self.anchor
    }

    /// Follows the photo frame as the gallery keeps moving behind the drawer.
    pub fn set_anchor(&mut self, anchor: ScreenPosition) {
        self.anchor = anchor;
    }

    #[must_use]
    pub fn image_url(&self) -> String {
        ImagePreset::LightboxDrawer.apply(&self.photo.url)
    }

    #[must_use]
    pub fn story(&self) -> &str {
        self.photo
            .why_special
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.photo.description)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.photo
            .author_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Name hidden")
    }
}
