use crate::ambient::{AmbientMotion, GroupTransform};
use crate::layout::{LayoutTuning, PhotoPlacement, layout_with};
use crate::projection::{Camera, DEFAULT_ASPECT, photo_transform, plane_size, project_photo};
use crate::reporter::ScreenReporter;
use crate::reveal::RevealAnimation;
use crate::texture::{LoadingProgress, TextureLoader};
use cgmath::Matrix4;
use common_types::{Photo, ScreenPosition};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

pub const HOVER_SCALE: f32 = 1.05;
/// Fraction of the remaining distance to the hover target covered per frame.
pub const HOVER_SMOOTHING: f32 = 0.1;

/// One photo as it should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPhoto {
    pub id: Uuid,
    pub placement: PhotoPlacement,
    pub world: Matrix4<f32>,
    /// Plane size before the world scale.
    pub width: f32,
    pub height: f32,
    pub hover_scale: f32,
    pub texture_loaded: bool,
}

/// The scattered 3D gallery: photos, reveal, ambient drift, hover and textures.
pub struct ScatteredGallery {
    camera: Camera,
    tuning: LayoutTuning,
    photos: Vec<Photo>,
    country_filter: Option<String>,
    visible: Vec<Photo>,
    reveal: RevealAnimation,
    ambient: AmbientMotion,
    textures: TextureLoader,
    reporter: ScreenReporter,
    hovered: Option<Uuid>,
    hover_scales: HashMap<Uuid, f32>,
    active: Option<Uuid>,
    last_group: GroupTransform,
    last_progress: f32,
}

impl ScatteredGallery {
    #[must_use]
    pub fn new(camera: Camera, client: Client) -> Self {
        Self {
            camera,
            tuning: LayoutTuning::default(),
            photos: Vec::new(),
            country_filter: None,
            visible: Vec::new(),
            reveal: RevealAnimation::default(),
            ambient: AmbientMotion::default(),
            textures: TextureLoader::new(client),
            reporter: ScreenReporter::default(),
            hovered: None,
            hover_scales: HashMap::new(),
            active: None,
            last_group: GroupTransform::default(),
            last_progress: 0.0,
        }
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: LayoutTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.camera = self.camera.with_viewport(width, height);
    }

    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replaces the photo set. Must be called from within a tokio runtime.
    pub fn set_photos(&mut self, photos: Vec<Photo>, now: Instant) {
        self.photos = photos;
        self.refresh(now);
    }

    /// Shows only photos from `country`; `None`, blank or `"all"` shows everything.
    pub fn set_country_filter(&mut self, country: Option<&str>, now: Instant) {
        self.country_filter = country
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_lowercase);
        self.refresh(now);
    }

    fn refresh(&mut self, now: Instant) {
        self.visible = self
            .photos
            .iter()
            .filter(|photo| {
                self.country_filter
                    .as_ref()
                    .is_none_or(|country| photo.country.trim().to_lowercase() == *country)
            })
            .cloned()
            .collect();
        debug!("Gallery shows {} of {} photos", self.visible.len(), self.photos.len());

        self.reveal.sync_count(self.visible.len(), now);

        let ids: HashSet<_> = self.visible.iter().map(|p| p.id).collect();
        self.textures.retain(&ids);
        self.hover_scales.retain(|id, _| ids.contains(id));
        for photo in &self.visible {
            self.textures.request(photo.id, &photo.url);
        }
    }

    #[must_use]
    pub fn visible_photos(&self) -> &[Photo] {
        &self.visible
    }

    pub fn set_hovered(&mut self, photo_id: Option<Uuid>) {
        self.hovered = photo_id;
    }

    /// Photo whose screen position is reported every few frames.
    pub fn set_active(&mut self, photo_id: Option<Uuid>) {
        if self.active != photo_id {
            self.active = photo_id;
            self.reporter.reset();
        }
    }

    pub fn on_active_frame(&mut self, callback: impl FnMut(Uuid, ScreenPosition) + Send + 'static) {
        self.reporter.set_callback(callback);
    }

    pub fn begin_drag(&mut self, now: Instant) {
        self.ambient.begin_drag(now);
    }

    pub fn end_drag(&mut self, now: Instant) {
        self.ambient.end_drag(now);
    }

    #[must_use]
    pub fn loading_progress(&self) -> LoadingProgress {
        self.textures.progress()
    }

    #[must_use]
    pub fn textures(&self) -> &TextureLoader {
        &self.textures
    }

    /// Advances all animation to `now` and lays out every visible photo.
    pub fn frame(&mut self, now: Instant) -> Vec<RenderedPhoto> {
        self.textures.poll();
        self.last_progress = self.reveal.progress(now);
        self.last_group = self.ambient.tick(now);

        for photo in &self.visible {
            let target = if self.hovered == Some(photo.id) {
                HOVER_SCALE
            } else {
                1.0
            };
            let scale = self.hover_scales.entry(photo.id).or_insert(1.0);
            *scale += (target - *scale) * HOVER_SMOOTHING;
        }

        let rendered: Vec<_> = self
            .visible
            .iter()
            .enumerate()
            .map(|(index, photo)| self.render(index, photo.id))
            .collect();

        let active = self
            .active
            .and_then(|id| rendered.iter().find(|r| r.id == id));
        if let Some(photo) = active {
            let position = project_photo(&self.camera, &photo.world, photo.width, photo.height);
            self.reporter.report(now, photo.id, position);
        }

        rendered
    }

    /// Screen rectangle of a photo as of the last frame, for click handling.
    #[must_use]
    pub fn hit_screen_position(&self, photo_id: Uuid) -> Option<ScreenPosition> {
        let index = self.visible.iter().position(|p| p.id == photo_id)?;
        let rendered = self.render(index, photo_id);
        Some(project_photo(
            &self.camera,
            &rendered.world,
            rendered.width,
            rendered.height,
        ))
    }

    fn render(&self, index: usize, photo_id: Uuid) -> RenderedPhoto {
        let placement = layout_with(index, self.visible.len(), self.last_progress, &self.tuning);
        let hover_scale = self.hover_scales.get(&photo_id).copied().unwrap_or(1.0);
        let aspect = self.textures.aspect(photo_id, DEFAULT_ASPECT);
        let (width, height) = plane_size(placement.scale, aspect);
        let world = photo_transform(
            &self.camera,
            &self.last_group,
            placement.position,
            placement.tilt,
            self.last_group.breathe * hover_scale,
        );

        RenderedPhoto {
            id: photo_id,
            placement,
            world,
            width,
            height,
            hover_scale,
            texture_loaded: self.textures.is_loaded(photo_id),
        }
    }
}
