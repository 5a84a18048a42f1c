use common_types::image_url::ImagePreset;
use image::RgbaImage;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};
use uuid::Uuid;

/// Neutral grey shown until a thumbnail arrives.
pub const PLACEHOLDER_RGBA: [u8; 4] = [225, 225, 225, 255];

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("thumbnail request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("thumbnail could not be decoded: {0}")]
    Decode(#[from] image::ImageError),

    #[error("decode task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Decoded RGBA pixels of one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: PLACEHOLDER_RGBA.to_vec(),
        }
    }

    /// Width over height, if usable as a plane aspect.
    #[must_use]
    pub fn aspect(&self) -> Option<f32> {
        usable_aspect(self.width, self.height)
    }
}

impl From<RgbaImage> for Texture {
    fn from(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        }
    }
}

/// Aspect ratio of a `width` x `height` image, or `None` if degenerate.
#[must_use]
pub fn usable_aspect(width: u32, height: u32) -> Option<f32> {
    let aspect = width as f32 / height as f32;
    (aspect.is_finite() && aspect > 0.01).then_some(aspect)
}

pub fn decode_texture(bytes: &[u8]) -> Result<Texture, TextureError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8().into())
}

async fn fetch_texture(client: Client, url: String) -> Result<Texture, TextureError> {
    let bytes = client.get(&url).send().await?.error_for_status()?.bytes().await?;
    let texture = tokio::task::spawn_blocking(move || decode_texture(&bytes)).await??;
    Ok(texture)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingProgress {
    pub ready: usize,
    pub total: usize,
}

impl LoadingProgress {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.ready >= self.total
    }
}

#[derive(Debug)]
enum Slot {
    Loading,
    Loaded(Texture),
    Failed,
}

/// Loads gallery thumbnails in the background, one task per photo.
///
/// Results are collected with [`TextureLoader::poll`] from the frame loop,
/// which never waits on the network.
#[derive(Debug)]
pub struct TextureLoader {
    client: Client,
    sender: UnboundedSender<(Uuid, Result<Texture, TextureError>)>,
    receiver: UnboundedReceiver<(Uuid, Result<Texture, TextureError>)>,
    slots: HashMap<Uuid, Slot>,
    ready: HashSet<Uuid>,
    placeholder: Texture,
}

impl TextureLoader {
    #[must_use]
    pub fn new(client: Client) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            client,
            sender,
            receiver,
            slots: HashMap::new(),
            ready: HashSet::new(),
            placeholder: Texture::placeholder(),
        }
    }

    /// Starts loading the thumbnail for `asset_url`. Repeated requests are ignored.
    ///
    /// Must be called from within a tokio runtime.
    pub fn request(&mut self, photo_id: Uuid, asset_url: &str) {
        if self.slots.contains_key(&photo_id) {
            return;
        }
        self.slots.insert(photo_id, Slot::Loading);

        let url = ImagePreset::GalleryThumbnail.apply(asset_url);
        let client = self.client.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = fetch_texture(client, url).await;
            // The loader may be gone by now; nothing to deliver to.
            let _ = sender.send((photo_id, result));
        });
    }

    /// Drops photos no longer shown. Their in-flight results are discarded.
    pub fn retain(&mut self, keep: &HashSet<Uuid>) {
        self.slots.retain(|id, _| keep.contains(id));
        self.ready.retain(|id| keep.contains(id));
    }

    /// Collects finished loads and returns the ids that became ready.
    pub fn poll(&mut self) -> Vec<Uuid> {
        let mut newly_ready = Vec::new();
        while let Ok((photo_id, result)) = self.receiver.try_recv() {
            let Some(slot) = self.slots.get_mut(&photo_id) else {
                continue;
            };
            *slot = match result {
                Ok(texture) => {
                    debug!("Loaded {}x{} thumbnail for {photo_id}", texture.width, texture.height);
                    Slot::Loaded(texture)
                }
                Err(err) => {
                    warn!("Failed to load thumbnail for {photo_id}: {err}");
                    Slot::Failed
                }
            };
            if self.ready.insert(photo_id) {
                newly_ready.push(photo_id);
            }
        }
        newly_ready
    }

    /// The loaded texture, or the placeholder while loading or after failure.
    #[must_use]
    pub fn texture(&self, photo_id: Uuid) -> &Texture {
        match self.slots.get(&photo_id) {
            Some(Slot::Loaded(texture)) => texture,
            _ => &self.placeholder,
        }
    }

    #[must_use]
    pub fn is_loaded(&self, photo_id: Uuid) -> bool {
        matches!(self.slots.get(&photo_id), Some(Slot::Loaded(_)))
    }

    #[must_use]
    pub fn is_failed(&self, photo_id: Uuid) -> bool {
        matches!(self.slots.get(&photo_id), Some(Slot::Failed))
    }

    /// Plane aspect for a photo: the measured one once loaded, else `default`.
    #[must_use]
    pub fn aspect(&self, photo_id: Uuid, default: f32) -> f32 {
        match self.slots.get(&photo_id) {
            Some(Slot::Loaded(texture)) => texture.aspect().unwrap_or(default),
            _ => default,
        }
    }

    #[must_use]
    pub fn progress(&self) -> LoadingProgress {
        LoadingProgress {
            ready: self.ready.len(),
            total: self.slots.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;
    use std::time::Duration;

    fn png(width: u32, height: u32) -> color_eyre::Result<Vec<u8>> {
        let image = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    async fn wait_until_ready(loader: &mut TextureLoader, count: usize) -> Vec<Uuid> {
        let mut ready = Vec::new();
        for _ in 0..500 {
            ready.extend(loader.poll());
            if ready.len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        ready
    }

    #[test]
    fn placeholder_is_neutral_grey() {
        let placeholder = Texture::placeholder();
        assert_eq!((placeholder.width, placeholder.height), (1, 1));
        assert_eq!(placeholder.rgba, vec![225, 225, 225, 255]);
    }

    #[test]
    fn degenerate_aspects_are_rejected() {
        assert_eq!(usable_aspect(300, 200), Some(1.5));
        assert_eq!(usable_aspect(0, 200), None);
        assert_eq!(usable_aspect(300, 0), None);
        assert_eq!(usable_aspect(1, 1000), None);
    }

    #[test]
    fn decodes_png() -> color_eyre::Result<()> {
        let texture = decode_texture(&png(4, 2)?)?;
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.rgba.len(), 4 * 2 * 4);
        assert_eq!(texture.aspect(), Some(2.0));
        Ok(())
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            decode_texture(b"definitely not an image"),
            Err(TextureError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn failure_still_counts_as_ready() {
        let mut loader = TextureLoader::new(Client::new());
        let id = Uuid::new_v4();
        loader.request(id, "http://127.0.0.1:1/broken.jpg");
        loader.request(id, "http://127.0.0.1:1/broken.jpg");
        assert_eq!(loader.progress(), LoadingProgress { ready: 0, total: 1 });

        let ready = wait_until_ready(&mut loader, 1).await;

        assert_eq!(ready, vec![id]);
        assert!(loader.progress().is_complete());
        assert!(loader.is_failed(id));
        assert_eq!(loader.texture(id), &Texture::placeholder());
        assert!((loader.aspect(id, 1.5) - 1.5).abs() < f32::EPSILON);
        assert!(loader.poll().is_empty());
    }

    #[tokio::test]
    async fn retained_set_drops_stale_results() {
        let mut loader = TextureLoader::new(Client::new());
        let (kept, dropped) = (Uuid::new_v4(), Uuid::new_v4());
        loader.request(kept, "http://127.0.0.1:1/a.jpg");
        loader.request(dropped, "http://127.0.0.1:1/b.jpg");
        loader.retain(&HashSet::from([kept]));

        let ready = wait_until_ready(&mut loader, 1).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let late = loader.poll();

        assert_eq!(ready, vec![kept]);
        assert!(late.is_empty());
        assert_eq!(loader.progress(), LoadingProgress { ready: 1, total: 1 });
    }
}
