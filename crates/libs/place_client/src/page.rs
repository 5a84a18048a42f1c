use crate::api_client::{ClientError, GalleryApi};
use crate::lightbox::Lightbox;
use crate::wizard::StepOutcome;
use common_types::{Photo, ScreenPosition};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Active-frame updates smaller than this (summed over all fields) are ignored.
pub const ACTIVE_FRAME_EPSILON: f32 = 0.5;

/// Identifies one city-filter request. Only the newest ticket may commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTicket {
    pub generation: u64,
    pub city: String,
}

#[derive(Debug)]
pub struct FilterResponse {
    pub ticket: FilterTicket,
    pub result: Result<Vec<Photo>, ClientError>,
}

/// The gallery page: default photo set, info drawer with cities, city
/// filter, lightbox and the frame it is anchored to.
pub struct GalleryPage<A: GalleryApi> {
    api: Arc<A>,
    viewport: (f32, f32),

    photos: Vec<Photo>,
    loading: bool,

    info_open: bool,
    cities: Vec<String>,
    cities_loading: bool,
    cities_fetched: bool,
    cities_error: Option<String>,

    filter_city: Option<String>,
    filter_generation: u64,
    filtered_photos: Option<Vec<Photo>>,
    filtered_loading: bool,
    filtered_error: Option<String>,

    lightbox: Option<Lightbox>,
    active_frame: Option<ScreenPosition>,
}

impl<A: GalleryApi + 'static> GalleryPage<A> {
    #[must_use]
    pub fn new(api: Arc<A>, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            api,
            viewport: (viewport_width, viewport_height),
            photos: Vec::new(),
            loading: false,
            info_open: false,
            cities: Vec::new(),
            cities_loading: false,
            cities_fetched: false,
            cities_error: None,
            filter_city: None,
            filter_generation: 0,
            filtered_photos: None,
            filtered_loading: false,
            filtered_error: None,
            lightbox: None,
            active_frame: None,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    //================================================================================
    // Default photo set
    //================================================================================

    pub async fn mount(&mut self) {
        self.refresh_photos().await;
    }

    /// Refetches the default set. An empty answer keeps what is shown.
    pub async fn refresh_photos(&mut self) {
        self.loading = true;
        match self.api.gallery_photos(None).await {
            Ok(response) if !response.photos.is_empty() => {
                info!("Loaded {} gallery photos", response.photos.len());
                self.photos = response.photos;
            }
            Ok(_) => warn!("No photos returned from API"),
            Err(err) => error!("Error fetching gallery photos: {err}"),
        }
        self.loading = false;
    }

    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// What the gallery should render right now.
    #[must_use]
    pub fn displayed_photos(&self) -> &[Photo] {
        if self.filter_city.is_some() {
            self.filtered_photos.as_deref().unwrap_or_default()
        } else {
            &self.photos
        }
    }

    /// Refetches after a successful submission.
    pub async fn on_submission(&mut self, outcome: &StepOutcome) {
        if let StepOutcome::Submitted { id } = outcome {
            debug!("Submission {id} stored, refreshing gallery");
            self.refresh_photos().await;
        }
    }

    //================================================================================
    // Info drawer and cities
    //================================================================================

    /// Opens the info drawer, fetching cities the first time.
    pub async fn open_info(&mut self) {
        self.info_open = true;
        self.load_cities_if_needed().await;
    }

    pub fn close_info(&mut self) {
        self.info_open = false;
    }

    #[must_use]
    pub const fn is_info_open(&self) -> bool {
        self.info_open
    }

    pub async fn retry_cities(&mut self) {
        self.cities_error = None;
        self.cities_fetched = false;
        self.load_cities_if_needed().await;
    }

    async fn load_cities_if_needed(&mut self) {
        if !self.info_open || self.cities_fetched || self.cities_loading || self.cities_error.is_some()
        {
            return;
        }

        self.cities_loading = true;
        match self.api.cities().await {
            Ok(cities) => {
                self.cities = cities;
                self.cities_fetched = true;
            }
            Err(err) => {
                warn!("Failed to fetch cities: {err}");
                self.cities_error = Some(err.to_string());
            }
        }
        self.cities_loading = false;
    }

    #[must_use]
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    #[must_use]
    pub fn cities_error(&self) -> Option<&str> {
        self.cities_error.as_deref()
    }

    //================================================================================
    // City filter
    //================================================================================

    /// Switches to one city and returns the ticket for its fetch.
    /// A blank city clears the filter instead.
    pub fn select_city(&mut self, city: &str) -> Option<FilterTicket> {
        let city = city.trim();
        self.close_info();
        if city.is_empty() {
            self.clear_filter();
            return None;
        }
        self.filter_city = Some(city.to_string());
        Some(self.issue_ticket())
    }

    /// Fetches again for the current city, if any.
    pub fn retry_filter(&mut self) -> Option<FilterTicket> {
        self.filter_city.is_some().then(|| self.issue_ticket())
    }

    pub fn clear_filter(&mut self) {
        self.filter_city = None;
        self.filter_generation += 1;
        self.filtered_photos = None;
        self.filtered_loading = false;
        self.filtered_error = None;
    }

    fn issue_ticket(&mut self) -> FilterTicket {
        self.filter_generation += 1;
        self.filtered_photos = None;
        self.filtered_loading = true;
        self.filtered_error = None;
        FilterTicket {
            generation: self.filter_generation,
            city: self.filter_city.clone().unwrap_or_default(),
        }
    }

    /// The fetch for `ticket`. It does not borrow the page, so several may
    /// be in flight while the user keeps clicking.
    pub fn load_filter(&self, ticket: FilterTicket) -> impl Future<Output = FilterResponse> + Send + 'static {
        let api = Arc::clone(&self.api);
        async move {
            let result = api
                .gallery_photos(Some(&ticket.city))
                .await
                .map(|response| response.photos);
            FilterResponse { ticket, result }
        }
    }

    /// Applies a finished fetch. Returns false if a newer ticket superseded it.
    pub fn commit_filter(&mut self, response: FilterResponse) -> bool {
        if response.ticket.generation != self.filter_generation {
            debug!("Discarding stale results for {}", response.ticket.city);
            return false;
        }
        match response.result {
            Ok(photos) => self.filtered_photos = Some(photos),
            Err(err) => {
                warn!("Failed to fetch photos for {}: {err}", response.ticket.city);
                self.filtered_error = Some(err.to_string());
            }
        }
        self.filtered_loading = false;
        true
    }

    pub async fn select_city_and_load(&mut self, city: &str) {
        if let Some(ticket) = self.select_city(city) {
            let response = self.load_filter(ticket).await;
            self.commit_filter(response);
        }
    }

    #[must_use]
    pub fn filter_city(&self) -> Option<&str> {
        self.filter_city.as_deref()
    }

    #[must_use]
    pub const fn is_filter_loading(&self) -> bool {
        self.filtered_loading
    }

    #[must_use]
    pub fn filter_error(&self) -> Option<&str> {
        self.filtered_error.as_deref()
    }

    //================================================================================
    // Lightbox
    //================================================================================

    /// Where a photo is assumed to be when the gallery could not report it.
    #[must_use]
    pub fn fallback_screen_position(&self) -> ScreenPosition {
        let (width, height) = self.viewport;
        let frame_width = width * 0.2;
        ScreenPosition {
            x: width / 2.0,
            y: height / 2.0,
            width: frame_width,
            height: frame_width / 1.5,
            rotation: 0.0,
        }
    }

    pub fn open_photo(&mut self, photo: Photo, screen_position: Option<ScreenPosition>) {
        let anchor = screen_position.unwrap_or_else(|| self.fallback_screen_position());
        self.active_frame = Some(anchor);
        self.lightbox = Some(Lightbox::open(photo, anchor));
    }

    /// Tracks the open photo's frame. Returns whether the anchor moved.
    pub fn on_active_frame(&mut self, position: ScreenPosition) -> bool {
        if self
            .active_frame
            .is_some_and(|current| current.delta(&position) < ACTIVE_FRAME_EPSILON)
        {
            return false;
        }
        self.active_frame = Some(position);
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.set_anchor(position);
        }
        true
    }

    #[must_use]
    pub const fn active_frame(&self) -> Option<ScreenPosition> {
        self.active_frame
    }

    #[must_use]
    pub const fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn close_lightbox(&mut self, now: Instant) {
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.close(now);
        }
    }

    pub fn handle_key(&mut self, key: &str, now: Instant) {
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.handle_key(key, now);
        }
    }

    /// Per-frame upkeep: drives the lightbox and drops it once closed.
    pub fn tick(&mut self, now: Instant) {
        let Some(lightbox) = self.lightbox.as_mut() else {
            return;
        };
        lightbox.on_frame(now);
        if lightbox.is_closed(now) {
            self.lightbox = None;
            self.active_frame = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use common_types::{GalleryPhotosResponse, GalleryStats};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use uuid::Uuid;

    fn photo(city: &str) -> Photo {
        Photo {
            id: Uuid::new_v4(),
            url: format!("https://assets.example.com/gallery/{city}.jpg"),
            place_name: "Corner".to_string(),
            city: city.to_string(),
            country: "Somewhere".to_string(),
            description: format!("Corner in {city}, Somewhere"),
            why_special: None,
            author_name: None,
            is_featured: false,
            submitted_at: Utc::now(),
        }
    }

    fn response(photos: Vec<Photo>) -> GalleryPhotosResponse {
        let total = photos.len();
        GalleryPhotosResponse {
            photos,
            stats: GalleryStats {
                total,
                featured: 0,
                latest: total,
            },
        }
    }

    #[derive(Default)]
    struct FakeApi {
        default_photos: Mutex<Vec<Photo>>,
        by_city: HashMap<String, Vec<Photo>>,
        fail_photos: bool,
        fail_cities: Mutex<bool>,
        city_calls: AtomicUsize,
    }

    fn remote(message: &str) -> ClientError {
        ClientError::Api {
            status: 500,
            message: message.to_string(),
        }
    }

    #[async_trait]
    impl GalleryApi for FakeApi {
        async fn gallery_photos(&self, city: Option<&str>) -> Result<GalleryPhotosResponse, ClientError> {
            if self.fail_photos {
                return Err(remote("Failed to fetch gallery photos"));
            }
            let photos = match city {
                Some(city) => self.by_city.get(city).cloned().unwrap_or_default(),
                None => self.default_photos.lock().map(|p| p.clone()).unwrap_or_default(),
            };
            Ok(response(photos))
        }

        async fn cities(&self) -> Result<Vec<String>, ClientError> {
            self.city_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_cities.lock().map(|f| *f).unwrap_or_default() {
                return Err(remote("Failed to fetch cities"));
            }
            Ok(vec!["Lisbon".to_string(), "Seoul".to_string()])
        }
    }

    fn api_with(default_photos: Vec<Photo>) -> FakeApi {
        let by_city = HashMap::from([
            ("Lisbon".to_string(), vec![photo("Lisbon")]),
            ("Seoul".to_string(), vec![photo("Seoul"), photo("Seoul")]),
        ]);
        FakeApi {
            default_photos: Mutex::new(default_photos),
            by_city,
            ..FakeApi::default()
        }
    }

    fn page(api: FakeApi) -> GalleryPage<FakeApi> {
        GalleryPage::new(Arc::new(api), 1000.0, 800.0)
    }

    #[tokio::test]
    async fn mount_loads_default_set() {
        let mut page = page(api_with(vec![photo("Paris"), photo("Rome")]));
        page.mount().await;
        assert_eq!(page.displayed_photos().len(), 2);
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn empty_refetch_keeps_existing_photos() {
        let mut page = page(api_with(vec![photo("Paris")]));
        page.mount().await;
        if let Ok(mut photos) = page.api.default_photos.lock() {
            photos.clear();
        }
        page.refresh_photos().await;
        assert_eq!(page.photos().len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_page_usable() {
        let mut page = page(FakeApi {
            fail_photos: true,
            ..FakeApi::default()
        });
        page.mount().await;
        assert!(page.displayed_photos().is_empty());
        assert!(!page.is_loading());
    }

    #[tokio::test]
    async fn cities_fetched_once() {
        let mut page = page(api_with(Vec::new()));
        page.open_info().await;
        page.close_info();
        page.open_info().await;
        assert_eq!(page.cities(), ["Lisbon".to_string(), "Seoul".to_string()]);
        assert_eq!(page.api.city_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cities_error_waits_for_manual_retry() {
        let api = api_with(Vec::new());
        if let Ok(mut fail) = api.fail_cities.lock() {
            *fail = true;
        }
        let mut page = page(api);
        page.open_info().await;
        assert_eq!(page.cities_error(), Some("Failed to fetch cities"));

        page.close_info();
        page.open_info().await;
        assert_eq!(page.api.city_calls.load(Ordering::SeqCst), 1);

        if let Ok(mut fail) = page.api.fail_cities.lock() {
            *fail = false;
        }
        page.retry_cities().await;
        assert_eq!(page.cities_error(), None);
        assert_eq!(page.cities().len(), 2);
    }

    #[tokio::test]
    async fn selecting_a_city_filters_and_closes_info() {
        let mut page = page(api_with(vec![photo("Paris")]));
        page.mount().await;
        page.open_info().await;

        page.select_city_and_load("  Seoul ").await;

        assert!(!page.is_info_open());
        assert_eq!(page.filter_city(), Some("Seoul"));
        assert_eq!(page.displayed_photos().len(), 2);
        assert!(!page.is_filter_loading());

        page.clear_filter();
        assert_eq!(page.displayed_photos().len(), 1);
    }

    #[tokio::test]
    async fn stale_filter_results_are_discarded() {
        let mut page = page(api_with(Vec::new()));
        let lisbon = page.select_city("Lisbon");
        let seoul = page.select_city("Seoul");
        let (Some(lisbon), Some(seoul)) = (lisbon, seoul) else {
            panic!("tickets expected");
        };

        let slow = page.load_filter(lisbon);
        let fast = page.load_filter(seoul);
        let (slow, fast) = (slow.await, fast.await);

        assert!(page.commit_filter(fast));
        assert!(!page.commit_filter(slow));
        assert_eq!(page.displayed_photos().len(), 2);
        assert!(page.displayed_photos().iter().all(|p| p.city == "Seoul"));
    }

    #[tokio::test]
    async fn results_after_clear_are_discarded() {
        let mut page = page(api_with(vec![photo("Paris")]));
        page.mount().await;
        let ticket = page.select_city("Lisbon");
        page.clear_filter();

        if let Some(ticket) = ticket {
            let response = page.load_filter(ticket).await;
            assert!(!page.commit_filter(response));
        }
        assert_eq!(page.filter_city(), None);
        assert_eq!(page.displayed_photos().len(), 1);
    }

    #[tokio::test]
    async fn filter_error_and_retry() {
        let mut page = page(FakeApi {
            fail_photos: true,
            ..FakeApi::default()
        });
        page.select_city_and_load("Lisbon").await;
        assert_eq!(page.filter_error(), Some("Failed to fetch gallery photos"));
        assert!(page.displayed_photos().is_empty());

        let retry = page.retry_filter();
        assert_eq!(retry.map(|t| t.city), Some("Lisbon".to_string()));
        assert_eq!(page.filter_error(), None);
        assert!(page.is_filter_loading());
    }

    #[test]
    fn blank_city_clears() {
        let mut page = page(api_with(Vec::new()));
        page.filter_city = Some("Lisbon".to_string());
        assert_eq!(page.select_city("   "), None);
        assert_eq!(page.filter_city(), None);
        assert_eq!(page.retry_filter(), None);
    }

    #[test]
    fn click_without_position_uses_fallback() {
        let mut page = page(api_with(Vec::new()));
        page.open_photo(photo("Paris"), None);
        let anchor = page.active_frame();
        assert_eq!(
            anchor,
            Some(ScreenPosition {
                x: 500.0,
                y: 400.0,
                width: 200.0,
                height: 200.0 / 1.5,
                rotation: 0.0,
            })
        );
        assert_eq!(page.lightbox().map(Lightbox::anchor), anchor);
    }

    #[test]
    fn tiny_frame_moves_are_ignored() {
        let mut page = page(api_with(Vec::new()));
        let start = ScreenPosition {
            x: 100.0,
            y: 100.0,
            width: 300.0,
            height: 200.0,
            rotation: 0.0,
        };
        page.open_photo(photo("Paris"), Some(start));

        let nudge = ScreenPosition { x: 100.2, y: 100.2, ..start };
        assert!(!page.on_active_frame(nudge));
        assert_eq!(page.active_frame(), Some(start));

        let moved = ScreenPosition { x: 101.0, ..start };
        assert!(page.on_active_frame(moved));
        assert_eq!(page.lightbox().map(Lightbox::anchor), Some(moved));
    }

    #[test]
    fn lightbox_closes_after_animation() {
        let start = Instant::now();
        let mut page = page(api_with(Vec::new()));
        page.open_photo(photo("Paris"), None);
        page.tick(start);

        page.handle_key("Escape", start);
        page.tick(start + Duration::from_millis(700));
        assert!(page.lightbox().is_some());

        page.tick(start + Duration::from_millis(800));
        assert!(page.lightbox().is_none());
        assert_eq!(page.active_frame(), None);
    }

    #[tokio::test]
    async fn submission_refreshes_gallery() {
        let mut page = page(api_with(vec![photo("Paris")]));
        page.mount().await;
        if let Ok(mut photos) = page.api.default_photos.lock() {
            photos.push(photo("Kyoto"));
        }

        page.on_submission(&StepOutcome::Advanced(crate::wizard::WizardPage::Story)).await;
        assert_eq!(page.photos().len(), 1);

        page.on_submission(&StepOutcome::Submitted { id: Uuid::new_v4() }).await;
        assert_eq!(page.photos().len(), 2);
    }
}
