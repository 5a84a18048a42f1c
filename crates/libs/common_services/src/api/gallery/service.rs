use crate::api::gallery::error::GalleryError;
use crate::database::stores::PlaceSubmissionStore;
use app_state::GallerySettings;
use common_types::{GalleryPhotosResponse, GalleryStats, PlaceSubmission, Photo};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Photos for the gallery.
///
/// With a city filter: the newest approved photos of that city. Without:
/// the curated featured set topped up with the newest other photos.
#[instrument(skip(pool, settings))]
pub async fn gallery_photos(
    pool: &PgPool,
    settings: &GallerySettings,
    city: Option<&str>,
) -> Result<GalleryPhotosResponse, GalleryError> {
    if let Some(city) = city {
        let rows = PlaceSubmissionStore::find_by_city(pool, city, settings.city_limit).await?;
        debug!("Found {} photos for city {city}", rows.len());
        return Ok(city_response(rows));
    }

    let featured = PlaceSubmissionStore::find_featured(pool, settings.target_featured).await?;
    let featured_ids: Vec<_> = featured.iter().map(|p| p.id).collect();
    let remaining = settings.target_total - featured.len() as i64;
    let latest =
        PlaceSubmissionStore::find_latest_excluding(pool, &featured_ids, remaining).await?;

    Ok(merge_featured_and_latest(
        featured,
        latest,
        settings.target_total.max(0) as usize,
    ))
}

/// A city-filtered set has no featured part; everything counts as latest.
#[must_use]
pub fn city_response(rows: Vec<PlaceSubmission>) -> GalleryPhotosResponse {
    let photos: Vec<Photo> = rows.into_iter().map(Photo::from).collect();
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

/// Featured photos first, then the latest ones that are not already featured,
/// never more than `target_total` together.
#[must_use]
pub fn merge_featured_and_latest(
    featured: Vec<PlaceSubmission>,
    latest: Vec<PlaceSubmission>,
    target_total: usize,
) -> GalleryPhotosResponse {
    let mut seen = HashSet::new();
    let featured: Vec<_> = featured
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .take(target_total)
        .collect();
    let latest: Vec<_> = latest
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .take(target_total - featured.len())
        .collect();

    let stats = GalleryStats {
        total: featured.len() + latest.len(),
        featured: featured.len(),
        latest: latest.len(),
    };
    let photos = featured
        .into_iter()
        .chain(latest)
        .map(Photo::from)
        .collect();

    GalleryPhotosResponse { photos, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common_types::SubmissionStatus;
    use uuid::Uuid;

    fn row(minutes_ago: i64, featured: bool) -> PlaceSubmission {
        PlaceSubmission {
            id: Uuid::new_v4(),
            place_name: format!("Place {minutes_ago}"),
            city: "Seoul".to_string(),
            country: "South Korea".to_string(),
            name: None,
            why_special: None,
            photo_url: format!("https://assets.example.com/gallery/{minutes_ago}.jpg"),
            email: None,
            is_featured: featured,
            status: SubmissionStatus::Approved,
            submitted_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn fills_up_to_target_total() {
        let featured: Vec<_> = (0..10).map(|i| row(i, true)).collect();
        let latest: Vec<_> = (10..40).map(|i| row(i, false)).collect();

        let response = merge_featured_and_latest(featured, latest, 20);

        assert_eq!(response.stats.featured, 10);
        assert_eq!(response.stats.latest, 10);
        assert_eq!(response.stats.total, 20);
        assert_eq!(response.photos.len(), 20);
        assert!(response.photos[..10].iter().all(|p| p.is_featured));
    }

    #[test]
    fn latest_never_repeats_a_featured_id() {
        let featured: Vec<_> = (0..4).map(|i| row(i, true)).collect();
        // The latest query raced with curation and returned featured rows too.
        let mut latest = featured.clone();
        latest.extend((4..30).map(|i| row(i, false)));

        let response = merge_featured_and_latest(featured.clone(), latest, 20);

        let featured_ids: HashSet<_> = featured.iter().map(|p| p.id).collect();
        let latest_part = &response.photos[response.stats.featured..];
        assert!(latest_part.iter().all(|p| !featured_ids.contains(&p.id)));
        assert_eq!(response.stats.featured, 4);
        assert_eq!(response.stats.latest, 16);
    }

    #[test]
    fn never_exceeds_target_for_any_mix() {
        for n_featured in 0..25 {
            for n_latest in [0, 3, 19, 40] {
                let featured: Vec<_> = (0..n_featured).map(|i| row(i, true)).collect();
                let latest: Vec<_> = (0..n_latest).map(|i| row(100 + i, false)).collect();
                let response = merge_featured_and_latest(featured, latest, 20);
                assert!(response.stats.featured + response.stats.latest <= 20);
                assert_eq!(response.stats.total, response.photos.len());
            }
        }
    }

    #[test]
    fn small_database_returns_everything() {
        let response = merge_featured_and_latest(vec![row(1, true)], vec![row(2, false)], 20);
        assert_eq!(response.stats, GalleryStats { total: 2, featured: 1, latest: 1 });
    }

    #[test]
    fn city_sets_count_as_latest() {
        let response = city_response(vec![row(1, true), row(2, false)]);
        assert_eq!(response.stats, GalleryStats { total: 2, featured: 0, latest: 2 });
    }
}
