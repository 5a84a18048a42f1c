use crate::api_client::{PhotoFile, SubmissionBackend};
use common_types::{NewSubmission, is_valid_email};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardPage {
    Name = 1,
    Place = 2,
    Story = 3,
    Photo = 4,
    Email = 5,
    ThankYou = 6,
}

impl WizardPage {
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_number(number: u8) -> Self {
        match number {
            0 | 1 => Self::Name,
            2 => Self::Place,
            3 => Self::Story,
            4 => Self::Photo,
            5 => Self::Email,
            _ => Self::ThankYou,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_number(self.number() + 1)
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1))
    }
}

/// Why the wizard refused to move on. The message is shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please fill in all fields")]
    MissingPlaceFields,

    #[error("Please share why this place matters to you")]
    MissingStory,

    #[error("Please upload a photo")]
    MissingPhoto,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{0}")]
    SubmitFailed(String),
}

/// Everything typed or picked so far. Lives only as long as the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub name: String,
    pub place_name: String,
    pub city: String,
    pub country: String,
    pub why_special: String,
    pub photo: Option<PhotoFile>,
    pub email: String,
}

impl SubmissionDraft {
    fn to_submission(&self, photo_url: String) -> NewSubmission {
        let name = self.name.trim();
        NewSubmission {
            place_name: self.place_name.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            name: (!name.is_empty()).then(|| name.to_string()),
            why_special: Some(self.why_special.clone()),
            photo_url,
        }
    }
}

/// Result of pressing "next".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Validation or submission failed; see [`SubmissionWizard::error`].
    Stayed,
    Advanced(WizardPage),
    /// The submission was stored; the gallery should refetch.
    Submitted { id: Uuid },
}

/// Six-screen flow for submitting a place.
pub struct SubmissionWizard<B: SubmissionBackend> {
    backend: Arc<B>,
    page: WizardPage,
    pub draft: SubmissionDraft,
    error: Option<WizardError>,
    uploading: bool,
    submission_id: Option<Uuid>,
}

impl<B: SubmissionBackend> SubmissionWizard<B> {
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            page: WizardPage::Name,
            draft: SubmissionDraft::default(),
            error: None,
            uploading: false,
            submission_id: None,
        }
    }

    #[must_use]
    pub const fn page(&self) -> WizardPage {
        self.page
    }

    #[must_use]
    pub const fn error(&self) -> Option<&WizardError> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub const fn submission_id(&self) -> Option<Uuid> {
        self.submission_id
    }

    /// "n/4" on the pages that count towards the submission.
    #[must_use]
    pub fn page_indicator(&self) -> Option<String> {
        (self.page <= WizardPage::Photo).then(|| format!("{}/4", self.page.number()))
    }

    pub fn select_photo(&mut self, photo: PhotoFile) {
        self.draft.photo = Some(photo);
        self.error = None;
    }

    /// Steps back a page. Once the submission is stored the flow only moves forward.
    pub fn back(&mut self) {
        if self.submission_id.is_some() {
            return;
        }
        self.page = self.page.previous();
    }

    /// Validates the current page and moves on, submitting on the photo page.
    pub async fn next(&mut self) -> StepOutcome {
        let result = match self.page {
            WizardPage::Name | WizardPage::ThankYou => Ok(None),
            WizardPage::Place => self.check_place().map(|()| None),
            WizardPage::Story => self.check_story().map(|()| None),
            WizardPage::Photo => self.submit().await.map(Some),
            WizardPage::Email => self.save_email().await.map(|()| None),
        };

        match result {
            Ok(submitted) => {
                self.error = None;
                self.page = self.page.next();
                match submitted {
                    Some(id) => StepOutcome::Submitted { id },
                    None => StepOutcome::Advanced(self.page),
                }
            }
            Err(err) => {
                self.error = Some(err);
                StepOutcome::Stayed
            }
        }
    }

    fn check_place(&self) -> Result<(), WizardError> {
        let draft = &self.draft;
        if [&draft.place_name, &draft.city, &draft.country]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(WizardError::MissingPlaceFields);
        }
        Ok(())
    }

    fn check_story(&self) -> Result<(), WizardError> {
        if self.draft.why_special.trim().is_empty() {
            return Err(WizardError::MissingStory);
        }
        Ok(())
    }

    /// Upload, then insert without email. A failed insert leaves the
    /// uploaded object behind.
    async fn submit(&mut self) -> Result<Uuid, WizardError> {
        let Some(photo) = self.draft.photo.clone() else {
            return Err(WizardError::MissingPhoto);
        };

        self.uploading = true;
        self.error = None;
        let result = self.upload_and_insert(&photo).await;
        self.uploading = false;

        let id = result.map_err(|message| {
            error!("Submission error: {message}");
            WizardError::SubmitFailed(message)
        })?;
        info!("Submission {id} stored");
        self.submission_id = Some(id);
        Ok(id)
    }

    async fn upload_and_insert(&self, photo: &PhotoFile) -> Result<Uuid, String> {
        let photo_url = self
            .backend
            .upload_photo(photo)
            .await
            .map_err(|e| e.to_string())?;
        let submission = self.draft.to_submission(photo_url);
        self.backend
            .insert_submission(&submission)
            .await
            .map_err(|e| e.to_string())
    }

    /// Optional email. Invalid input blocks; a failed save does not.
    async fn save_email(&self) -> Result<(), WizardError> {
        let email = self.draft.email.trim();
        if email.is_empty() {
            return Ok(());
        }
        if !is_valid_email(email) {
            return Err(WizardError::InvalidEmail);
        }

        let Some(id) = self.submission_id else {
            warn!("Skipping email update: no submission id");
            return Ok(());
        };
        if let Err(err) = self.backend.attach_email(id, email).await {
            error!("Failed to update email: {err}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::ClientError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        fail_upload: bool,
        fail_insert: bool,
        fail_email: bool,
        inserted: Mutex<Vec<NewSubmission>>,
        emails: Mutex<Vec<(Uuid, String)>>,
        id: Uuid,
    }

    fn remote_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "Failed to save submission".to_string(),
        }
    }

    #[async_trait]
    impl SubmissionBackend for FakeBackend {
        async fn upload_photo(&self, photo: &PhotoFile) -> Result<String, ClientError> {
            if self.fail_upload {
                return Err(ClientError::Upload(403));
            }
            Ok(format!("https://assets.example.com/gallery/{}", photo.file_name))
        }

        async fn insert_submission(&self, submission: &NewSubmission) -> Result<Uuid, ClientError> {
            if self.fail_insert {
                return Err(remote_error());
            }
            if let Ok(mut inserted) = self.inserted.lock() {
                inserted.push(submission.clone());
            }
            Ok(self.id)
        }

        async fn attach_email(&self, submission_id: Uuid, email: &str) -> Result<(), ClientError> {
            if self.fail_email {
                return Err(remote_error());
            }
            if let Ok(mut emails) = self.emails.lock() {
                emails.push((submission_id, email.to_string()));
            }
            Ok(())
        }
    }

    fn backend() -> FakeBackend {
        FakeBackend {
            id: Uuid::new_v4(),
            ..FakeBackend::default()
        }
    }

    fn filled(backend: FakeBackend) -> SubmissionWizard<FakeBackend> {
        let mut wizard = SubmissionWizard::new(Arc::new(backend));
        wizard.draft = SubmissionDraft {
            name: String::new(),
            place_name: "Blue Bottle".to_string(),
            city: "Kyoto".to_string(),
            country: "Japan".to_string(),
            why_special: "Rainy mornings".to_string(),
            photo: Some(PhotoFile {
                file_name: "cafe.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![1, 2, 3],
            }),
            email: String::new(),
        };
        wizard
    }

    async fn advance_to(wizard: &mut SubmissionWizard<FakeBackend>, page: WizardPage) {
        while wizard.page() < page {
            assert_ne!(wizard.next().await, StepOutcome::Stayed);
        }
    }

    #[tokio::test]
    async fn happy_path_submits_and_saves_email() {
        let backend = backend();
        let id = backend.id;
        let mut wizard = filled(backend);
        wizard.draft.email = "someone@example.com".to_string();

        assert_eq!(wizard.page_indicator().as_deref(), Some("1/4"));
        advance_to(&mut wizard, WizardPage::Photo).await;
        assert_eq!(wizard.page_indicator().as_deref(), Some("4/4"));

        assert_eq!(wizard.next().await, StepOutcome::Submitted { id });
        assert_eq!(wizard.page(), WizardPage::Email);
        assert!(!wizard.is_uploading());
        assert_eq!(wizard.page_indicator(), None);

        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::ThankYou));
        let inserted = wizard.backend.inserted.lock().map(|i| i.clone()).unwrap_or_default();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].name, None);
        assert_eq!(inserted[0].photo_url, "https://assets.example.com/gallery/cafe.jpg");
        let emails = wizard.backend.emails.lock().map(|e| e.clone()).unwrap_or_default();
        assert_eq!(emails, vec![(id, "someone@example.com".to_string())]);
    }

    #[tokio::test]
    async fn place_page_requires_all_fields() {
        let mut wizard = filled(backend());
        wizard.draft.city = "  ".to_string();
        advance_to(&mut wizard, WizardPage::Place).await;

        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        assert_eq!(wizard.page(), WizardPage::Place);
        assert_eq!(
            wizard.error().map(ToString::to_string).as_deref(),
            Some("Please fill in all fields")
        );

        wizard.draft.city = "Kyoto".to_string();
        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::Story));
        assert_eq!(wizard.error(), None);
    }

    #[tokio::test]
    async fn story_is_required() {
        let mut wizard = filled(backend());
        wizard.draft.why_special = String::new();
        advance_to(&mut wizard, WizardPage::Story).await;
        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        assert_eq!(wizard.error(), Some(&WizardError::MissingStory));
    }

    #[tokio::test]
    async fn photo_is_required() {
        let mut wizard = filled(backend());
        wizard.draft.photo = None;
        advance_to(&mut wizard, WizardPage::Photo).await;
        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        assert_eq!(wizard.error(), Some(&WizardError::MissingPhoto));
    }

    #[tokio::test]
    async fn failed_insert_stays_on_photo_page() {
        let mut wizard = filled(FakeBackend {
            fail_insert: true,
            ..backend()
        });
        advance_to(&mut wizard, WizardPage::Photo).await;

        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        assert_eq!(wizard.page(), WizardPage::Photo);
        assert_eq!(wizard.submission_id(), None);
        assert!(!wizard.is_uploading());
        assert_eq!(
            wizard.error(),
            Some(&WizardError::SubmitFailed("Failed to save submission".to_string()))
        );
    }

    #[tokio::test]
    async fn failed_upload_never_inserts() {
        let mut wizard = filled(FakeBackend {
            fail_upload: true,
            ..backend()
        });
        advance_to(&mut wizard, WizardPage::Photo).await;
        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        let inserted = wizard.backend.inserted.lock().map(|i| i.len()).unwrap_or_default();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn invalid_email_blocks_but_empty_skips() {
        let mut wizard = filled(backend());
        advance_to(&mut wizard, WizardPage::Email).await;

        wizard.draft.email = "not-an-email".to_string();
        assert_eq!(wizard.next().await, StepOutcome::Stayed);
        assert_eq!(wizard.error(), Some(&WizardError::InvalidEmail));

        wizard.draft.email = String::new();
        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::ThankYou));
        let emails = wizard.backend.emails.lock().map(|e| e.len()).unwrap_or_default();
        assert_eq!(emails, 0);
    }

    #[tokio::test]
    async fn email_failure_does_not_block() {
        let mut wizard = filled(FakeBackend {
            fail_email: true,
            ..backend()
        });
        advance_to(&mut wizard, WizardPage::Email).await;
        wizard.draft.email = "a@b.co".to_string();
        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::ThankYou));
    }

    #[tokio::test]
    async fn navigation_is_clamped() {
        let mut wizard = filled(backend());
        wizard.back();
        assert_eq!(wizard.page(), WizardPage::Name);

        advance_to(&mut wizard, WizardPage::Story).await;
        wizard.back();
        assert_eq!(wizard.page(), WizardPage::Place);

        advance_to(&mut wizard, WizardPage::ThankYou).await;
        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::ThankYou));
        wizard.back();
        assert_eq!(wizard.page(), WizardPage::ThankYou);
    }

    #[tokio::test]
    async fn stored_submission_cannot_be_resubmitted() {
        let mut wizard = filled(backend());
        advance_to(&mut wizard, WizardPage::Email).await;

        wizard.back();
        assert_eq!(wizard.page(), WizardPage::Email);

        assert_eq!(wizard.next().await, StepOutcome::Advanced(WizardPage::ThankYou));
        let inserted = wizard.backend.inserted.lock().map(|i| i.len()).unwrap_or_default();
        assert_eq!(inserted, 1);
    }
}
