#![allow(clippy::missing_errors_doc)]
//! Client-side state for the places gallery: the typed API client, the
//! submission wizard, the lightbox and the page shell tying them together.

pub mod api_client;
pub mod lightbox;
pub mod page;
pub mod wizard;

pub use api_client::{ApiClient, ClientError, GalleryApi, PhotoFile, SubmissionBackend};
pub use lightbox::{Lightbox, LightboxStages};
pub use page::{FilterResponse, FilterTicket, GalleryPage};
pub use wizard::{StepOutcome, SubmissionDraft, SubmissionWizard, WizardError, WizardPage};
