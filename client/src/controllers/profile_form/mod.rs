//! Business profile editor
//!
//! Handles the create/edit duality of a single business profile:
//! - Loading the current profile, or starting empty in create mode
//! - Saving through `POST` (create) or `PUT` (update)
//! - Holding logo/cover selections until the profile exists, then flushing them
//! - Gallery, verification and premium checkout actions (see submodules)

mod gallery;
mod premium;

use std::collections::BTreeMap;

use shared::{
    validate_business_name, BusinessProfile, GalleryImage, GalleryVideo, LocalImage, MediaRef,
    MediaSlot, PremiumStatus, ProfilePayload, SocialPlatform, VerificationStatus, MAX_CATEGORIES,
};
use validator::Validate;

use super::{Feedback, Navigation};
use crate::error::{ClientError, ClientResult};
use crate::external::MarketplaceApi;
use crate::session::Session;
use crate::share::ShareLink;

pub use premium::CheckoutOutcome;

/// Whether the form edits an existing profile or creates one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Loading,
    Create,
    Edit,
}

/// Editable fields held in memory between saves
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub business_name: String,
    pub description: String,
    categories: Vec<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    social_links: BTreeMap<SocialPlatform, String>,
}

impl ProfileDraft {
    fn from_profile(profile: &BusinessProfile) -> Self {
        Self {
            business_name: profile.business_name.clone(),
            description: profile.description.clone().unwrap_or_default(),
            categories: profile.categories.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            email: profile.email.clone().unwrap_or_default(),
            address: profile.address.clone().unwrap_or_default(),
            city: profile.city.clone().unwrap_or_default(),
            country: profile.country.clone().unwrap_or_default(),
            social_links: profile.social_links.clone(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn social_links(&self) -> &BTreeMap<SocialPlatform, String> {
        &self.social_links
    }

    /// Request body; blank optional fields are omitted
    pub fn to_payload(&self) -> ProfilePayload {
        ProfilePayload {
            business_name: self.business_name.trim().to_string(),
            description: non_blank(&self.description),
            categories: self.categories.clone(),
            phone: non_blank(&self.phone),
            email: non_blank(&self.email),
            address: non_blank(&self.address),
            city: non_blank(&self.city),
            country: non_blank(&self.country),
            social_links: self
                .social_links
                .iter()
                .filter(|(_, url)| !url.trim().is_empty())
                .map(|(platform, url)| (*platform, url.trim().to_string()))
                .collect(),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub profile_id: i64,
    /// The save created the profile
    pub created: bool,
    pub share: ShareLink,
    /// Pending media that could not be uploaded after creation
    pub failed_uploads: Vec<MediaSlot>,
}

/// Result of a logo or cover selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Held locally until the profile is created
    Deferred,
    Uploaded(String),
}

/// Controller for the business profile editor
pub struct ProfileFormController<A> {
    api: A,
    session: Session,
    public_url: String,
    mode: FormMode,
    profile_id: Option<i64>,
    draft: ProfileDraft,
    logo: Option<MediaRef>,
    cover: Option<MediaRef>,
    verification: VerificationStatus,
    premium: PremiumStatus,
    gallery_images: Vec<GalleryImage>,
    gallery_videos: Vec<GalleryVideo>,
    confirmation: Option<ShareLink>,
    feedback: Feedback,
}

impl<A: MarketplaceApi> ProfileFormController<A> {
    pub fn new(api: A, session: Session, public_url: impl Into<String>) -> Self {
        Self {
            api,
            session,
            public_url: public_url.into(),
            mode: FormMode::Loading,
            profile_id: None,
            draft: ProfileDraft::default(),
            logo: None,
            cover: None,
            verification: VerificationStatus::None,
            premium: PremiumStatus::Inactive,
            gallery_images: Vec::new(),
            gallery_videos: Vec::new(),
            confirmation: None,
            feedback: Feedback::default(),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn profile_id(&self) -> Option<i64> {
        self.profile_id
    }

    pub fn profile_exists(&self) -> bool {
        self.profile_id.is_some()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    pub fn logo(&self) -> Option<&MediaRef> {
        self.logo.as_ref()
    }

    pub fn cover(&self) -> Option<&MediaRef> {
        self.cover.as_ref()
    }

    pub fn verification(&self) -> VerificationStatus {
        self.verification
    }

    pub fn premium(&self) -> PremiumStatus {
        self.premium
    }

    pub fn gallery_images(&self) -> &[GalleryImage] {
        &self.gallery_images
    }

    pub fn gallery_videos(&self) -> &[GalleryVideo] {
        &self.gallery_videos
    }

    /// Success view shown after a save
    pub fn confirmation(&self) -> Option<&ShareLink> {
        self.confirmation.as_ref()
    }

    pub fn dismiss_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Open the public page of the saved profile, closing the success view
    pub fn view_business_page(&mut self) -> ClientResult<()> {
        let id = self.require_profile()?;
        let link = self
            .confirmation
            .take()
            .unwrap_or_else(|| ShareLink::for_profile(&self.public_url, id));
        self.feedback.navigate(Navigation::BusinessPage(link.url));
        Ok(())
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    /// Media slots whose local selection has not reached the backend yet
    pub fn pending_uploads(&self) -> Vec<MediaSlot> {
        [(MediaSlot::Logo, &self.logo), (MediaSlot::Cover, &self.cover)]
            .into_iter()
            .filter(|(_, media)| media.as_ref().is_some_and(MediaRef::is_pending))
            .map(|(slot, _)| slot)
            .collect()
    }

    // ------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------

    /// Add or remove a category; returns whether the selection changed
    pub fn toggle_category(&mut self, id: &str) -> bool {
        if let Some(pos) = self.draft.categories.iter().position(|c| c == id) {
            self.draft.categories.remove(pos);
            return true;
        }

        if !shared::can_add_category(self.draft.categories.len()) {
            self.feedback.warning(format!(
                "You can select up to {} categories",
                MAX_CATEGORIES
            ));
            return false;
        }

        self.draft.categories.push(id.to_string());
        true
    }

    /// Set or clear (empty url) a social link
    pub fn set_social_link(&mut self, platform: SocialPlatform, url: &str) {
        if url.trim().is_empty() {
            self.draft.social_links.remove(&platform);
        } else {
            self.draft.social_links.insert(platform, url.trim().to_string());
        }
    }

    // ------------------------------------------------------------------
    // Load / save
    // ------------------------------------------------------------------

    /// Fetch the current profile; failures leave an empty create form
    pub async fn load(&mut self) -> FormMode {
        if !self.session.is_authenticated() {
            self.feedback.navigate(Navigation::Login);
            return self.mode;
        }

        match self.api.get_my_profile().await {
            Ok(envelope) => match envelope.profile {
                Some(profile) if envelope.has_profile => {
                    tracing::info!("Loaded business profile {}", profile.id);
                    self.hydrate(profile);
                    self.mode = FormMode::Edit;
                }
                _ => {
                    tracing::info!("No business profile yet, starting in create mode");
                    self.mode = FormMode::Create;
                }
            },
            Err(e) if e.is_unauthorized() => {
                self.feedback.navigate(Navigation::Login);
            }
            Err(e) => {
                tracing::warn!("Failed to load business profile: {}", e);
                self.mode = FormMode::Create;
            }
        }

        self.mode
    }

    fn hydrate(&mut self, profile: BusinessProfile) {
        self.draft = ProfileDraft::from_profile(&profile);
        self.profile_id = Some(profile.id);
        self.logo = profile.logo_url.clone().map(MediaRef::Remote);
        self.cover = profile.cover_url.clone().map(MediaRef::Remote);
        self.verification = profile.verification_status;
        self.premium = profile.premium();
        self.gallery_images = profile.gallery_images;
        self.gallery_videos = profile.gallery_videos;
    }

    /// Validate and persist the draft
    pub async fn save(&mut self) -> ClientResult<SaveOutcome> {
        if let Err(message) = validate_business_name(&self.draft.business_name) {
            return Err(self.reject(ClientError::validation("business_name", message)));
        }

        let payload = self.draft.to_payload();
        if let Err(errors) = payload.validate() {
            return Err(self.reject(errors.into()));
        }

        let (profile_id, created, failed_uploads) = match self.profile_id {
            Some(id) => {
                if let Err(e) = self.api.update_profile(&payload).await {
                    tracing::error!("Failed to update business profile {}: {}", id, e);
                    return Err(self.reject(e));
                }
                tracing::info!("Updated business profile {}", id);
                (id, false, Vec::new())
            }
            None => {
                let profile = match self.api.create_profile(&payload).await {
                    Ok(profile) => profile,
                    Err(e) => {
                        tracing::error!("Failed to create business profile: {}", e);
                        return Err(self.reject(e));
                    }
                };
                tracing::info!("Created business profile {}", profile.id);

                self.profile_id = Some(profile.id);
                self.mode = FormMode::Edit;
                self.verification = profile.verification_status;
                self.premium = profile.premium();

                let failed = self.flush_pending_media().await;
                (profile.id, true, failed)
            }
        };

        let share = ShareLink::for_profile(&self.public_url, profile_id);
        self.confirmation = Some(share.clone());
        self.feedback.success(if created {
            "Business profile created"
        } else {
            "Business profile updated"
        });

        Ok(SaveOutcome {
            profile_id,
            created,
            share,
            failed_uploads,
        })
    }

    /// Upload selections made before the profile existed. Failures keep the
    /// local preview so the upload can be retried on its own.
    async fn flush_pending_media(&mut self) -> Vec<MediaSlot> {
        let mut failed = Vec::new();

        for slot in [MediaSlot::Logo, MediaSlot::Cover] {
            let Some(image) = self.slot(slot).and_then(|m| m.pending()).cloned() else {
                continue;
            };

            match self.api.upload_profile_media(slot, &image).await {
                Ok(url) => {
                    tracing::info!("Uploaded pending {} after profile creation", slot);
                    *self.slot_mut(slot) = Some(MediaRef::Remote(url));
                }
                Err(e) => {
                    tracing::warn!("Pending {} upload failed: {}", slot, e);
                    self.feedback.warning(format!(
                        "Profile saved, but the {} could not be uploaded. Please try again",
                        slot
                    ));
                    failed.push(slot);
                }
            }
        }

        failed
    }

    // ------------------------------------------------------------------
    // Logo / cover
    // ------------------------------------------------------------------

    pub async fn upload_logo(&mut self, image: LocalImage) -> ClientResult<UploadOutcome> {
        self.upload_media(MediaSlot::Logo, image).await
    }

    pub async fn upload_cover(&mut self, image: LocalImage) -> ClientResult<UploadOutcome> {
        self.upload_media(MediaSlot::Cover, image).await
    }

    async fn upload_media(&mut self, slot: MediaSlot, image: LocalImage) -> ClientResult<UploadOutcome> {
        if !self.profile_exists() {
            tracing::debug!("Deferring {} upload until the profile is created", slot);
            *self.slot_mut(slot) = Some(MediaRef::Pending(image));
            return Ok(UploadOutcome::Deferred);
        }

        match self.api.upload_profile_media(slot, &image).await {
            Ok(url) => {
                *self.slot_mut(slot) = Some(MediaRef::Remote(url.clone()));
                self.feedback.success(format!("Business {} updated", slot));
                Ok(UploadOutcome::Uploaded(url))
            }
            Err(e) => {
                tracing::error!("Failed to upload {}: {}", slot, e);
                Err(self.reject(e))
            }
        }
    }

    fn slot(&self, slot: MediaSlot) -> Option<&MediaRef> {
        match slot {
            MediaSlot::Logo => self.logo.as_ref(),
            MediaSlot::Cover => self.cover.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: MediaSlot) -> &mut Option<MediaRef> {
        match slot {
            MediaSlot::Logo => &mut self.logo,
            MediaSlot::Cover => &mut self.cover,
        }
    }

    /// Queue the notice for a failed action and hand the error back
    fn reject(&mut self, err: ClientError) -> ClientError {
        self.feedback.report(&err);
        err
    }

    fn require_profile(&mut self) -> ClientResult<i64> {
        match self.profile_id {
            Some(id) => Ok(id),
            None => Err(self.reject(ClientError::ProfileRequired)),
        }
    }
}
