//! Backend API integration
//!
//! Controllers talk to the REST backend only through [`MarketplaceApi`], so a
//! screen can be driven against [`HttpApiClient`] in the app and against a
//! recording fake in tests.

pub mod http;
pub mod resources;

use async_trait::async_trait;
use shared::{
    BusinessProfile, ChangePasswordRequest, CheckoutRequest, CheckoutSession, GalleryImage,
    GalleryVideo, LocalImage, MediaSlot, NewGalleryVideo, Notification, Order, PaymentProvider,
    ProfileEnvelope, ProfilePayload, StkPushRequest, StkPushResponse, Voucher,
};

use crate::error::ClientResult;

pub use http::HttpApiClient;
pub use resources::Resource;

/// Endpoints consumed by the screens
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `GET /business-profiles/me`
    async fn get_my_profile(&self) -> ClientResult<ProfileEnvelope>;

    /// `POST /business-profiles/`
    async fn create_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile>;

    /// `PUT /business-profiles/me`
    async fn update_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile>;

    /// `POST /business-profiles/me/logo|cover`, returns the stored URL
    async fn upload_profile_media(&self, slot: MediaSlot, image: &LocalImage)
        -> ClientResult<String>;

    async fn add_gallery_image(
        &self,
        image: &LocalImage,
        caption: Option<&str>,
    ) -> ClientResult<GalleryImage>;

    async fn delete_gallery_image(&self, id: i64) -> ClientResult<()>;

    async fn add_gallery_video(&self, video: &NewGalleryVideo) -> ClientResult<GalleryVideo>;

    async fn delete_gallery_video(&self, id: i64) -> ClientResult<()>;

    async fn request_verification(&self) -> ClientResult<()>;

    /// Hosted checkout for card and PayPal payments
    async fn create_checkout(
        &self,
        provider: PaymentProvider,
        request: &CheckoutRequest,
    ) -> ClientResult<CheckoutSession>;

    async fn mpesa_stk_push(&self, request: &StkPushRequest) -> ClientResult<StkPushResponse>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()>;

    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>>;

    async fn list_vouchers(&self) -> ClientResult<Vec<Voucher>>;
}
