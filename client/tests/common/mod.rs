//! Recording fake of the backend shared by the controller tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use marketplace_client::error::{ClientError, ClientResult};
use marketplace_client::MarketplaceApi;
use rust_decimal::Decimal;
use shared::*;

/// A request the controller issued
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetProfile,
    CreateProfile(ProfilePayload),
    UpdateProfile(ProfilePayload),
    UploadMedia(MediaSlot, String),
    AddGalleryImage(String),
    DeleteGalleryImage(i64),
    AddGalleryVideo(NewGalleryVideo),
    DeleteGalleryVideo(i64),
    RequestVerification,
    Checkout(PaymentProvider, CheckoutRequest),
    StkPush(StkPushRequest),
    ChangePassword(ChangePasswordRequest),
    ListOrders,
    ListNotifications,
    ListVouchers,
}

/// Canned backend behaviour
#[derive(Debug, Clone)]
pub struct Script {
    pub profile: Option<BusinessProfile>,
    pub get_profile_error: Option<u16>,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_uploads: bool,
    pub fail_gallery: bool,
    pub fail_orders: bool,
    pub orders_error: Option<u16>,
    pub notifications_error: Option<u16>,
    pub fail_verification: bool,
    pub checkout_error: Option<u16>,
    pub fail_password: Option<u16>,
    pub created_id: i64,
    pub orders: Vec<Order>,
    pub notifications: Vec<Notification>,
    pub vouchers: Vec<Voucher>,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            profile: None,
            get_profile_error: None,
            fail_create: false,
            fail_update: false,
            fail_uploads: false,
            fail_gallery: false,
            fail_orders: false,
            orders_error: None,
            notifications_error: None,
            fail_verification: false,
            checkout_error: None,
            fail_password: None,
            created_id: 101,
            orders: Vec::new(),
            notifications: Vec::new(),
            vouchers: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<Call>,
    script: Script,
    next_gallery_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingApi {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingApi {
    pub fn new(script: Script) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                calls: Vec::new(),
                script,
                next_gallery_id: 1000,
            })),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    pub fn script(&self, update: impl FnOnce(&mut Script)) {
        update(&mut self.inner.lock().unwrap().script);
    }

    fn record(&self, call: Call) -> Script {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        inner.script.clone()
    }

    fn next_gallery_id(&self) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_gallery_id += 1;
        inner.next_gallery_id
    }
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        message: "Internal Server Error".into(),
    }
}

fn status_error(status: u16) -> ClientError {
    match status {
        401 => ClientError::Unauthorized,
        403 => ClientError::Forbidden("Forbidden".into()),
        _ => ClientError::Api {
            status,
            message: "Request failed".into(),
        },
    }
}

#[async_trait]
impl MarketplaceApi for RecordingApi {
    async fn get_my_profile(&self) -> ClientResult<ProfileEnvelope> {
        let script = self.record(Call::GetProfile);
        if let Some(status) = script.get_profile_error {
            return Err(status_error(status));
        }
        Ok(ProfileEnvelope {
            has_profile: script.profile.is_some(),
            profile: script.profile,
        })
    }

    async fn create_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile> {
        let script = self.record(Call::CreateProfile(payload.clone()));
        if script.fail_create {
            return Err(server_error());
        }
        let mut profile = profile_fixture(script.created_id);
        profile.business_name = payload.business_name.clone();
        profile.verification_status = VerificationStatus::None;
        Ok(profile)
    }

    async fn update_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile> {
        let script = self.record(Call::UpdateProfile(payload.clone()));
        if script.fail_update {
            return Err(server_error());
        }
        let mut profile = script.profile.unwrap_or_else(|| profile_fixture(1));
        profile.business_name = payload.business_name.clone();
        Ok(profile)
    }

    async fn upload_profile_media(
        &self,
        slot: MediaSlot,
        image: &LocalImage,
    ) -> ClientResult<String> {
        let script = self.record(Call::UploadMedia(slot, image.file_name.clone()));
        if script.fail_uploads {
            return Err(server_error());
        }
        Ok(format!("https://cdn.example.com/{}/{}", slot, image.file_name))
    }

    async fn add_gallery_image(
        &self,
        image: &LocalImage,
        caption: Option<&str>,
    ) -> ClientResult<GalleryImage> {
        let script = self.record(Call::AddGalleryImage(image.file_name.clone()));
        if script.fail_gallery {
            return Err(server_error());
        }
        Ok(GalleryImage {
            id: self.next_gallery_id(),
            url: format!("https://cdn.example.com/gallery/{}", image.file_name),
            caption: caption.map(str::to_string),
        })
    }

    async fn delete_gallery_image(&self, id: i64) -> ClientResult<()> {
        let script = self.record(Call::DeleteGalleryImage(id));
        if script.fail_gallery {
            return Err(server_error());
        }
        Ok(())
    }

    async fn add_gallery_video(&self, video: &NewGalleryVideo) -> ClientResult<GalleryVideo> {
        let script = self.record(Call::AddGalleryVideo(video.clone()));
        if script.fail_gallery {
            return Err(server_error());
        }
        Ok(GalleryVideo {
            id: self.next_gallery_id(),
            url: video.url.clone(),
            title: video.title.clone(),
            thumbnail_url: None,
        })
    }

    async fn delete_gallery_video(&self, id: i64) -> ClientResult<()> {
        let script = self.record(Call::DeleteGalleryVideo(id));
        if script.fail_gallery {
            return Err(server_error());
        }
        Ok(())
    }

    async fn request_verification(&self) -> ClientResult<()> {
        let script = self.record(Call::RequestVerification);
        if script.fail_verification {
            return Err(server_error());
        }
        Ok(())
    }

    async fn create_checkout(
        &self,
        provider: PaymentProvider,
        request: &CheckoutRequest,
    ) -> ClientResult<CheckoutSession> {
        let script = self.record(Call::Checkout(provider, request.clone()));
        if let Some(status) = script.checkout_error {
            return Err(status_error(status));
        }
        Ok(CheckoutSession {
            checkout_url: format!("https://checkout.example.com/pay/{}", request.package_id),
            session_id: Some("cs_test_123".into()),
        })
    }

    async fn mpesa_stk_push(&self, request: &StkPushRequest) -> ClientResult<StkPushResponse> {
        let script = self.record(Call::StkPush(request.clone()));
        if let Some(status) = script.checkout_error {
            return Err(status_error(status));
        }
        Ok(StkPushResponse {
            checkout_request_id: Some("ws_CO_123".into()),
            message: None,
        })
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        let script = self.record(Call::ChangePassword(request.clone()));
        match script.fail_password {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let script = self.record(Call::ListOrders);
        if let Some(status) = script.orders_error {
            return Err(status_error(status));
        }
        if script.fail_orders {
            return Err(server_error());
        }
        Ok(script.orders)
    }

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        let script = self.record(Call::ListNotifications);
        if let Some(status) = script.notifications_error {
            return Err(status_error(status));
        }
        Ok(script.notifications)
    }

    async fn list_vouchers(&self) -> ClientResult<Vec<Voucher>> {
        Ok(self.record(Call::ListVouchers).vouchers)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const PUBLIC_URL: &str = "https://market.example.com";

/// A verified, non-premium profile
pub fn profile_fixture(id: i64) -> BusinessProfile {
    BusinessProfile {
        id,
        business_name: "Mama Mboga Grocers".into(),
        description: Some("Fresh produce daily".into()),
        categories: vec!["retail".into()],
        phone: Some("0712345678".into()),
        email: Some("hello@mboga.co.ke".into()),
        address: None,
        city: Some("Nairobi".into()),
        country: Some("Kenya".into()),
        logo_url: Some("https://cdn.example.com/logo/original.png".into()),
        cover_url: None,
        verification_status: VerificationStatus::Verified,
        is_premium: false,
        premium_expires_at: None,
        social_links: Default::default(),
        gallery_images: Vec::new(),
        gallery_videos: Vec::new(),
    }
}

pub fn gallery_images(count: usize) -> Vec<GalleryImage> {
    (0..count)
        .map(|i| GalleryImage {
            id: i as i64 + 1,
            url: format!("https://cdn.example.com/gallery/{}.jpg", i),
            caption: None,
        })
        .collect()
}

pub fn gallery_videos(count: usize) -> Vec<GalleryVideo> {
    (0..count)
        .map(|i| GalleryVideo {
            id: i as i64 + 1,
            url: format!("https://youtu.be/video{}", i),
            title: None,
            thumbnail_url: None,
        })
        .collect()
}

pub fn order(id: i64, amount: i64, status: OrderStatus) -> Order {
    Order {
        id,
        order_number: Some(format!("ORD-{:04}", id)),
        total_amount: Decimal::from(amount),
        status,
        created_at: Utc::now(),
    }
}

pub fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        title: format!("Notification {}", id),
        message: None,
        is_read,
        created_at: Utc::now(),
    }
}

pub fn voucher(id: i64, active: bool) -> Voucher {
    let now = Utc::now();
    Voucher {
        id,
        code: format!("CODE{}", id),
        title: None,
        discount_type: DiscountType::Percentage,
        discount_value: Decimal::from(10),
        min_order_amount: Decimal::ZERO,
        max_discount: None,
        valid_from: now - Duration::days(1),
        valid_until: now + Duration::days(30),
        usage_limit: None,
        times_used: 0,
        is_active: active,
    }
}
