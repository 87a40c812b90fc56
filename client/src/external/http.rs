//! REST client for the marketplace backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    BusinessProfile, ChangePasswordRequest, CheckoutRequest, CheckoutSession, GalleryImage,
    GalleryVideo, LocalImage, MediaSlot, NewGalleryVideo, Notification, Order, PaymentProvider,
    ProfileEnvelope, ProfilePayload, StkPushRequest, StkPushResponse, Voucher,
};

use super::{MarketplaceApi, Resource};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Authenticated HTTP client
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    /// Create a client with default transport settings (for testing)
    pub fn with_base_url(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the bearer token, e.g. after signing in again
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = self.checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> ClientResult<()> {
        self.checked(builder).await.map(|_| ())
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(self.request(method, path).json(body)).await
    }

    async fn checked(&self, builder: RequestBuilder) -> ClientResult<reqwest::Response> {
        let request = builder.build()?;
        tracing::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Request failed with {}: {}", status, body);
            return Err(ClientError::from_response(status, &body));
        }

        Ok(response)
    }

    async fn image_part(image: &LocalImage) -> ClientResult<multipart::Part> {
        let bytes = tokio::fs::read(&image.path).await?;
        multipart::Part::bytes(bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| ClientError::validation("file", format!("Unsupported image type: {}", e)))
    }
}

#[async_trait]
impl MarketplaceApi for HttpApiClient {
    async fn get_my_profile(&self) -> ClientResult<ProfileEnvelope> {
        self.send(self.request(Method::GET, "business-profiles/me"))
            .await
    }

    async fn create_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile> {
        self.send_json(Method::POST, "business-profiles/", payload)
            .await
    }

    async fn update_profile(&self, payload: &ProfilePayload) -> ClientResult<BusinessProfile> {
        self.send_json(Method::PUT, "business-profiles/me", payload)
            .await
    }

    async fn upload_profile_media(
        &self,
        slot: MediaSlot,
        image: &LocalImage,
    ) -> ClientResult<String> {
        let form = multipart::Form::new().part("file", Self::image_part(image).await?);
        let path = format!("business-profiles/me/{}", slot.path());

        let body: serde_json::Value = self
            .send(self.request(Method::POST, &path).multipart(form))
            .await?;

        body.get(slot.url_field())
            .or_else(|| body.get("url"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ClientError::Decode(format!("missing {} in upload response", slot.url_field())))
    }

    async fn add_gallery_image(
        &self,
        image: &LocalImage,
        caption: Option<&str>,
    ) -> ClientResult<GalleryImage> {
        let mut form = multipart::Form::new().part("file", Self::image_part(image).await?);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        self.send(
            self.request(Method::POST, "business-profiles/me/gallery/image")
                .multipart(form),
        )
        .await
    }

    async fn delete_gallery_image(&self, id: i64) -> ClientResult<()> {
        let path = format!("business-profiles/me/gallery/image/{}", id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn add_gallery_video(&self, video: &NewGalleryVideo) -> ClientResult<GalleryVideo> {
        self.send_json(Method::POST, "business-profiles/me/gallery/video", video)
            .await
    }

    async fn delete_gallery_video(&self, id: i64) -> ClientResult<()> {
        let path = format!("business-profiles/me/gallery/video/{}", id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn request_verification(&self) -> ClientResult<()> {
        self.send_empty(self.request(
            Method::POST,
            "business-profiles/me/request-verification",
        ))
        .await
    }

    async fn create_checkout(
        &self,
        provider: PaymentProvider,
        request: &CheckoutRequest,
    ) -> ClientResult<CheckoutSession> {
        let path = match provider {
            PaymentProvider::Stripe => "premium-subscription/stripe/checkout",
            PaymentProvider::Paypal => "premium-subscription/paypal/checkout",
            PaymentProvider::Mpesa => {
                return Err(ClientError::validation(
                    "provider",
                    "M-Pesa payments use an STK push, not a hosted checkout",
                ))
            }
        };
        self.send_json(Method::POST, path, request).await
    }

    async fn mpesa_stk_push(&self, request: &StkPushRequest) -> ClientResult<StkPushResponse> {
        self.send_json(Method::POST, "premium-subscription/mpesa/stk-push", request)
            .await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        self.send_empty(
            self.request(Method::POST, "auth/change-password")
                .json(request),
        )
        .await
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.list(Resource::Orders).await
    }

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.list(Resource::Notifications).await
    }

    async fn list_vouchers(&self) -> ClientResult<Vec<Voucher>> {
        self.list(Resource::Vouchers).await
    }
}
