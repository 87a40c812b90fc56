//! Business profile models

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum number of categories a profile may carry
pub const MAX_CATEGORIES: usize = 5;

/// Maximum number of gallery images
pub const MAX_GALLERY_IMAGES: usize = 20;

/// Maximum number of gallery videos
pub const MAX_GALLERY_VIDEOS: usize = 10;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum business name length in characters
pub const MAX_BUSINESS_NAME_LEN: usize = 200;

/// Category tags offered by the editor (id, label)
pub const BUSINESS_CATEGORIES: &[(&str, &str)] = &[
    ("restaurant", "Restaurant & Food"),
    ("retail", "Retail & Shopping"),
    ("beauty", "Beauty & Wellness"),
    ("health", "Health & Medical"),
    ("fitness", "Fitness & Sports"),
    ("education", "Education & Training"),
    ("automotive", "Automotive"),
    ("real_estate", "Real Estate"),
    ("technology", "Technology & IT"),
    ("travel", "Travel & Hospitality"),
    ("entertainment", "Entertainment & Events"),
    ("professional", "Professional Services"),
    ("home", "Home & Garden"),
    ("fashion", "Fashion & Apparel"),
];

/// Verification state of a business profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    #[serde(alias = "unverified")]
    None,
    Pending,
    Verified,
}

/// Premium subscription state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PremiumStatus {
    #[default]
    Inactive,
    Active { expires_at: Option<DateTime<Utc>> },
}

impl PremiumStatus {
    pub fn from_wire(is_premium: bool, expires_at: Option<DateTime<Utc>>) -> Self {
        if is_premium {
            PremiumStatus::Active { expires_at }
        } else {
            PremiumStatus::Inactive
        }
    }

    /// Whether premium features are available at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            PremiumStatus::Inactive => false,
            PremiumStatus::Active { expires_at: None } => true,
            PremiumStatus::Active {
                expires_at: Some(expiry),
            } => *expiry > now,
        }
    }
}

/// Social platforms a profile can link to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Tiktok,
    Youtube,
    Website,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 7] = [
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::Twitter,
        SocialPlatform::Linkedin,
        SocialPlatform::Tiktok,
        SocialPlatform::Youtube,
        SocialPlatform::Website,
    ];
}

/// An image in the profile gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryImage {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A video in the profile gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryVideo {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Input for attaching a hosted video to the gallery
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewGalleryVideo {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A persisted business profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessProfile {
    pub id: i64,
    pub business_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub premium_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub social_links: BTreeMap<SocialPlatform, String>,
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    #[serde(default)]
    pub gallery_videos: Vec<GalleryVideo>,
}

impl BusinessProfile {
    pub fn premium(&self) -> PremiumStatus {
        PremiumStatus::from_wire(self.is_premium, self.premium_expires_at)
    }
}

/// Response of `GET /business-profiles/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    pub has_profile: bool,
    #[serde(default)]
    pub profile: Option<BusinessProfile>,
}

/// Body of the create and update requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct ProfilePayload {
    #[validate(length(min = 1, max = 200, message = "Business name is required"))]
    pub business_name: String,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 5, message = "At most 5 categories can be selected"))]
    pub categories: Vec<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub social_links: BTreeMap<SocialPlatform, String>,
}
