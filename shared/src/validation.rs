//! Validation utilities for the marketplace client
//!
//! Every rule here runs before a request is issued, so a failing rule means the
//! backend is never contacted.

use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

use crate::models::{
    DiscountType, NewVoucher, MAX_BUSINESS_NAME_LEN, MAX_CATEGORIES, MAX_DESCRIPTION_LEN,
};

// ============================================================================
// Business Profile Validations
// ============================================================================

/// Validate the business name (required)
pub fn validate_business_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Business name is required");
    }
    if trimmed.chars().count() > MAX_BUSINESS_NAME_LEN {
        return Err("Business name must be at most 200 characters");
    }
    Ok(())
}

/// Validate the business description length
pub fn validate_description(description: &str) -> Result<(), &'static str> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err("Description must be at most 2000 characters");
    }
    Ok(())
}

/// Check whether another category may be selected
pub fn can_add_category(selected: usize) -> bool {
    selected < MAX_CATEGORIES
}

/// Hosting platforms accepted for gallery videos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
}

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];
const VIMEO_HOSTS: &[&str] = &["vimeo.com", "www.vimeo.com", "player.vimeo.com"];

/// Validate a gallery video URL and report which platform hosts it
pub fn validate_video_url(url: &str) -> Result<VideoPlatform, &'static str> {
    let parsed = Url::parse(url.trim()).map_err(|_| "Please enter a valid YouTube or Vimeo URL")?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("Video URL must start with http:// or https://");
    }

    match parsed.host_str() {
        Some(host) if YOUTUBE_HOSTS.contains(&host) => Ok(VideoPlatform::Youtube),
        Some(host) if VIMEO_HOSTS.contains(&host) => Ok(VideoPlatform::Vimeo),
        _ => Err("Please enter a valid YouTube or Vimeo URL"),
    }
}

// ============================================================================
// Account Validations
// ============================================================================

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Rules a password change must satisfy, each with its own message
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordRuleError {
    #[error("New password must be at least 8 characters")]
    TooShort,

    #[error("New password must be different from your current password")]
    SameAsCurrent,

    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

/// Validate a password change form
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), PasswordRuleError> {
    if new.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordRuleError::TooShort);
    }
    if new == current {
        return Err(PasswordRuleError::SameAsCurrent);
    }
    if new != confirm {
        return Err(PasswordRuleError::ConfirmationMismatch);
    }
    Ok(())
}

/// Score a password from 0 (weak) to 4 (strong) for the strength meter
pub fn password_strength(password: &str) -> u8 {
    let len = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    let mut score = 0;
    if len >= MIN_PASSWORD_LEN {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if has_lower && has_upper {
        score += 1;
    }
    if has_digit && has_symbol {
        score += 1;
    }
    score
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };
    if local.is_empty() || !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.')
    {
        return Err("Invalid email format");
    }
    Ok(())
}

// ============================================================================
// Payment Validations
// ============================================================================

/// Validate a Kenyan mobile number for M-Pesa and normalize it to 254XXXXXXXXX
/// Accepts: 0712345678, 0112345678, 712345678, 254712345678, +254 712 345 678
pub fn validate_mpesa_phone(phone: &str) -> Result<String, &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let subscriber = match digits.len() {
        10 if digits.starts_with("07") || digits.starts_with("01") => &digits[1..],
        9 if digits.starts_with('7') || digits.starts_with('1') => digits.as_str(),
        12 if digits.starts_with("2547") || digits.starts_with("2541") => &digits[3..],
        _ => return Err("Enter a valid M-Pesa phone number (e.g. 0712345678)"),
    };

    Ok(format!("254{}", subscriber))
}

/// Validate a voucher before it is created
pub fn validate_voucher(voucher: &NewVoucher) -> Result<(), &'static str> {
    if voucher.code.trim().is_empty() {
        return Err("Voucher code is required");
    }
    match voucher.discount_type {
        DiscountType::Percentage => {
            if voucher.discount_value <= Decimal::ZERO
                || voucher.discount_value > Decimal::from(100)
            {
                return Err("Percentage discount must be between 0 and 100");
            }
        }
        DiscountType::Fixed => {
            if voucher.discount_value <= Decimal::ZERO {
                return Err("Discount amount must be greater than zero");
            }
        }
    }
    if voucher.min_order_amount < Decimal::ZERO {
        return Err("Minimum order amount cannot be negative");
    }
    if let Some(cap) = voucher.max_discount {
        if cap <= Decimal::ZERO {
            return Err("Maximum discount must be greater than zero");
        }
    }
    if voucher.valid_until <= voucher.valid_from {
        return Err("Voucher must end after it starts");
    }
    Ok(())
}
