//! WebAssembly module for the marketplace client
//!
//! Exposes the form rules to the browser so fields can be checked while the
//! user types:
//! - Profile name, description, email, category and video URL rules
//! - Password change rules and the strength meter
//! - Voucher discounts and order statistics
//! - Premium package listing and M-Pesa phone normalization

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str("marketplace-wasm loaded"));
}

// ============================================================================
// Profile rules
// ============================================================================

/// Error message for an invalid business name, `undefined` when valid
#[wasm_bindgen(js_name = validateBusinessName)]
pub fn business_name_error(name: &str) -> Option<String> {
    validate_business_name(name).err().map(str::to_string)
}

/// Error message for an over-long description, `undefined` when valid
#[wasm_bindgen(js_name = validateDescription)]
pub fn description_error(description: &str) -> Option<String> {
    validate_description(description).err().map(str::to_string)
}

#[wasm_bindgen(js_name = validateEmail)]
pub fn email_error(email: &str) -> Option<String> {
    validate_email(email).err().map(str::to_string)
}

#[derive(Serialize)]
struct CategoryOption {
    id: &'static str,
    label: &'static str,
}

/// Category picker options as JSON `[{id, label}]`
#[wasm_bindgen(js_name = businessCategories)]
pub fn business_categories_json() -> String {
    let options: Vec<CategoryOption> = BUSINESS_CATEGORIES
        .iter()
        .map(|&(id, label)| CategoryOption { id, label })
        .collect();

    serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
}

/// Social link fields the editor shows, as a JSON array of platform keys
#[wasm_bindgen(js_name = socialPlatforms)]
pub fn social_platforms_json() -> String {
    serde_json::to_string(&SocialPlatform::ALL).unwrap_or_else(|_| "[]".to_string())
}

#[wasm_bindgen(js_name = canAddCategory)]
pub fn can_add_another_category(selected: usize) -> bool {
    can_add_category(selected)
}

/// Error message for an unsupported video link, `undefined` when valid
#[wasm_bindgen(js_name = validateVideoUrl)]
pub fn video_url_error(url: &str) -> Option<String> {
    validate_video_url(url).err().map(str::to_string)
}

// ============================================================================
// Password rules
// ============================================================================

#[wasm_bindgen(js_name = validatePasswordChange)]
pub fn password_change_error(current: &str, new: &str, confirm: &str) -> Option<String> {
    validate_password_change(current, new, confirm)
        .err()
        .map(|rule| rule.to_string())
}

/// Strength meter score from 0 to 4
#[wasm_bindgen(js_name = passwordStrength)]
pub fn password_score(password: &str) -> u8 {
    password_strength(password)
}

// ============================================================================
// Money
// ============================================================================

/// Discount a voucher grants on an order subtotal
#[wasm_bindgen(js_name = calculateVoucherDiscount)]
pub fn calculate_voucher_discount(voucher_json: &str, subtotal: f64) -> Result<f64, JsValue> {
    voucher_discount(voucher_json, subtotal).map_err(|e| JsValue::from_str(&e))
}

fn voucher_discount(voucher_json: &str, subtotal: f64) -> Result<f64, String> {
    let voucher: Voucher =
        serde_json::from_str(voucher_json).map_err(|e| format!("Invalid voucher JSON: {}", e))?;
    let subtotal = Decimal::try_from(subtotal).unwrap_or(Decimal::ZERO);

    Ok(voucher.discount_for(subtotal).to_f64().unwrap_or(0.0))
}

#[derive(Serialize)]
struct PackageView {
    #[serde(flatten)]
    package: PremiumPackage,
    saving_percent: u32,
}

/// Premium tiers as JSON, shortest first
#[wasm_bindgen(js_name = premiumPackages)]
pub fn premium_packages_json() -> String {
    let packages: Vec<PackageView> = PremiumPackage::all()
        .into_iter()
        .map(|package| PackageView {
            saving_percent: package.saving_percent(),
            package,
        })
        .collect();

    serde_json::to_string(&packages).unwrap_or_else(|_| "[]".to_string())
}

/// Order totals per status for the dashboard cards
#[wasm_bindgen(js_name = orderStats)]
pub fn order_stats_json(orders_json: &str) -> Result<String, JsValue> {
    order_stats(orders_json).map_err(|e| JsValue::from_str(&e))
}

fn order_stats(orders_json: &str) -> Result<String, String> {
    let orders: Vec<Order> =
        serde_json::from_str(orders_json).map_err(|e| format!("Invalid orders JSON: {}", e))?;

    serde_json::to_string(&OrderStats::from_orders(&orders)).map_err(|e| e.to_string())
}

// ============================================================================
// Payments
// ============================================================================

/// Phone number in the 254XXXXXXXXX form the M-Pesa push expects
#[wasm_bindgen(js_name = normalizeMpesaPhone)]
pub fn normalize_mpesa_phone(phone: &str) -> Result<String, JsValue> {
    validate_mpesa_phone(phone).map_err(JsValue::from_str)
}
