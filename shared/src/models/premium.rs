//! Premium subscription packages and checkout payloads

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A fixed premium tier
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PremiumPackage {
    pub id: &'static str,
    pub name: &'static str,
    pub months: u32,
    pub price: Decimal,
    pub currency: &'static str,
    /// Shown on longer tiers only
    pub discount_label: Option<&'static str>,
}

impl PremiumPackage {
    /// All tiers, shortest first
    pub fn all() -> Vec<PremiumPackage> {
        vec![
            PremiumPackage {
                id: "monthly",
                name: "Monthly",
                months: 1,
                price: Decimal::new(999, 2),
                currency: "USD",
                discount_label: None,
            },
            PremiumPackage {
                id: "quarterly",
                name: "Quarterly",
                months: 3,
                price: Decimal::new(2499, 2),
                currency: "USD",
                discount_label: Some("Save 17%"),
            },
            PremiumPackage {
                id: "yearly",
                name: "Yearly",
                months: 12,
                price: Decimal::new(7999, 2),
                currency: "USD",
                discount_label: Some("Save 33%"),
            },
        ]
    }

    pub fn find(id: &str) -> Option<PremiumPackage> {
        Self::all().into_iter().find(|p| p.id == id)
    }

    /// Saving against paying the monthly price for the same duration, in whole percent
    pub fn saving_percent(&self) -> u32 {
        let monthly = Decimal::new(999, 2);
        let full = monthly * Decimal::from(self.months);
        if full <= self.price {
            return 0;
        }
        ((full - self.price) / full * Decimal::from(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }
}

/// Payment providers accepted at checkout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// Card payments
    Stripe,
    Paypal,
    /// Mobile money, confirmed on the handset
    Mpesa,
}

impl PaymentProvider {
    /// Whether checkout leaves the app for a hosted payment page
    pub fn redirects(&self) -> bool {
        !matches!(self, PaymentProvider::Mpesa)
    }
}

impl std::str::FromStr for PaymentProvider {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stripe" | "card" => Ok(PaymentProvider::Stripe),
            "paypal" => Ok(PaymentProvider::Paypal),
            "mpesa" | "m-pesa" => Ok(PaymentProvider::Mpesa),
            _ => Err("Unknown payment provider"),
        }
    }
}

/// Body of the hosted checkout request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    pub package_id: String,
}

/// Hosted checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(alias = "url", alias = "approval_url")]
    pub checkout_url: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of the M-Pesa STK push request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StkPushRequest {
    pub package_id: String,
    pub phone_number: String,
}

/// Response of the M-Pesa STK push request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StkPushResponse {
    #[serde(default)]
    pub checkout_request_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_tiers() {
        let packages = PremiumPackage::all();
        assert_eq!(packages.len(), 3);
        assert_eq!(
            packages.iter().map(|p| p.months).collect::<Vec<_>>(),
            vec![1, 3, 12]
        );
    }

    #[test]
    fn test_discount_labels_match_prices() {
        for package in PremiumPackage::all() {
            match package.discount_label {
                Some(label) => {
                    assert_eq!(label, format!("Save {}%", package.saving_percent()));
                }
                None => assert_eq!(package.saving_percent(), 0),
            }
        }
    }

    #[test]
    fn test_find_package() {
        let yearly = PremiumPackage::find("yearly").unwrap();
        assert_eq!(yearly.price, Decimal::new(7999, 2));
        assert!(PremiumPackage::find("weekly").is_none());
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("card".parse::<PaymentProvider>(), Ok(PaymentProvider::Stripe));
        assert_eq!("M-Pesa".parse::<PaymentProvider>(), Ok(PaymentProvider::Mpesa));
        assert!("bitcoin".parse::<PaymentProvider>().is_err());
        assert!(PaymentProvider::Stripe.redirects());
        assert!(!PaymentProvider::Mpesa.redirects());
    }
}
