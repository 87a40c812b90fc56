//! Voucher models and discount math

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a voucher's value is applied
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount_value` is a percentage of the order subtotal
    Percentage,
    /// `discount_value` is a currency amount
    Fixed,
}

/// A voucher issued by a business
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub title: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    #[serde(default)]
    pub min_order_amount: Decimal,
    #[serde(default)]
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub times_used: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Voucher {
    /// Discount granted on an order of `subtotal`, rounded to cents
    pub fn discount_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal <= Decimal::ZERO || subtotal < self.min_order_amount {
            return Decimal::ZERO;
        }

        let raw = match self.discount_type {
            DiscountType::Percentage => subtotal * self.discount_value / Decimal::from(100),
            DiscountType::Fixed => self.discount_value,
        };

        let capped = match self.max_discount {
            Some(cap) => raw.min(cap),
            None => raw,
        };

        capped.min(subtotal).max(Decimal::ZERO).round_dp(2)
    }

    /// Whether the voucher can be redeemed at `now`
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.valid_from <= now
            && now < self.valid_until
            && self.usage_limit.map_or(true, |limit| self.times_used < limit)
    }
}

/// Input for creating a voucher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVoucher {
    pub code: String,
    pub title: Option<String>,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Decimal,
    pub max_discount: Option<Decimal>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub usage_limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn voucher(discount_type: DiscountType, value: i64) -> Voucher {
        let now = Utc::now();
        Voucher {
            id: 1,
            code: "WELCOME".into(),
            title: None,
            discount_type,
            discount_value: Decimal::from(value),
            min_order_amount: Decimal::ZERO,
            max_discount: None,
            valid_from: now - Duration::days(1),
            valid_until: now + Duration::days(1),
            usage_limit: None,
            times_used: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_percentage_discount() {
        let v = voucher(DiscountType::Percentage, 15);
        assert_eq!(v.discount_for(Decimal::new(20000, 2)), Decimal::new(3000, 2));
    }

    #[test]
    fn test_percentage_discount_capped() {
        let mut v = voucher(DiscountType::Percentage, 50);
        v.max_discount = Some(Decimal::from(20));
        assert_eq!(v.discount_for(Decimal::from(100)), Decimal::from(20));
    }

    #[test]
    fn test_fixed_discount_never_exceeds_subtotal() {
        let v = voucher(DiscountType::Fixed, 25);
        assert_eq!(v.discount_for(Decimal::from(10)), Decimal::from(10));
        assert_eq!(v.discount_for(Decimal::from(100)), Decimal::from(25));
    }

    #[test]
    fn test_minimum_order() {
        let mut v = voucher(DiscountType::Fixed, 5);
        v.min_order_amount = Decimal::from(50);
        assert_eq!(v.discount_for(Decimal::from(49)), Decimal::ZERO);
        assert_eq!(v.discount_for(Decimal::from(50)), Decimal::from(5));
    }

    #[test]
    fn test_redeemable_window_and_usage() {
        let now = Utc::now();
        let mut v = voucher(DiscountType::Fixed, 5);
        assert!(v.is_redeemable_at(now));

        v.usage_limit = Some(3);
        v.times_used = 3;
        assert!(!v.is_redeemable_at(now));

        v.times_used = 0;
        assert!(!v.is_redeemable_at(now + Duration::days(2)));
    }
}
