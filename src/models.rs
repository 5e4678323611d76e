// =============================================================================
// MODELS MODULE
// =============================================================================
// Data contracts shared with the rest of the application:
// - CartItem / Cart: structural shapes, checked only by the type system
// - Doctor: staff record, checked at runtime by `validation::validate_doctor`
//
// Wire names are camelCase to match what the front end and the staff API
// exchange, so the contract structs carry `rename_all = "camelCase"`.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ValidationIssue;

// =============================================================================
// CART ITEM
// =============================================================================
// One line in a shopping cart. Ranges (price >= 0, quantity >= 1,
// max_stock >= quantity) are expected but not enforced here.
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier, unique per item within a cart
    pub product_id: String,

    pub product_name: String,

    /// Image URI (not checked)
    pub product_image: String,

    /// Unit price
    pub price: f64,

    pub quantity: i64,

    /// Branch the item ships from
    pub branch_id: String,

    pub branch_name: String,

    /// Stock available at the branch when the item was added
    pub max_stock: i64,
}

impl CartItem {
    /// Price of this line (unit price times quantity)
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

// =============================================================================
// CART
// =============================================================================
// Aggregate of cart items in insertion order.
//
// `total_items` and `total_price` are plain fields: whoever owns the cart keeps
// them in sync with `items`. The helpers below only compute what they would
// be; nothing here rewrites them.
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_price: f64,
}

/// Relative tolerance when comparing a stored total price against the
/// computed one. Scaled by the larger magnitude, floored at 1.0.
const PRICE_RELATIVE_EPSILON: f64 = 1e-12;

impl Cart {
    /// Sum of item quantities, or `None` if the sum overflows `i64`.
    pub fn computed_total_items(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.quantity))
    }

    /// Sum of `price * quantity` over all items
    pub fn computed_total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the stored totals agree with the items. An overflowing
    /// item count never agrees.
    pub fn totals_consistent(&self) -> bool {
        let computed_price = self.computed_total_price();
        let scale = self.total_price.abs().max(computed_price.abs()).max(1.0);

        self.computed_total_items() == Some(self.total_items)
            && (self.total_price - computed_price).abs() <= PRICE_RELATIVE_EPSILON * scale
    }
}

// =============================================================================
// DOCTOR
// =============================================================================
// Staff / medical practitioner record. Field names follow the staff API
// (Vietnamese): id_nhan_vien = staff id, ma_nhan_vien = staff code,
// ho_ten = full name, gioi_tinh = gender, chuc_vu = position code,
// chi_nhanh = branch code.
//
// Optional fields are omitted from JSON when absent, never sent as null.
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id_nhan_vien: i64,
    pub ma_nhan_vien: String,
    pub ho_ten: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gioi_tinh: Option<Gender>,

    /// Position code (lookup table lives elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chuc_vu: Option<i64>,

    /// Branch code (lookup table lives elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chi_nhanh: Option<i64>,
}

/// The three gender labels accepted for `gioiTinh`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Nam")]
    Male,
    #[serde(rename = "Nữ")]
    Female,
    #[serde(rename = "Khác")]
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Gender {
    /// Every accepted label, in display order
    pub const LABELS: [&'static str; 3] = ["Nam", "Nữ", "Khác"];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Nam" => Some(Self::Male),
            "Nữ" => Some(Self::Female),
            "Khác" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Nam",
            Self::Female => "Nữ",
            Self::Other => "Khác",
        }
    }
}

// =============================================================================
// API REQUEST/RESPONSE STRUCTURES
// =============================================================================

/// Response for `POST /api/v1/cart/summary`: the cart as received plus what
/// its totals would be if derived from the items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummaryResponse {
    #[serde(flatten)]
    pub cart: Cart,
    /// `null` when the quantities overflow a 64-bit count
    pub computed_total_items: Option<i64>,
    pub computed_total_price: f64,
    pub totals_consistent: bool,
}

impl From<Cart> for CartSummaryResponse {
    fn from(cart: Cart) -> Self {
        Self {
            computed_total_items: cart.computed_total_items(),
            computed_total_price: cart.computed_total_price(),
            totals_consistent: cart.totals_consistent(),
            cart,
        }
    }
}

// =============================================================================
// HEALTH CHECK RESPONSES
// =============================================================================

/// Simple health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

// =============================================================================
// ERROR RESPONSES
// =============================================================================

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Per-field problems, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            issues: None,
        }
    }

    /// Create an error response carrying validation issues
    pub fn with_issues(
        error: impl Into<String>,
        message: impl Into<String>,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            issues: Some(issues),
        }
    }
}
