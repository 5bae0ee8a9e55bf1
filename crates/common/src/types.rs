//! Core types for the game-store API
//!
//! Entities are read-only snapshots of remote state. Request bodies serialize
//! with the API's snake_case field names.

use serde::{Deserialize, Serialize};

/// One of the two environments under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Reference environment
    Release,
    /// Candidate environment
    Dev,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Release, Environment::Dev];
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Release => write!(f, "release"),
            Environment::Dev => write!(f, "dev"),
        }
    }
}

/// Offset/limit paging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

// Entities

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: String,
    pub email: String,
    pub nickname: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub category_uuids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_uuid: String,
    pub quantity: i64,
    #[serde(default)]
    pub total_price: i64,
}

/// A user's cart as returned by `/users/{uuid}/cart` and its mutations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub user_uuid: String,
}

impl Cart {
    pub fn contains(&self, item_uuid: &str) -> bool {
        self.items.iter().any(|item| item.item_uuid == item_uuid)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_uuid: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub uuid: String,
    #[serde(default)]
    pub user_uuid: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub uuid: String,
    #[serde(default)]
    pub order_uuid: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// Request bodies

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreateRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub nickname: String,
}

/// `PATCH /users/{uuid}` carries the same fields as creation
pub type UserUpdateRequest = UserCreateRequest;

#[derive(Debug, Clone, Serialize)]
pub struct WishlistItemRequest {
    pub item_uuid: String,
}

/// Body of the cart `add`, `change` and `remove` calls
#[derive(Debug, Clone, Serialize)]
pub struct CartItemRequest {
    pub item_uuid: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
}

impl CreateOrderRequest {
    pub fn single(item_uuid: impl Into<String>, quantity: i64) -> Self {
        Self {
            items: vec![OrderItem {
                item_uuid: item_uuid.into(),
                quantity,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderStatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub order_uuid: String,
    pub payment_method: String,
}
