//! Typed helpers for the game-store endpoints
//!
//! A [`GameStore`] is one environment plus one task tag. Each method builds
//! the request for a single endpoint and returns the buffered response
//! undecoded, leaving status and body checks to the caller.

use std::path::Path;

use gamestore_common::{
    CartItemRequest, CreateOrderRequest, CreatePaymentRequest, Environment, LoginRequest,
    OrderStatusUpdateRequest, Page, UserCreateRequest, UserUpdateRequest, WishlistItemRequest,
};

use crate::client::{ApiClient, ApiRequest};
use crate::compare::EnvPair;
use crate::error::E2eResult;
use crate::response::ApiResponse;

#[derive(Clone)]
pub struct GameStore {
    client: ApiClient,
    env: Environment,
    task_id: String,
}

impl ApiClient {
    /// Endpoint helpers for one environment, tagged with `task_id`
    pub fn store(&self, env: Environment, task_id: impl Into<String>) -> GameStore {
        GameStore {
            client: self.clone(),
            env,
            task_id: task_id.into(),
        }
    }

    /// Endpoint helpers for both environments
    pub fn stores(&self, task_id: &str) -> EnvPair<GameStore> {
        EnvPair::new(
            self.store(Environment::Release, task_id),
            self.store(Environment::Dev, task_id),
        )
    }
}

impl GameStore {
    pub fn environment(&self) -> Environment {
        self.env
    }

    async fn send(&self, request: ApiRequest) -> E2eResult<ApiResponse> {
        self.client
            .send(self.env, request.task(self.task_id.as_str()))
            .await
    }

    // Setup

    pub async fn setup(&self) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::post("/setup")).await
    }

    // Users

    pub async fn list_users(&self, page: Option<Page>) -> E2eResult<ApiResponse> {
        self.send(paged(ApiRequest::get("/users"), page)).await
    }

    pub async fn get_user(&self, user_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/users/{user_uuid}"))).await
    }

    pub async fn create_user(&self, body: &UserCreateRequest) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::post("/users").json(body)?).await
    }

    pub async fn update_user(&self, user_uuid: &str, body: &UserUpdateRequest) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::patch(format!("/users/{user_uuid}")).json(body)?)
            .await
    }

    pub async fn delete_user(&self, user_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::delete(format!("/users/{user_uuid}"))).await
    }

    pub async fn login(&self, email: &str, password: &str) -> E2eResult<ApiResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.send(ApiRequest::post("/users/login").json(&body)?).await
    }

    /// `PUT /users/{uuid}/avatar` as multipart. A missing file is sent empty.
    pub async fn update_avatar(&self, user_uuid: &str, file: &Path) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::put(format!("/users/{user_uuid}/avatar")).file(file))
            .await
    }

    // Wishlist

    pub async fn wishlist(&self, user_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/users/{user_uuid}/wishlist")))
            .await
    }

    pub async fn wishlist_add(&self, user_uuid: &str, item_uuid: &str) -> E2eResult<ApiResponse> {
        self.wishlist_call(user_uuid, "add", item_uuid).await
    }

    pub async fn wishlist_remove(&self, user_uuid: &str, item_uuid: &str) -> E2eResult<ApiResponse> {
        self.wishlist_call(user_uuid, "remove", item_uuid).await
    }

    async fn wishlist_call(&self, user_uuid: &str, action: &str, item_uuid: &str) -> E2eResult<ApiResponse> {
        let body = WishlistItemRequest {
            item_uuid: item_uuid.to_string(),
        };
        self.send(ApiRequest::post(format!("/users/{user_uuid}/wishlist/{action}")).json(&body)?)
            .await
    }

    // Cart

    pub async fn cart(&self, user_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/users/{user_uuid}/cart"))).await
    }

    pub async fn cart_add(&self, user_uuid: &str, item_uuid: &str, quantity: i64) -> E2eResult<ApiResponse> {
        self.cart_call(user_uuid, "add", item_uuid, quantity).await
    }

    pub async fn cart_change(&self, user_uuid: &str, item_uuid: &str, quantity: i64) -> E2eResult<ApiResponse> {
        self.cart_call(user_uuid, "change", item_uuid, quantity).await
    }

    pub async fn cart_remove(&self, user_uuid: &str, item_uuid: &str) -> E2eResult<ApiResponse> {
        self.cart_call(user_uuid, "remove", item_uuid, 0).await
    }

    pub async fn cart_clear(&self, user_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::post(format!("/users/{user_uuid}/cart/clear")).json(&serde_json::json!({}))?)
            .await
    }

    async fn cart_call(
        &self,
        user_uuid: &str,
        action: &str,
        item_uuid: &str,
        quantity: i64,
    ) -> E2eResult<ApiResponse> {
        let body = CartItemRequest {
            item_uuid: item_uuid.to_string(),
            quantity,
        };
        self.send(ApiRequest::post(format!("/users/{user_uuid}/cart/{action}")).json(&body)?)
            .await
    }

    // Orders and payments

    pub async fn orders(&self, user_uuid: &str, page: Option<Page>) -> E2eResult<ApiResponse> {
        self.send(paged(ApiRequest::get(format!("/users/{user_uuid}/orders")), page))
            .await
    }

    pub async fn create_order(&self, user_uuid: &str, body: &CreateOrderRequest) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::post(format!("/users/{user_uuid}/orders")).json(body)?)
            .await
    }

    pub async fn update_order_status(&self, order_uuid: &str, status: &str) -> E2eResult<ApiResponse> {
        let body = OrderStatusUpdateRequest {
            status: status.to_string(),
        };
        self.send(ApiRequest::patch(format!("/orders/{order_uuid}/status")).json(&body)?)
            .await
    }

    pub async fn create_payment(&self, user_uuid: &str, body: &CreatePaymentRequest) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::post(format!("/users/{user_uuid}/payments")).json(body)?)
            .await
    }

    pub async fn payment(&self, payment_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/payments/{payment_uuid}"))).await
    }

    // Catalog

    pub async fn games(&self, page: Option<Page>) -> E2eResult<ApiResponse> {
        self.send(paged(ApiRequest::get("/games"), page)).await
    }

    pub async fn search_games(&self, query: &str, page: Option<Page>) -> E2eResult<ApiResponse> {
        self.send(paged(ApiRequest::get("/games/search").query("query", query), page))
            .await
    }

    pub async fn game(&self, game_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/games/{game_uuid}"))).await
    }

    pub async fn categories(&self) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get("/categories")).await
    }

    pub async fn category_games(&self, category_uuid: &str) -> E2eResult<ApiResponse> {
        self.send(ApiRequest::get(format!("/categories/{category_uuid}/games")))
            .await
    }
}

fn paged(request: ApiRequest, page: Option<Page>) -> ApiRequest {
    match page {
        Some(page) => request.page(page),
        None => request,
    }
}
