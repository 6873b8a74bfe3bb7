//! Integration tests for the REST client against an in-process backend

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use card_studio::api::upload::MAX_UPLOAD_BYTES;
use card_studio::api::{ApiClient, AssetKind, ClientError, Session, UploadError, UploadFile};
use card_studio::checkout::{Cart, CartItem, CustomerInfo, OrderRequest, PaymentMethod, ShippingInfo};
use card_studio::menu::MenuView;

const TOKEN: &str = "token-123";

#[derive(Clone, Default)]
struct Backend {
    hits: Arc<AtomicUsize>,
    orders: Arc<std::sync::Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Not authorized"}))).into_response()
}

async fn me(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "_id": "u1",
        "firstName": "Omar",
        "lastName": "Saleh",
        "email": "omar@example.com",
        "phone": "+962790000000"
    }))
    .into_response()
}

async fn profiles(State(backend): State<Backend>) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "profiles": [
            {"_id": "p1", "name": "Lina", "slug": "lina", "createdAt": "2024-03-01T10:00:00Z"},
            {"_id": "p2", "name": "Draft", "isActive": false}
        ]
    }))
}

async fn user_products(State(backend): State<Backend>) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!([
        {"_id": "u1", "productName": "NFC Card", "createdAt": "2024-05-10T08:30:00Z"}
    ]))
}

async fn my_menus(State(backend): State<Backend>) -> Json<Value> {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "data": [
            {"_id": "m1", "restaurantName": "Blue Cafe", "createdAt": "2024-04-02T12:00:00+03:00"}
        ]
    }))
}

async fn public_menu(State(backend): State<Backend>, Path(slug): Path<String>) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if slug != "blue-cafe" {
        return (StatusCode::NOT_FOUND, Json(json!({"message": "Menu not found"}))).into_response();
    }
    Json(json!({
        "slug": "blue-cafe",
        "name": "Blue Cafe",
        "currency": "JOD",
        "categories": [
            {"name": "Coffee", "items": [
                {"name": "Espresso", "price": 1.5},
                {"name": "Mocha", "price": 2.5, "isAvailable": false}
            ]}
        ]
    }))
    .into_response()
}

async fn create_order(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    backend.orders.lock().expect("lock").push(body);
    (StatusCode::CREATED, Json(json!({"orderId": "o-42"}))).into_response()
}

async fn toggle_profile(State(backend): State<Backend>, Path(id): Path<String>) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Profile not found"}))).into_response();
    }
    Json(json!({"success": true, "data": {"isActive": false}})).into_response()
}

async fn delete_menu(State(backend): State<Backend>, Path(_id): Path<String>) -> StatusCode {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

async fn upload_temp(State(backend): State<Backend>, mut multipart: Multipart) -> Response {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.expect("field bytes");
            return Json(json!({
                "url": format!("https://cdn.example.com/{name}?type={content_type}&size={}", bytes.len())
            }))
            .into_response();
        }
    }
    (StatusCode::BAD_REQUEST, Json(json!({"message": "No image"}))).into_response()
}

async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let router = Router::new()
        .route("/api/me", get(me))
        .route("/api/profiles", get(profiles))
        .route("/api/user-products", get(user_products))
        .route("/api/menus/my-menus", get(my_menus))
        .route("/api/menu/{slug}", get(public_menu))
        .route("/api/orders/create", post(create_order))
        .route("/api/profiles/{id}/toggle-status", patch(toggle_profile))
        .route("/api/menus/{id}", delete(delete_menu))
        .route("/api/profiles/upload-temp", post(upload_temp))
        .with_state(backend.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    (format!("http://{address}"), backend)
}

fn signed_in(base: &str) -> ApiClient {
    ApiClient::new(base, Session::with_token(TOKEN)).expect("client")
}

#[tokio::test]
async fn test_me_with_session() {
    let (base, _) = spawn_backend().await;
    let me = signed_in(&base).me().await.expect("me");
    assert_eq!(me.id.as_deref(), Some("u1"));
    assert_eq!(CustomerInfo::from_me(&me).full_name, "Omar Saleh");
}

#[tokio::test]
async fn test_missing_session_is_unauthorized() {
    let (base, _) = spawn_backend().await;
    let mut client = signed_in(&base);
    client.logout();
    let err = client.me().await.expect_err("no token");
    assert!(matches!(err, ClientError::Unauthorized));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_unified_listing_is_newest_first() {
    let (base, backend) = spawn_backend().await;
    let entries = signed_in(&base).unified_listing().await.expect("listing");

    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "m1", "p1", "p2"]);
    assert_eq!(entries[0].kind, AssetKind::UserProduct);
    assert_eq!(entries[1].title, "Blue Cafe");
    assert!(!entries[3].active);
    assert!(entries[3].created_at.is_none());
    assert_eq!(backend.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_fetch_menu() {
    let (base, _) = spawn_backend().await;
    let client = ApiClient::new(&base, Session::anonymous()).expect("client");

    let document = client
        .fetch_menu("blue-cafe")
        .await
        .expect("menu request")
        .expect("menu exists");
    let view = MenuView::from_document(&document);
    assert_eq!(view.item_count(), 1);
    assert_eq!(view.price_label(&view.categories[0].items[0]), "1.50 JOD");

    let missing = client.fetch_menu("closed-place").await.expect("menu request");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_create_order() {
    let (base, backend) = spawn_backend().await;
    let cart = Cart::from_items(vec![CartItem::new("nfc-card", "NFC Card", 25.0, 2)]);
    let order = OrderRequest::from_cart(
        &cart,
        CustomerInfo {
            full_name: "Omar Saleh".to_string(),
            email: "omar@example.com".to_string(),
            phone: "+962790000000".to_string(),
        },
        ShippingInfo {
            address: "Rainbow St 12".to_string(),
            city: "Amman".to_string(),
            country: "Jordan".to_string(),
            notes: None,
        },
        PaymentMethod::CashOnDelivery,
    )
    .expect("order");

    let created = signed_in(&base).create_order(&order).await.expect("created");
    assert_eq!(created.order_id, "o-42");

    let orders = backend.orders.lock().expect("lock");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["total"], 50.0);
    assert_eq!(orders[0]["customerInfo"]["phone"], "+962790000000");
}

#[tokio::test]
async fn test_toggle_and_delete() {
    let (base, _) = spawn_backend().await;
    let client = signed_in(&base);

    let state = client
        .toggle_status(AssetKind::Profile, "p1")
        .await
        .expect("toggle");
    assert_eq!(state, Some(false));

    client
        .delete_asset(AssetKind::Menu, "m1")
        .await
        .expect("delete");
}

#[tokio::test]
async fn test_backend_error_message_is_surfaced() {
    let (base, _) = spawn_backend().await;
    let err = signed_in(&base)
        .toggle_status(AssetKind::Profile, "missing")
        .await
        .expect_err("not found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Profile not found");
    assert!(!err.is_validation());
}

#[tokio::test]
async fn test_upload_sends_multipart_image() {
    let (base, _) = spawn_backend().await;
    let file = UploadFile::new("avatar.png", "image/png", vec![0x89, b'P', b'N', b'G']);
    let uploaded = signed_in(&base)
        .upload_profile_image(&file)
        .await
        .expect("upload");
    assert_eq!(
        uploaded.url,
        "https://cdn.example.com/avatar.png?type=image/png&size=4"
    );
}

#[tokio::test]
async fn test_rejected_type_makes_no_request() {
    let (base, backend) = spawn_backend().await;
    let file = UploadFile::new("cv.pdf", "application/pdf", vec![1, 2, 3]);
    let err = signed_in(&base)
        .upload_profile_image(&file)
        .await
        .expect_err("pdf is rejected");

    assert!(err.is_validation());
    assert!(matches!(
        err,
        ClientError::Upload(UploadError::UnsupportedType { .. })
    ));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_upload_makes_no_request() {
    let (base, backend) = spawn_backend().await;
    let bytes = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
    let file = UploadFile::new("huge.jpg", "image/jpeg", bytes);
    let err = signed_in(&base)
        .upload_logo(&file)
        .await
        .expect_err("too large");

    assert_eq!(
        err.to_string(),
        format!("Image must be 5MB or smaller (got {} bytes)", MAX_UPLOAD_BYTES + 1)
    );
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let client = ApiClient::new(&format!("http://{address}"), Session::anonymous()).expect("client");
    let err = client.me().await.expect_err("nothing is listening");
    assert!(matches!(err, ClientError::Transport(_)));
}
