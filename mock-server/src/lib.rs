//! In-memory stand-in for a library-management JSON API.
//!
//! Rejected writes answer `400` with a list of `{"objectName",
//! "defaultMessage"}` objects. The cart endpoints answer a missing ISBN
//! with an empty `400` instead, which exercises the client's handling of
//! error bodies that are not a list.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    #[serde(default)]
    pub description: Option<String>,
    pub stock: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub user_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct CartIsbn {
    pub isbn: Option<String>,
}

/// Spring `ObjectError` as it appears on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectError {
    pub object_name: String,
    pub default_message: String,
}

#[derive(Default)]
pub struct Store {
    books: BTreeMap<String, Book>,
    users: HashMap<Uuid, User>,
    cart: Vec<String>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, Json<Vec<ObjectError>>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/api/admin/management/book",
            get(list_books).post(add_book).put(update_book),
        )
        .route("/api/admin/management/book/{isbn}", delete(delete_book))
        .route("/api/admin/management/user", get(list_users).post(add_user))
        .route("/api/admin/management/user/{user_id}", delete(delete_user))
        .route(
            "/api/book/cart",
            get(list_cart).post(add_to_cart).delete(remove_from_cart),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(object_name: &str, messages: Vec<String>) -> Rejection {
    let errors = messages
        .into_iter()
        .map(|default_message| ObjectError {
            object_name: object_name.to_string(),
            default_message,
        })
        .collect();
    (StatusCode::BAD_REQUEST, Json(errors))
}

/// Field checks in declaration order; an empty result means valid.
pub fn validate_book(book: &Book) -> Vec<String> {
    let mut errors = Vec::new();
    if book.isbn.is_empty() {
        errors.push("isbn is required".to_string());
    } else if book.isbn.len() != 13 || !book.isbn.bytes().all(|b| b.is_ascii_digit()) {
        errors.push("isbn must be 13 digits".to_string());
    }
    for (field, value) in [
        ("title", &book.title),
        ("author", &book.author),
        ("publisher", &book.publisher),
    ] {
        if value.is_empty() {
            errors.push(format!("{field} is required"));
        } else if value.chars().count() > 100 {
            errors.push(format!("{field} must be at most 100 characters"));
        }
    }
    if book
        .description
        .as_ref()
        .is_some_and(|d| d.chars().count() > 500)
    {
        errors.push("description must be at most 500 characters".to_string());
    }
    if book.stock < 0 {
        errors.push("stock must be 0 or more".to_string());
    }
    errors
}

pub fn validate_user(user: &NewUser) -> Vec<String> {
    let mut errors = Vec::new();
    if user.user_name.trim().is_empty() {
        errors.push("user name is required".to_string());
    }
    if user.email.trim().is_empty() {
        errors.push("email is required".to_string());
    } else if !is_plausible_email(&user.email) {
        errors.push("email must be a valid address".to_string());
    }
    if user.password.trim().is_empty() {
        errors.push("password is required".to_string());
    } else if user.password.chars().count() > 100 {
        errors.push("password must be at most 100 characters".to_string());
    }
    errors
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.values().cloned().collect())
}

async fn add_book(State(db): State<Db>, Json(book): Json<Book>) -> Result<StatusCode, Rejection> {
    let errors = validate_book(&book);
    if !errors.is_empty() {
        tracing::info!(isbn = %book.isbn, count = errors.len(), "book validation failed");
        return Err(reject("bookDetail", errors));
    }
    let mut store = db.write().await;
    if store.books.contains_key(&book.isbn) {
        return Err(reject(
            "error",
            vec![format!("book {} is already registered", book.isbn)],
        ));
    }
    store.books.insert(book.isbn.clone(), book);
    Ok(StatusCode::OK)
}

async fn update_book(
    State(db): State<Db>,
    Json(book): Json<Book>,
) -> Result<StatusCode, Rejection> {
    let errors = validate_book(&book);
    if !errors.is_empty() {
        tracing::info!(isbn = %book.isbn, count = errors.len(), "book validation failed");
        return Err(reject("bookDetail", errors));
    }
    let mut store = db.write().await;
    let existing = store
        .books
        .get_mut(&book.isbn)
        .ok_or_else(|| reject("error", vec![format!("book {} not found", book.isbn)]))?;
    *existing = book;
    Ok(StatusCode::OK)
}

async fn delete_book(
    State(db): State<Db>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, Rejection> {
    tracing::warn!(%isbn, "deleting book");
    let mut store = db.write().await;
    store
        .books
        .remove(&isbn)
        .map(|_| StatusCode::OK)
        .ok_or_else(|| reject("error", vec![format!("book {isbn} not found")]))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    let mut users: Vec<User> = store.users.values().cloned().collect();
    users.sort_by(|a, b| a.email.cmp(&b.email));
    Json(users)
}

async fn add_user(
    State(db): State<Db>,
    Json(input): Json<NewUser>,
) -> Result<StatusCode, Rejection> {
    let errors = validate_user(&input);
    if !errors.is_empty() {
        tracing::info!(count = errors.len(), "user validation failed");
        return Err(reject("accountProfile", errors));
    }
    let mut store = db.write().await;
    if store.users.values().any(|u| u.email == input.email) {
        return Err(reject(
            "error",
            vec!["email address is already registered".to_string()],
        ));
    }
    let user = User {
        user_id: Uuid::new_v4(),
        user_name: input.user_name,
        email: input.email,
        is_admin: input.is_admin,
    };
    store.users.insert(user.user_id, user);
    Ok(StatusCode::OK)
}

async fn delete_user(
    State(db): State<Db>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let id = Uuid::parse_str(&user_id)
        .map_err(|_| reject("error", vec![format!("invalid user id {user_id}")]))?;
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::OK)
        .ok_or_else(|| reject("error", vec![format!("user {id} not found")]))
}

async fn list_cart(State(db): State<Db>) -> Json<Vec<String>> {
    Json(db.read().await.cart.clone())
}

async fn add_to_cart(State(db): State<Db>, Json(input): Json<CartIsbn>) -> StatusCode {
    let Some(isbn) = input.isbn else {
        tracing::info!("cart add without isbn");
        return StatusCode::BAD_REQUEST;
    };
    let mut store = db.write().await;
    if !store.cart.contains(&isbn) {
        store.cart.push(isbn);
    }
    StatusCode::OK
}

async fn remove_from_cart(State(db): State<Db>, Json(input): Json<CartIsbn>) -> StatusCode {
    let Some(isbn) = input.isbn else {
        tracing::info!("cart remove without isbn");
        return StatusCode::BAD_REQUEST;
    };
    db.write().await.cart.retain(|i| *i != isbn);
    StatusCode::OK
}
