// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

//! HTTP round-trip tests, the router runs on the in-memory store and is
//! exercised with reqwest.

use std::sync::Arc;

use events::MemoryProducer;
use memory_store::MemoryStore;
use movie_ratings::api::{self, AppState};
use serde_json::{json, Value};
use service::RatingService;

fn app_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    let producer = Arc::new(MemoryProducer::new());

    let service = Arc::new(RatingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        producer,
    ));

    AppState {
        users: store.clone(),
        movies: store.clone(),
        genres: store.clone(),
        ratings: store,
        service,
    }
}

/// Bind to port 0 and return the actual address.
async fn start_server() -> String {
    let app = api::router(app_state());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn create_user(client: &reqwest::Client, base: &str, name: &str) -> Value {
    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "name": name }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    resp.json().await.unwrap()
}

async fn create_movie(client: &reqwest::Client, base: &str, title: &str, genres: &[&str]) -> Value {
    let resp = client
        .post(format!("{base}/movies"))
        .json(&json!({ "title": title, "genres": genres }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    resp.json().await.unwrap()
}

#[tokio::test]
async fn health_check() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn user_lookup() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 404);

    let user = create_user(&client, &base, "Ana").await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["name"], "Ana");

    let resp = client.get(format!("{base}/users/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "Ana");
}

#[tokio::test]
async fn movie_catalog_and_genres() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create_movie(&client, &base, "Toy Story", &["Animation", "Comedy"]).await;
    let movie = create_movie(&client, &base, "Heat", &["Crime", "Drama"]).await;
    assert_eq!(movie["id"], 2);

    let resp = client.get(format!("{base}/movies")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let movies: Value = resp.json().await.unwrap();
    assert_eq!(movies.as_array().unwrap().len(), 2);

    let resp = client
        .get(format!("{base}/movies/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Heat");
    assert_eq!(body["genres"], json!(["Crime", "Drama"]));

    let resp = client
        .get(format!("{base}/movies/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client.get(format!("{base}/genres")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let genres: Value = resp.json().await.unwrap();
    let names: Vec<_> = genres
        .as_array()
        .unwrap()
        .iter()
        .map(|genre| genre["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Animation", "Comedy", "Crime", "Drama"]);
}

#[tokio::test]
async fn rating_crud_flow() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create_user(&client, &base, "Ana").await;
    create_movie(&client, &base, "Heat", &["Crime"]).await;

    // Create
    let resp = client
        .post(format!("{base}/ratings"))
        .json(&json!({ "user_id": 1, "movie_id": 1, "score": 4.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let rating: Value = resp.json().await.unwrap();
    assert_eq!(rating["user_id"], 1);
    assert_eq!(rating["movie_id"], 1);
    assert_eq!(rating["score"], 4.5);

    // Read it back
    let resp = client
        .get(format!("{base}/ratings/1/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Update the score
    let resp = client
        .put(format!("{base}/ratings/1/1"))
        .json(&json!({ "score": 2.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], rating["id"]);
    assert_eq!(updated["score"], 2.0);

    // The user's rating list has exactly this one
    let resp = client
        .get(format!("{base}/users/1/ratings"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let ratings: Value = resp.json().await.unwrap();
    assert_eq!(ratings.as_array().unwrap().len(), 1);

    // Delete, then the lookup misses
    let resp = client
        .delete(format!("{base}/ratings/1/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/ratings/1/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn duplicate_rating_is_a_conflict() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create_user(&client, &base, "Ana").await;
    create_movie(&client, &base, "Heat", &["Crime"]).await;

    let payload = json!({ "user_id": 1, "movie_id": 1, "score": 4.5 });
    let resp = client
        .post(format!("{base}/ratings"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = client
        .post(format!("{base}/ratings"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn rating_requires_known_user_and_movie() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create_movie(&client, &base, "Heat", &["Crime"]).await;

    let resp = client
        .post(format!("{base}/ratings"))
        .json(&json!({ "user_id": 7, "movie_id": 1, "score": 3.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    create_user(&client, &base, "Ana").await;

    let resp = client
        .post(format!("{base}/ratings"))
        .json(&json!({ "user_id": 1, "movie_id": 42, "score": 3.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn mutations_on_missing_ratings() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    create_user(&client, &base, "Ana").await;
    create_movie(&client, &base, "Heat", &["Crime"]).await;

    // Updating a rating that was never created misses
    let resp = client
        .put(format!("{base}/ratings/1/1"))
        .json(&json!({ "score": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Deleting one is still a no-op
    let resp = client
        .delete(format!("{base}/ratings/1/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
}
