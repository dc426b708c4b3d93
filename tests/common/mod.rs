#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use actix_web::{App, HttpResponse, HttpServer, web};
use blog_admin::{ApiConfig, Placement, PostController, PostService};
use serde_json::{Map, Value};

/// In-memory stand-in for the `/posts` REST resource
#[derive(Default)]
pub struct FakeApi {
    pub posts: Mutex<Vec<Map<String, Value>>>,
    pub fail: AtomicBool,
    pub assign_ids: AtomicBool,
    pub requests: AtomicUsize,
}

impl FakeApi {
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Vec<Map<String, Value>> {
        self.posts.lock().unwrap().clone()
    }

    /// Seed a record directly, bypassing the HTTP surface
    pub fn insert_post(&self, id: &str, title: &str) {
        let post = serde_json::json!({
            "id": id,
            "title": title,
            "body": "seeded",
            "imageData": "",
            "createdAt": "2026-10-17T08:00:00.000000Z",
            "updatedAt": "2026-10-17T08:00:00.000000Z",
        });
        if let Value::Object(post) = post {
            self.posts.lock().unwrap().push(post);
        }
    }

    fn begin(&self) -> Option<HttpResponse> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            Some(HttpResponse::InternalServerError().body("database unavailable"))
        } else {
            None
        }
    }
}

fn has_id(post: &Map<String, Value>, id: &str) -> bool {
    post.get("id").and_then(Value::as_str) == Some(id)
}

async fn list_posts(api: web::Data<FakeApi>) -> HttpResponse {
    if let Some(failure) = api.begin() {
        return failure;
    }
    HttpResponse::Ok().json(api.stored())
}

async fn get_post(api: web::Data<FakeApi>, id: web::Path<String>) -> HttpResponse {
    if let Some(failure) = api.begin() {
        return failure;
    }
    let posts = api.posts.lock().unwrap();
    match posts.iter().find(|p| has_id(p, &id)) {
        Some(post) => HttpResponse::Ok().json(post),
        None => HttpResponse::NotFound().json(serde_json::json!({})),
    }
}

async fn create_post(api: web::Data<FakeApi>, body: web::Json<Map<String, Value>>) -> HttpResponse {
    if let Some(failure) = api.begin() {
        return failure;
    }
    let mut post = body.into_inner();
    let mut posts = api.posts.lock().unwrap();
    if api.assign_ids.load(Ordering::SeqCst) {
        post.insert("id".into(), Value::String(format!("srv-{}", posts.len() + 1)));
    }
    posts.push(post.clone());
    HttpResponse::Created().json(post)
}

async fn patch_post(
    api: web::Data<FakeApi>,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    if let Some(failure) = api.begin() {
        return failure;
    }
    let mut posts = api.posts.lock().unwrap();
    match posts.iter_mut().find(|p| has_id(p, &id)) {
        Some(post) => {
            for (key, value) in body.into_inner() {
                if key != "id" {
                    post.insert(key, value);
                }
            }
            HttpResponse::Ok().json(post.clone())
        }
        None => HttpResponse::NotFound().json(serde_json::json!({})),
    }
}

async fn delete_post(api: web::Data<FakeApi>, id: web::Path<String>) -> HttpResponse {
    if let Some(failure) = api.begin() {
        return failure;
    }
    let mut posts = api.posts.lock().unwrap();
    let before = posts.len();
    posts.retain(|p| !has_id(p, &id));
    if posts.len() < before {
        HttpResponse::Ok().json(serde_json::json!({}))
    } else {
        HttpResponse::NotFound().json(serde_json::json!({}))
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .route("", web::get().to(list_posts))
            .route("", web::post().to(create_post))
            .route("/{id}", web::get().to(get_post))
            .route("/{id}", web::patch().to(patch_post))
            .route("/{id}", web::delete().to(delete_post)),
    );
}

pub struct TestServer {
    pub api: web::Data<FakeApi>,
    pub base_url: String,
}

impl TestServer {
    pub fn service(&self) -> PostService {
        PostService::with_config(ApiConfig::new(&self.base_url).unwrap())
    }

    pub fn controller(&self) -> PostController {
        PostController::new(self.service(), Placement::Append)
    }
}

/// Start the fake API on an ephemeral port; must be called inside an actix runtime
pub fn spawn_server() -> TestServer {
    let api = web::Data::new(FakeApi::default());
    let shared = api.clone();

    let server = HttpServer::new(move || App::new().app_data(shared.clone()).configure(routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    TestServer {
        api,
        base_url: format!("http://{}", addr),
    }
}
