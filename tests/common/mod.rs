//! Mock cache service for integration tests
//!
//! Serves the cache HTTP API from a `MemoryApi` on a background thread so
//! the blocking client can be exercised over real TCP.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Once};
use std::thread;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use oblivion_client::models::{CacheInfo, ErrorResponse};
use oblivion_client::{CacheApi, ClientConfig, ClientError, MemoryApi, Node, Version};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// == Logging ==
static TRACING: Once = Once::new();

/// Installs a test subscriber once, filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "oblivion_client=debug,tower_http=info".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

// == Service Error ==
/// Maps store errors onto the status codes the real service uses.
struct ServiceError(ClientError);

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ClientError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClientError::VersionConflict { .. } => StatusCode::CONFLICT,
            ClientError::InvalidKey(_) | ClientError::InvalidCacheName(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

type Store = Arc<MemoryApi>;
type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Deserialize)]
struct VersionQuery {
    version: Option<u64>,
}

fn with_etag(version: Version) -> [(header::HeaderName, String); 1] {
    [(header::ETAG, version.to_etag())]
}

// == Handlers ==
async fn list_caches(State(store): State<Store>) -> ServiceResult<Json<Vec<String>>> {
    Ok(Json(store.caches()?))
}

async fn cache_info(
    State(store): State<Store>,
    Path(cache): Path<String>,
) -> ServiceResult<Json<CacheInfo>> {
    let size = store.size(&cache)?;
    Ok(Json(CacheInfo::new(cache, size)))
}

async fn list_keys(
    State(store): State<Store>,
    Path(cache): Path<String>,
) -> ServiceResult<Json<Vec<String>>> {
    Ok(Json(store.keys(&cache)?))
}

async fn flush_cache(
    State(store): State<Store>,
    Path(cache): Path<String>,
) -> ServiceResult<StatusCode> {
    store.flush(&cache)?;
    Ok(StatusCode::NO_CONTENT)
}

// Also answers HEAD requests, with the body stripped.
async fn get_entry(
    State(store): State<Store>,
    Path((cache, key)): Path<(String, String)>,
) -> ServiceResult<Response> {
    match store.get(&cache, &key)? {
        Some(raw) => Ok((
            with_etag(raw.version),
            [(header::CONTENT_TYPE, "application/json")],
            raw.content,
        )
            .into_response()),
        None => Err(ServiceError(ClientError::NotFound { cache, key })),
    }
}

async fn put_entry(
    State(store): State<Store>,
    Path((cache, key)): Path<(String, String)>,
    Query(query): Query<VersionQuery>,
    body: String,
) -> ServiceResult<Response> {
    let version = match query.version {
        Some(expected) => store.put_versioned(&cache, &key, &body, Version::new(expected))?,
        None => store.put(&cache, &key, &body)?,
    };
    Ok((StatusCode::CREATED, with_etag(version)).into_response())
}

async fn delete_entry(
    State(store): State<Store>,
    Path((cache, key)): Path<(String, String)>,
    Query(query): Query<VersionQuery>,
) -> ServiceResult<StatusCode> {
    match query.version {
        Some(expected) => store.delete_versioned(&cache, &key, Version::new(expected))?,
        None => store.delete(&cache, &key)?,
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_nodes(State(store): State<Store>) -> ServiceResult<Json<Vec<Node>>> {
    Ok(Json(store.nodes()?))
}

// == Router ==
/// Router serving the cache API from `store`.
pub fn create_router(store: Store) -> Router {
    Router::new()
        .route("/caches", get(list_caches))
        .route("/caches/:cache", get(cache_info))
        .route("/caches/:cache/keys", get(list_keys).delete(flush_cache))
        .route(
            "/caches/:cache/keys/:key",
            get(get_entry).put(put_entry).delete(delete_entry),
        )
        .route("/nodes", get(list_nodes))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

// == Server ==
/// Serves `app` on an ephemeral local port and returns its base URL.
///
/// The listener is bound before returning, so requests made right away
/// queue until the server thread starts accepting.
pub fn spawn_router(app: Router) -> String {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock service");
    listener
        .set_nonblocking(true)
        .expect("non-blocking listener");
    let addr = listener.local_addr().expect("listener address");

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("mock service runtime");

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("mock service");
        });
    });

    format!("http://{addr}")
}

/// A running mock service and direct access to its store.
pub struct MockService {
    pub base_url: String,
    pub store: Store,
}

impl MockService {
    pub fn start() -> Self {
        Self::with_nodes(Vec::new())
    }

    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        let store = Arc::new(MemoryApi::with_nodes(nodes));
        let base_url = spawn_router(create_router(Arc::clone(&store)));
        Self { base_url, store }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(&self.base_url)
    }
}
