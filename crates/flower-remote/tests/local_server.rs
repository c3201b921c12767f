//! Clients against an in-process HTTP server standing in for the remote
//! services.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use flower_core::{Criterion, DatasetDescriptor, Hyperparameters, ParameterError, ParameterStore};
use flower_remote::{DatasetDownloader, DocumentLocation, FirestoreParameterStore, RemoteError};
use pretty_assertions::assert_eq;
use serde_json::Value;

const TOKEN: &str = "test-token";
const IRIS: &str = "Id,SepalLengthCm,SepalWidthCm,PetalLengthCm,PetalWidthCm,Species\n\
1,5.1,3.5,1.4,0.2,Iris-setosa\n";

type Doc = Arc<Mutex<Option<Value>>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn read_doc(State(doc): State<Doc>, headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    doc.lock()
        .unwrap()
        .clone()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn write_doc(
    State(doc): State<Doc>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !authorized(&headers) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    *doc.lock().unwrap() = Some(body.clone());
    Ok(Json(body))
}

async fn serve() -> (String, Doc) {
    let doc: Doc = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/v1/projects/flower-dev/databases/(default)/documents/parameters/parameters",
            get(read_doc).patch(write_doc),
        )
        .route("/files/Iris.csv", get(|| async { IRIS }))
        .with_state(Arc::clone(&doc));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), doc)
}

fn location() -> DocumentLocation {
    DocumentLocation {
        project_id: "flower-dev".into(),
        database: "(default)".into(),
        collection: "parameters".into(),
        document: "parameters".into(),
    }
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let (base, _) = serve().await;
    let store = FirestoreParameterStore::new(&format!("{base}/v1"), &location(), TOKEN).unwrap();

    let err = store.get_parameters().await.unwrap_err();
    assert!(matches!(err, ParameterError::NotFound(_)));
}

#[tokio::test]
async fn create_then_update_then_read() {
    let (base, doc) = serve().await;
    let store = FirestoreParameterStore::new(&format!("{base}/v1"), &location(), TOKEN).unwrap();

    store.create_collection().await.unwrap();
    assert_eq!(store.get_parameters().await.unwrap(), Hyperparameters::default());

    let updated = Hyperparameters {
        n_estimators: 30,
        criterion: Criterion::Entropy,
        max_depth: None,
    };
    store.update_parameters(&updated).await.unwrap();
    assert_eq!(store.get_parameters().await.unwrap(), updated);

    let stored = doc.lock().unwrap().clone().unwrap();
    assert_eq!(stored["fields"]["n_estimators"]["integerValue"], "30");
}

#[tokio::test]
async fn bad_token_is_a_store_error() {
    let (base, _) = serve().await;
    let store = FirestoreParameterStore::new(&format!("{base}/v1"), &location(), "wrong").unwrap();

    let err = store.create_collection().await.unwrap_err();
    assert!(matches!(err, ParameterError::Store(_)));
}

#[tokio::test]
async fn download_writes_under_dataset_directory() {
    let (base, _) = serve().await;
    let temp = tempfile::tempdir().unwrap();
    let downloader = DatasetDownloader::new(temp.path()).unwrap();

    let path = downloader
        .download(&DatasetDescriptor::new("iris", format!("{base}/files/Iris.csv")))
        .await
        .unwrap();

    assert_eq!(path, temp.path().join("iris").join("Iris.csv"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), IRIS);
}

#[tokio::test]
async fn download_of_missing_file_fails() {
    let (base, _) = serve().await;
    let temp = tempfile::tempdir().unwrap();
    let downloader = DatasetDownloader::new(temp.path()).unwrap();

    let err = downloader
        .download(&DatasetDescriptor::new("iris", format!("{base}/files/missing.csv")))
        .await
        .unwrap_err();
    assert!(matches!(err, RemoteError::NotFound(_)));
    assert!(!temp.path().join("iris").exists());
}
