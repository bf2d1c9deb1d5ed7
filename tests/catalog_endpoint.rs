//! Boots the site router on an ephemeral port and exercises the catalog
//! endpoint, the image mount and the pages over real HTTP.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use suitcase::catalog::CatalogLoader;
use suitcase::server::router;
use tokio::net::TcpListener;

async fn spawn_site(dir: PathBuf) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router(dir)).await.expect("serve");
    });
    format!("http://{addr}")
}

// For the blocking loader, which must not run inside a tokio context.
fn spawn_site_in_thread(dir: PathBuf) -> String {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        runtime.block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            tx.send(listener.local_addr().expect("addr")).expect("send addr");
            axum::serve(listener, router(dir)).await.expect("serve");
        });
    });
    format!("http://{}", rx.recv().expect("site address"))
}

fn fixture(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), name.as_bytes()).expect("write fixture");
    }
}

#[tokio::test]
async fn lists_three_images_and_skips_the_video() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["mercado.png", "bacalar.jpg", "oaxaca.webp", "drone.mov"]);
    let base = spawn_site(dir.path().to_path_buf()).await;

    let response = reqwest::get(format!("{base}/api/images")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "images": ["bacalar.jpg", "mercado.png", "oaxaca.webp"] }));
}

#[tokio::test]
async fn missing_directory_is_an_empty_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = spawn_site(dir.path().join("section1")).await;

    let response = reqwest::get(format!("{base}/api/images")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body, serde_json::json!({ "images": [] }));
}

#[tokio::test]
async fn unreadable_directory_is_a_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["section1"]);
    let base = spawn_site(dir.path().join("section1")).await;

    let response = reqwest::get(format!("{base}/api/images")).await.expect("request");
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "Failed to read images directory");
}

#[tokio::test]
async fn listing_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["b.GIF", "a.JPEG", "c.png"]);
    let base = spawn_site(dir.path().to_path_buf()).await;

    let first = reqwest::get(format!("{base}/api/images")).await.expect("request").text().await.expect("body");
    let second = reqwest::get(format!("{base}/api/images")).await.expect("request").text().await.expect("body");
    assert_eq!(first, second);
}

#[tokio::test]
async fn catalog_images_are_served_raw() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["coyoacan.jpg"]);
    let base = spawn_site(dir.path().to_path_buf()).await;

    let bytes = reqwest::get(format!("{base}/images/section1/coyoacan.jpg"))
        .await
        .expect("request")
        .bytes()
        .await
        .expect("body");
    assert_eq!(&bytes[..], b"coyoacan.jpg");
}

#[tokio::test]
async fn pages_render() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = spawn_site(dir.path().to_path_buf()).await;

    for (route, marker) in [
        ("/", "Coming Soon"),
        ("/about", "Our Mission"),
        ("/services", "Services"),
        ("/work", "Work"),
    ] {
        let response = reqwest::get(format!("{base}{route}")).await.expect("request");
        assert_eq!(response.status(), reqwest::StatusCode::OK, "{route}");
        let html = response.text().await.expect("body");
        assert!(html.contains(marker), "{route} is missing {marker}");
    }
}

#[test]
fn loader_reads_the_catalog_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["2.png", "1.jpg"]);
    let base = spawn_site_in_thread(dir.path().to_path_buf());

    let loader = CatalogLoader::new(&base, Duration::from_secs(5)).expect("client");
    let catalog = loader.load();
    assert_eq!(catalog.images(), ["1.jpg", "2.png"]);
    assert_eq!(loader.fetch_image("1.jpg").expect("image"), b"1.jpg");
}

#[test]
fn loader_treats_server_errors_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    fixture(dir.path(), &["section1"]);
    let base = spawn_site_in_thread(dir.path().join("section1"));

    let loader = CatalogLoader::new(&base, Duration::from_secs(5)).expect("client");
    assert!(loader.load().is_empty());
    assert!(loader.fetch_image("nope.jpg").is_err());
}
