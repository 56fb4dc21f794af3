use anyhow::Result;
use sloview_testdata::config::{RouteConfig, ServeMode};
use sloview_testdata::fixtures::{LEGACY_DOCUMENT, SAMPLE_DOCUMENT};
use sloview_testdata::server::{serve_listener, DescriptorSource, Endpoint};
use sloview_testdata::{
    parse_descriptor, AppState, FileLoader, FixtureLoader, HandlerTable, HttpLoader,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use url::Url;

async fn spawn_with_table(table: HandlerTable, state: AppState) -> Result<SocketAddr> {
    let router = table.router(state)?;
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(serve_listener(listener, router, std::future::pending()));
    Ok(addr)
}

async fn spawn(state: AppState) -> Result<SocketAddr> {
    spawn_with_table(HandlerTable::from_routes(&RouteConfig::default()), state).await
}

#[tokio::test]
async fn test_descriptor_endpoint_serves_parsed_json() -> Result<()> {
    let state = AppState::prepare(
        Arc::new(FixtureLoader::sample()),
        ServeMode::Parsed,
        true,
        "*",
    )
    .await?;
    let addr = spawn(state).await?;

    let response = reqwest::get(format!("http://{}/testdata", addr)).await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response.headers()["content-type"]
        .to_str()?
        .starts_with("application/json"));

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["name"], "Nexus OSS (OCI Registry)");
    assert_eq!(body["dependencies"][0]["kind"], "eventualMax");
    assert_eq!(body["dependencies"][0]["eventualMax"], 300);
    assert!(body["dependencies"][1].get("eventualMax").is_none());
    assert_eq!(body["dependencies"][0]["slos"][1]["kind"], "MTTR");

    // What the server emits is itself a valid descriptor.
    let reparsed = parse_descriptor(&body.to_string())?;
    assert_eq!(reparsed, parse_descriptor(SAMPLE_DOCUMENT)?);
    Ok(())
}

#[tokio::test]
async fn test_headers_endpoint_echoes_request_headers() -> Result<()> {
    let state = AppState::prepare(
        Arc::new(FixtureLoader::sample()),
        ServeMode::Parsed,
        true,
        "*",
    )
    .await?;
    let addr = spawn(state).await?;

    let response = reqwest::Client::new()
        .get(format!("http://{}/headers", addr))
        .header("X-Sloview-Trace", "42")
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body = response.text().await?;
    assert!(body.contains("x-sloview-trace: 42\n"));
    assert!(body.contains(&format!("host: {}\n", addr)));
    Ok(())
}

#[tokio::test]
async fn test_raw_mode_serves_legacy_text_verbatim() -> Result<()> {
    let state = AppState::prepare(
        Arc::new(FixtureLoader::legacy()),
        ServeMode::Raw,
        true,
        "https://sloview.example.com",
    )
    .await?;
    let addr = spawn(state).await?;

    let response = reqwest::get(format!("http://{}/testdata", addr)).await?;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://sloview.example.com"
    );
    assert!(response.headers()["content-type"]
        .to_str()?
        .starts_with("text/plain"));
    assert_eq!(response.text().await?, LEGACY_DOCUMENT);
    Ok(())
}

#[tokio::test]
async fn test_live_mode_reports_document_errors() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("live.json");
    tokio::fs::write(&path, SAMPLE_DOCUMENT).await?;

    let state = AppState::prepare(
        Arc::new(FileLoader::new(&path)),
        ServeMode::Parsed,
        false,
        "*",
    )
    .await?;
    let addr = spawn(state).await?;
    let url = format!("http://{}/testdata", addr);

    let ok = reqwest::get(&url).await?;
    assert_eq!(ok.status(), 200);

    let broken = SAMPLE_DOCUMENT.replacen("\"permanent\"", "\"bogus\"", 1);
    tokio::fs::write(&path, broken).await?;
    let schema_failure = reqwest::get(&url).await?;
    assert_eq!(schema_failure.status(), 500);
    assert_eq!(schema_failure.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = schema_failure.json().await?;
    assert_eq!(body["error"], "schema");
    assert_eq!(body["path"], "dependencies[1].kind");

    tokio::fs::write(&path, LEGACY_DOCUMENT).await?;
    let syntax_failure = reqwest::get(&url).await?;
    assert_eq!(syntax_failure.status(), 500);
    let body: serde_json::Value = syntax_failure.json().await?;
    assert_eq!(body["error"], "syntax");
    assert_eq!(body["line"], 4);

    tokio::fs::remove_file(&path).await?;
    let source_failure = reqwest::get(&url).await?;
    assert_eq!(source_failure.status(), 502);
    let body: serde_json::Value = source_failure.json().await?;
    assert_eq!(body["error"], "source");
    Ok(())
}

#[tokio::test]
async fn test_live_mode_reports_unreachable_source() -> Result<()> {
    let closed = TcpListener::bind("127.0.0.1:0").await?;
    let upstream = Url::parse(&format!("http://{}/slo/nexus.json", closed.local_addr()?))?;
    drop(closed);

    let state = AppState::prepare(
        Arc::new(HttpLoader::new(upstream, Duration::from_secs(2))),
        ServeMode::Parsed,
        false,
        "*",
    )
    .await?;
    let addr = spawn(state).await?;

    let response = reqwest::get(format!("http://{}/testdata", addr)).await?;
    assert_eq!(response.status(), 502);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"], "source");
    assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_custom_handler_table() -> Result<()> {
    let state = AppState::new(
        DescriptorSource::Parsed(Arc::new(parse_descriptor(SAMPLE_DOCUMENT)?)),
        "*",
    )?;
    let table = HandlerTable::new().with("/api/v1/descriptor", Endpoint::Descriptor);
    let addr = spawn_with_table(table, state).await?;

    let found = reqwest::get(format!("http://{}/api/v1/descriptor", addr)).await?;
    assert_eq!(found.status(), 200);

    let default_route = reqwest::get(format!("http://{}/testdata", addr)).await?;
    assert_eq!(default_route.status(), 404);

    let headers_route = reqwest::get(format!("http://{}/headers", addr)).await?;
    assert_eq!(headers_route.status(), 404);
    Ok(())
}

#[tokio::test]
async fn test_descriptor_endpoint_is_get_only() -> Result<()> {
    let state = AppState::new(DescriptorSource::Raw(Arc::from(SAMPLE_DOCUMENT)), "*")?;
    let addr = spawn(state).await?;

    let response = reqwest::Client::new()
        .post(format!("http://{}/testdata", addr))
        .body("{}")
        .send()
        .await?;
    assert_eq!(response.status(), 405);
    Ok(())
}
