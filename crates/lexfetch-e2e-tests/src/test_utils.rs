use eyre::Result;
use lexfetch_lib::config::Config;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Defaults with throttling disabled and small write chunks so tests stay fast.
pub fn create_test_config(output_dir: &Path) -> Config {
    let mut config = Config::default();
    config.http.chunk_size = 8;
    config.http.listing_timeout_secs = 5;
    config.http.transfer_timeout_secs = 5;
    config.tree_host.request_delay_ms = 0;
    config.tree_host.output_dir = output_dir.join("caselaw");
    config.object_store.output_dir = output_dir.join("courtlistener");
    config
}

/// Points every object-store endpoint at `server_uri`.
pub fn point_object_store_at(config: &mut Config, server_uri: &str) {
    config.object_store.listing_page_url = format!("{server_uri}/list.html?prefix=bulk-data/");
    config.object_store.bucket_url_template = format!("{server_uri}/buckets/{{bucket}}/");
    config.object_store.bucket_base_url = format!("{server_uri}/s3/");
    config.object_store.storage_base_url = format!("{server_uri}/storage/bulk-data/");
}

pub fn write_config(dir: &Path, config: &Config) -> Result<PathBuf> {
    let config_path = dir.join("lexfetch.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(config)?)?;
    Ok(config_path)
}

pub async fn mount_body(server: &MockServer, page_path: &str, body: impl Into<Vec<u8>>) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.into()))
        .mount(server)
        .await;
}

pub fn bucket_listing(keys: &[&str]) -> String {
    let contents = keys
        .iter()
        .map(|key| format!("<Contents><Key>{key}</Key><Size>1</Size></Contents>"))
        .collect::<String>();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><ListBucketResult><Name>test</Name>{contents}</ListBucketResult>"
    )
}

/// Accepts connections forever, answering each with a `Content-Length` larger than the
/// bytes actually sent, then closing. Clients see the body stream fail mid-transfer.
pub async fn spawn_truncating_server(sent: &'static [u8], declared_len: usize) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {declared_len}\r\nConnection: close\r\n\r\n"
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(sent).await;
            let _ = socket.flush().await;
        }
    });
    Ok(format!("http://{addr}"))
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("lexfetch_lib=debug,lexfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
