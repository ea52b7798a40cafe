use lexfetch_e2e_tests::{
    create_test_config, init_tracing, mount_body, spawn_truncating_server, write_config,
};
use lexfetch_lib::cli::{Command, ResolvedCommand, TreeHostParams, resolve_command, run_tree_host};
use lexfetch_lib::download::DownloadSummary;
use wiremock::MockServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn build_tree_host_params(
    config_path: &str,
    base_url: &str,
    limit: Option<usize>,
) -> TreeHostParams {
    let command = Command::TreeHost {
        config_path: Some(config_path.to_string()),
        output_dir: None,
        limit,
        base_url: Some(base_url.to_string()),
    };
    match resolve_command(command).expect("Failed to resolve tree-host command") {
        ResolvedCommand::TreeHost(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

/// Root lists one reporter whose archives are `a.tar` (served normally) and
/// `b.tar` (served by a server that hangs up mid-body).
async fn setup_reporter_with_failing_archive(server: &MockServer) -> String {
    let truncating_base = spawn_truncating_server(b"first bytes of b", 1 << 20)
        .await
        .expect("Failed to start truncating server");

    mount_body(
        server,
        "/",
        r#"<html><body><a href="../">../</a><a href="ReportersMetadata.json">meta</a><a href="rep/">rep/</a></body></html>"#,
    )
    .await;
    mount_body(
        server,
        "/rep/",
        format!(
            r#"<a href="CasesMetadata.json">meta</a><a href="a.tar">a.tar</a><a href="{truncating_base}/rep/b.tar">b.tar</a>"#
        ),
    )
    .await;
    mount_body(server, "/rep/a.tar", b"archive a contents".to_vec()).await;

    format!("{}/", server.uri())
}

#[tokio::test]
async fn test_mirror_counts_success_and_mid_stream_failure() {
    init_tracing();

    let server = MockServer::start().await;
    let base_url = setup_reporter_with_failing_archive(&server).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(temp_dir.path());
    let config_path = write_config(temp_dir.path(), &config).expect("Failed to write config");

    let params = build_tree_host_params(config_path.to_str().unwrap(), &base_url, None);
    let output_dir = params.output_dir.clone();

    let summary = run_tree_host(params).await.expect("Mirror run should succeed");

    assert_eq!(
        summary,
        DownloadSummary {
            downloaded: 1,
            skipped: 0,
            failed: 1,
        }
    );
    assert_eq!(
        std::fs::read(output_dir.join("rep/a.tar")).unwrap(),
        b"archive a contents"
    );
    assert!(
        !output_dir.join("rep/b.tar").exists(),
        "Failed transfer must not leave a partial file"
    );
}

#[tokio::test]
async fn test_rerun_skips_completed_and_retries_failed() {
    init_tracing();

    let server = MockServer::start().await;
    let base_url = setup_reporter_with_failing_archive(&server).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(temp_dir.path());
    let config_path = write_config(temp_dir.path(), &config).expect("Failed to write config");
    let config_path = config_path.to_str().unwrap();

    let first = run_tree_host(build_tree_host_params(config_path, &base_url, None))
        .await
        .expect("First run should succeed");
    let second = run_tree_host(build_tree_host_params(config_path, &base_url, None))
        .await
        .expect("Second run should succeed");

    assert_eq!(first.downloaded, 1);
    assert_eq!(
        second,
        DownloadSummary {
            downloaded: 0,
            skipped: 1,
            failed: 1,
        }
    );
}

#[tokio::test]
async fn test_limit_restricts_reporters() {
    init_tracing();

    let server = MockServer::start().await;
    mount_body(
        &server,
        "/",
        r#"<a href="first/">first/</a><a href="second/">second/</a>"#,
    )
    .await;
    mount_body(&server, "/first/", r#"<a href="1.tar">1.tar</a>"#).await;
    mount_body(&server, "/first/1.tar", b"one".to_vec()).await;
    Mock::given(method("GET"))
        .and(path("/second/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(temp_dir.path());
    let config_path = write_config(temp_dir.path(), &config).expect("Failed to write config");

    let params = build_tree_host_params(
        config_path.to_str().unwrap(),
        &format!("{}/", server.uri()),
        Some(1),
    );
    let output_dir = params.output_dir.clone();
    let summary = run_tree_host(params).await.expect("Mirror run should succeed");

    assert_eq!(summary.downloaded, 1);
    assert!(output_dir.join("first/1.tar").exists());
    assert!(!output_dir.join("second").exists());
}

#[tokio::test]
async fn test_unreachable_root_is_discovery_error() {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(temp_dir.path());
    let config_path = write_config(temp_dir.path(), &config).expect("Failed to write config");

    let params = build_tree_host_params(
        config_path.to_str().unwrap(),
        &format!("{}/", server.uri()),
        None,
    );
    let result = run_tree_host(params).await;

    assert!(matches!(
        result,
        Err(lexfetch_lib::LexFetchError::Discovery { .. })
    ));
}
