use lexfetch_e2e_tests::{
    bucket_listing, create_test_config, init_tracing, mount_body, point_object_store_at,
    write_config,
};
use lexfetch_lib::LexFetchError;
use lexfetch_lib::cli::{
    Command, ObjectStoreParams, ResolvedCommand, resolve_command, run_object_store,
};
use lexfetch_lib::download::DownloadSummary;
use lexfetch_lib::pipeline::ObjectStoreOutcome;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn build_object_store_params(config_path: &str) -> ObjectStoreParams {
    let command = Command::ObjectStore {
        config_path: Some(config_path.to_string()),
        output_dir: None,
        assume_yes: true,
    };
    match resolve_command(command).expect("Failed to resolve object-store command") {
        ResolvedCommand::ObjectStore(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

fn params_for(server: &MockServer, temp_dir: &tempfile::TempDir) -> ObjectStoreParams {
    let mut config = create_test_config(temp_dir.path());
    point_object_store_at(&mut config, &server.uri());
    let config_path = write_config(temp_dir.path(), &config).expect("Failed to write config");
    build_object_store_params(config_path.to_str().unwrap())
}

#[tokio::test]
async fn test_listing_page_bucket_is_used_first() {
    init_tracing();

    let server = MockServer::start().await;
    mount_body(
        &server,
        "/list.html",
        r#"<script>var BUCKET_NAME = 'test-bucket';</script>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/buckets/test-bucket/"))
        .and(query_param("prefix", "bulk-data/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bucket_listing(&[
            "bulk-data/",
            "bulk-data/dockets.csv.bz2",
            "bulk-data/README.md",
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_body(&server, "/s3/bulk-data/dockets.csv.bz2", b"dockets".to_vec()).await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let params = params_for(&server, &temp_dir);
    let output_dir = params.output_dir.clone();

    let outcome = run_object_store(params).await.expect("Run should succeed");

    assert_eq!(
        outcome,
        ObjectStoreOutcome::Completed(DownloadSummary {
            downloaded: 1,
            skipped: 0,
            failed: 0,
        })
    );
    assert_eq!(
        std::fs::read(output_dir.join("dockets.csv.bz2")).unwrap(),
        b"dockets"
    );
}

#[tokio::test]
async fn test_fallback_stops_at_first_endpoint_with_keys() {
    init_tracing();

    let server = MockServer::start().await;
    mount_body(&server, "/list.html", "<html>no bucket here</html>").await;
    Mock::given(method("GET"))
        .and(path("/s3/"))
        .and(query_param("list-type", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bucket_listing(&[])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/"))
        .and(query_param("prefix", "bulk-data/"))
        .and(query_param_is_missing("list-type"))
        .and(query_param_is_missing("delimiter"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bucket_listing(&[
            "bulk-data/opinions.csv.bz2",
            "bulk-data/nested/people.csv.bz2",
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/"))
        .and(query_param("delimiter", "/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/bulk-data/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_body(&server, "/s3/bulk-data/opinions.csv.bz2", b"opinions".to_vec()).await;
    Mock::given(method("GET"))
        .and(path("/s3/bulk-data/nested/people.csv.bz2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let params = params_for(&server, &temp_dir);
    let output_dir = params.output_dir.clone();

    let outcome = run_object_store(params).await.expect("Run should succeed");

    assert_eq!(
        outcome,
        ObjectStoreOutcome::Completed(DownloadSummary {
            downloaded: 1,
            skipped: 0,
            failed: 1,
        })
    );
    assert!(output_dir.join("opinions.csv.bz2").exists());
    assert!(!output_dir.join("people.csv.bz2").exists());
}

#[tokio::test]
async fn test_exhausted_fallback_chain_is_discovery_error() {
    init_tracing();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/list.html"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/s3/"))
        .respond_with(ResponseTemplate::new(403))
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/bulk-data/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(bucket_listing(&[
            "bulk-data/README.md",
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let params = params_for(&server, &temp_dir);

    let result = run_object_store(params).await;

    assert!(matches!(result, Err(LexFetchError::Discovery { .. })));
}
