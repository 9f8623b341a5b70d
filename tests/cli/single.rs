//! Tests for single-entry mode (`--name`) against a mock API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use crypto_box::aead::OsRng;
use crypto_box::SecretKey;
use serde_json::json;
use wiremock::MockServer;

use crate::support::*;

#[tokio::test(flavor = "multi_thread")]
async fn test_inline_value_creates_variable() {
    let t = Test::new();
    let server = MockServer::start().await;
    variables_mock(&[]).expect(1).mount(&server).await;
    create_variable_mock().expect(1).mount(&server).await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "REGION", "--value", "us-east-1"]);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_success(&output);
    assert_stdout_contains(&output, "alice/app");
    assert_stdout_contains(&output, "REGION");

    let seen = requests(&server).await;
    let post = matching(&seen, "POST", "variables");
    assert_eq!(
        json_body(post[0]),
        json!({"name": "REGION", "value": "us-east-1"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_existing_variable_is_patched() {
    let t = Test::new();
    let server = MockServer::start().await;
    variables_mock(&[("REGION", "eu-west-1")]).mount(&server).await;
    update_variable_mock("REGION").expect(1).mount(&server).await;
    create_variable_mock().expect(0).mount(&server).await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "REGION", "--value", "us-east-1"]);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_success(&output);
    assert_stdout_contains(&output, "updated");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_piped_secret_is_sealed_without_trailing_newline() {
    let t = Test::new();
    let secret = SecretKey::generate(&mut OsRng);
    let public = STANDARD.encode(secret.public_key().as_bytes());

    let server = MockServer::start().await;
    public_key_mock(&public).expect(1).mount(&server).await;
    put_secret_mock("API_TOKEN").expect(1).mount(&server).await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "API_TOKEN", "--secret"])
        .write_stdin("hunter2\n");
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_success(&output);
    assert_output_excludes(&output, "hunter2");

    let seen = requests(&server).await;
    let put = matching(&seen, "PUT", "secrets/API_TOKEN");
    let body = json_body(put[0]);
    assert_eq!(body["key_id"], KEY_ID);

    let sealed = STANDARD
        .decode(body["encrypted_value"].as_str().unwrap())
        .unwrap();
    assert_eq!(secret.unseal(&sealed).unwrap(), b"hunter2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_value_file_is_read_verbatim() {
    let t = Test::new();
    t.write("region.txt", "us-east-1\n");

    let server = MockServer::start().await;
    variables_mock(&[]).mount(&server).await;
    create_variable_mock().expect(1).mount(&server).await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "REGION", "--value-file", "region.txt"]);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_success(&output);
    let seen = requests(&server).await;
    let post = matching(&seen, "POST", "variables");
    assert_eq!(json_body(post[0])["value"], "us-east-1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_value_file_makes_no_requests() {
    let t = Test::new();
    let server = MockServer::start().await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "REGION", "--value-file", "absent.txt"]);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "absent.txt");
    assert!(requests(&server).await.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_repo_and_token_from_environment() {
    let t = Test::new();
    let server = MockServer::start().await;
    variables_mock(&[]).mount(&server).await;
    create_variable_mock().expect(1).mount(&server).await;

    let uri = server.uri();
    let mut cmd = t.cmd();
    cmd.args(["--api-url", uri.as_str(), "--name", "REGION", "--value", "x"])
        .env("GITHUB_ID", REPO)
        .env("GITHUB_REPOSITORY", "someone/else")
        .env("GH_TOKEN", TOKEN);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_success(&output);
    let seen = requests(&server).await;
    assert!(!matching(&seen, "POST", "variables").is_empty());
    assert_eq!(
        seen[0].headers.get("authorization").unwrap().to_str().unwrap(),
        format!("Bearer {}", TOKEN)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bad_credentials_exit_code() {
    let t = Test::new();
    let server = MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(error_response(401, "Bad credentials"))
        .mount(&server)
        .await;

    let mut cmd = t.cmd_against(&server.uri());
    cmd.args(["--name", "API_TOKEN", "--secret", "--value", "abc123"]);
    let output = blocking(move || cmd.output().unwrap()).await;

    assert_exit_code(&output, 5);
    assert_stderr_contains(&output, "Bad credentials");
    assert_output_excludes(&output, TOKEN);
    assert_output_excludes(&output, "abc123");
}
