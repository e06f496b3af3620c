mod common;

use common::{file_url, setup_remote_repo, test_config};
use nice_clone::git::Git2Client;
use nice_clone::service::{CloneOptions, CloneRequest, CloneService};
use nice_clone::status::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn git2_service(base: &std::path::Path) -> CloneService {
    CloneService::new(
        &test_config(base, Duration::from_secs(60)),
        Arc::new(Git2Client::new()),
    )
}

#[tokio::test]
async fn test_clone_from_local_remote() -> Result<(), Box<dyn std::error::Error>> {
    let (_remote, url) = setup_remote_repo()?;
    let base = tempdir()?;
    let service = git2_service(base.path());

    let result = service
        .clone_repo(
            CloneRequest::new(url).with_dir_name("checkout"),
            CloneOptions::default(),
        )
        .await?;

    assert_eq!(result.target_path, base.path().join("checkout"));
    assert!(result.target_path.join(".git").exists());
    assert_eq!(
        std::fs::read_to_string(result.target_path.join("README.md"))?,
        "hello"
    );
    Ok(())
}

#[tokio::test]
async fn test_second_clone_into_same_dir_is_already_exists(
) -> Result<(), Box<dyn std::error::Error>> {
    let (_remote, url) = setup_remote_repo()?;
    let base = tempdir()?;
    let service = git2_service(base.path());
    let request = CloneRequest::new(url).with_dir_name("checkout");

    service
        .clone_repo(request.clone(), CloneOptions::default())
        .await?;
    let err = service
        .clone_repo(request, CloneOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::AlreadyExists);
    Ok(())
}

#[tokio::test]
async fn test_missing_remote_is_clone_failed() -> Result<(), Box<dyn std::error::Error>> {
    let scratch = tempdir()?;
    let url = file_url(scratch.path().join("no-such-remote"));
    let base = tempdir()?;
    let service = git2_service(base.path());

    let err = service
        .clone_repo(CloneRequest::new(url), CloneOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), StatusCode::CloneFailed);
    assert!(err.public_message().starts_with("clone failed: "));
    Ok(())
}
