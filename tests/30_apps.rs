mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn anonymous_app_requests_redirect_to_login() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.client();

    for path in ["/transformations", "/transformations/style.css", "/not-a-real-app"] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(common::location(&res), Some("/login"), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_app_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/not-a-real-app")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "App not found");

    let res = client.get(server.url("/not-a-real-app/style.css")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "App not found");
    Ok(())
}

#[tokio::test]
async fn app_root_serves_index() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/transformations")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "<h1>Transformations</h1>");

    let res = client.get(server.url("/pythagoras")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await?.contains("a² + b² = c²"));
    Ok(())
}

#[tokio::test]
async fn app_files_are_served() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/transformations/style.css")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "body { margin: 0; }");

    let res = client.get(server.url("/transformations/assets/app.js")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "console.log('reflect');");
    Ok(())
}

#[tokio::test]
async fn missing_file_in_valid_app_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/transformations/missing.js")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn directory_inside_app_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/transformations/assets")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Not found");
    Ok(())
}

#[tokio::test]
async fn registered_app_without_files_is_not_found() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    // volume-shapes is in the catalog but the fixture tree has no directory for it
    let res = client.get(server.url("/volume-shapes")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn traversal_never_leaves_app_directory() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let client = server.signed_in_client().await?;

    let res = client
        .get(server.url("/transformations/..%2Fanswers.txt"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(!res.text().await?.contains("answer key"));

    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_out_of_app_is_forbidden() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    std::os::unix::fs::symlink(
        server.static_root.join("answers.txt"),
        server.static_root.join("transformations/leak.txt"),
    )?;
    let client = server.signed_in_client().await?;

    let res = client.get(server.url("/transformations/leak.txt")).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert!(!res.text().await?.contains("answer key"));
    Ok(())
}
