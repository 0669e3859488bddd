//! Live end-to-end specs against the real playwright.dev site.
//!
//! These need a Chrome binary and network access, so they only run when
//! `TESTKIT_LIVE_E2E=true` is set; otherwise each test prints a skip notice
//! and passes.

use cdp_testkit::pages::{GettingStartedPage, HomePage};
use cdp_testkit::{logging, BrowserSession, ConfigStore, Screenshots};

fn live_enabled() -> bool {
    std::env::var("TESTKIT_LIVE_E2E")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

async fn launch() -> cdp_testkit::Result<BrowserSession> {
    logging::init();
    let config = ConfigStore::from_env();
    BrowserSession::launch(&config).await
}

#[tokio::test]
async fn home_page_smoke() -> anyhow::Result<()> {
    if !live_enabled() {
        eprintln!("skipping live browser test: set TESTKIT_LIVE_E2E=true to run");
        return Ok(());
    }

    let session = launch().await?;
    let home = HomePage::new(session.new_page().await?);

    home.open().await?;
    assert!(home.is_loaded().await?);
    assert!(home.navigation_visible().await?);

    let title = home.page().title().await?;
    assert!(title.contains("Playwright"), "unexpected title: {title}");

    session.close().await;
    Ok(())
}

#[tokio::test]
async fn get_started_navigates_to_installation_docs() -> anyhow::Result<()> {
    if !live_enabled() {
        eprintln!("skipping live browser test: set TESTKIT_LIVE_E2E=true to run");
        return Ok(());
    }

    let session = launch().await?;
    let page = session.new_page().await?;
    let home = HomePage::new(page.clone());

    home.open().await?;
    assert!(home.is_loaded().await?);
    home.click_get_started().await?;

    let docs = GettingStartedPage::new(page);
    assert!(docs.is_loaded().await?);
    assert!(docs.sidebar_visible().await?);

    let heading = docs.heading().await?;
    assert!(!heading.is_empty());

    let url = docs.page().current_url().await?;
    assert!(url.contains("/docs/intro"), "unexpected url: {url}");

    session.close().await;
    Ok(())
}

#[tokio::test]
async fn failure_artifacts_are_captured() -> anyhow::Result<()> {
    if !live_enabled() {
        eprintln!("skipping live browser test: set TESTKIT_LIVE_E2E=true to run");
        return Ok(());
    }

    let session = launch().await?;
    let docs = GettingStartedPage::new(session.open("/docs/intro").await?);
    assert!(docs.is_loaded().await?);

    let dir = tempfile::tempdir()?;
    let shots = Screenshots::new(dir.path(), true);
    let saved = shots
        .capture_full(docs.page(), "getting_started")
        .await?
        .expect("enabled helper must save");
    let bytes = std::fs::read(&saved)?;
    assert!(!bytes.is_empty());

    session.close().await;
    Ok(())
}
