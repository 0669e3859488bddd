use crate::page::Page;
use crate::Result;

const GET_STARTED_LINK: &str = "a[class*='getStarted']";
const NAVIGATION_MENU: &str = "nav[aria-label='Main']";
const DOCS_LINK: &str = "nav a[href='/docs/intro']";
const API_LINK: &str = "nav a[href^='/docs/api']";
const COMMUNITY_LINK: &str = "nav a[href='/community/welcome']";
const SEARCH_BUTTON: &str = "button.DocSearch";

/// The landing page.
pub struct HomePage {
    page: Page,
}

impl HomePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Underlying page, for ad-hoc assertions.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates to the site root.
    pub async fn open(&self) -> Result<()> {
        self.page.goto("/").await
    }

    /// Waits for the hero call-to-action, then reports whether it is
    /// visible.
    pub async fn is_loaded(&self) -> Result<bool> {
        self.page.wait_for_selector(GET_STARTED_LINK).await?;
        self.page.is_visible(GET_STARTED_LINK).await
    }

    pub async fn click_get_started(&self) -> Result<()> {
        self.page.click(GET_STARTED_LINK).await
    }

    pub async fn click_docs(&self) -> Result<()> {
        self.page.click(DOCS_LINK).await
    }

    pub async fn click_api(&self) -> Result<()> {
        self.page.click(API_LINK).await
    }

    pub async fn click_community(&self) -> Result<()> {
        self.page.click(COMMUNITY_LINK).await
    }

    pub async fn open_search(&self) -> Result<()> {
        self.page.click(SEARCH_BUTTON).await
    }

    /// Whether the main navigation bar is rendered.
    pub async fn navigation_visible(&self) -> Result<bool> {
        self.page.is_visible(NAVIGATION_MENU).await
    }
}
