use crate::page::Page;
use crate::Result;

const PATH: &str = "/docs/intro";
const HEADING: &str = "article h1";
const INSTALLATION_SECTION: &str = "h2#installation";
const SIDEBAR: &str = "aside[class*='docSidebarContainer']";

/// The "Installation" / getting-started docs page.
pub struct GettingStartedPage {
    page: Page,
}

impl GettingStartedPage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigates to the getting-started article.
    pub async fn open(&self) -> Result<()> {
        self.page.goto(PATH).await
    }

    /// Waits for the installation section, then reports whether it is
    /// visible.
    pub async fn is_loaded(&self) -> Result<bool> {
        self.page.wait_for_selector(INSTALLATION_SECTION).await?;
        self.page.is_visible(INSTALLATION_SECTION).await
    }

    /// Text of the article heading.
    pub async fn heading(&self) -> Result<String> {
        self.page.text(HEADING).await
    }

    pub async fn jump_to_installation(&self) -> Result<()> {
        self.page.scroll_into_view(INSTALLATION_SECTION).await
    }

    /// Whether the docs sidebar is rendered.
    pub async fn sidebar_visible(&self) -> Result<bool> {
        self.page.is_visible(SIDEBAR).await
    }
}
