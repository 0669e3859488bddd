use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page as CdpPage, ScreenshotParams};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{Result, TestkitError};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A browser tab with the common page operations, each a thin delegation to
/// the DevTools protocol decorated with logging.
///
/// Relative paths passed to [`Page::goto`] are joined onto the session's base
/// URL; absolute URLs are used as-is. Wait operations poll at 100 ms against
/// the configured action timeout.
#[derive(Clone)]
pub struct Page {
    inner: CdpPage,
    base_url: String,
    action_timeout: Duration,
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_owned()
    } else if path.is_empty() {
        base.to_owned()
    } else if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// CSS selectors get spliced into injected JS; JSON-encode so quotes and
// backslashes survive.
fn js_quote(selector: &str) -> String {
    serde_json::to_string(selector).unwrap_or_else(|_| "\"\"".to_owned())
}

impl Page {
    pub(crate) fn new(inner: CdpPage, base_url: String, action_timeout: Duration) -> Self {
        Self {
            inner,
            base_url,
            action_timeout,
        }
    }

    /// Navigates to `path` under the base URL and waits for the load to
    /// settle.
    pub async fn goto(&self, path: &str) -> Result<()> {
        let url = join_url(&self.base_url, path);
        info!("navigating to {url}");
        self.inner.goto(url).await?;
        self.inner.wait_for_navigation().await?;
        Ok(())
    }

    /// Current document title, empty when the page has none.
    pub async fn title(&self) -> Result<String> {
        let title = self.inner.get_title().await?.unwrap_or_default();
        debug!("page title: {title}");
        Ok(title)
    }

    /// URL of the current document.
    pub async fn current_url(&self) -> Result<String> {
        let url = self.inner.url().await?.unwrap_or_default();
        debug!("current url: {url}");
        Ok(url)
    }

    /// Reloads the current document.
    pub async fn reload(&self) -> Result<()> {
        info!("reloading page");
        self.inner.reload().await?;
        Ok(())
    }

    /// Clicks the first element matching `selector`.
    pub async fn click(&self, selector: &str) -> Result<()> {
        info!("clicking {selector}");
        self.inner.find_element(selector).await?.click().await?;
        Ok(())
    }

    /// Focuses the first element matching `selector` and types `text` into
    /// it.
    pub async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        info!("filling {selector}");
        let element = self.inner.find_element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Inner text of the first element matching `selector`.
    pub async fn text(&self, selector: &str) -> Result<String> {
        let text = self
            .inner
            .find_element(selector)
            .await?
            .inner_text()
            .await?
            .unwrap_or_default();
        debug!("text of {selector}: {text}");
        Ok(text)
    }

    /// Number of elements matching `selector`.
    pub async fn element_count(&self, selector: &str) -> Result<usize> {
        // The protocol sometimes reports an empty match set as an error;
        // either way the count is zero.
        let count = match self.inner.find_elements(selector).await {
            Ok(elements) => elements.len(),
            Err(_) => 0,
        };
        debug!("element count for {selector}: {count}");
        Ok(count)
    }

    /// Whether any element matches `selector`.
    pub async fn element_exists(&self, selector: &str) -> Result<bool> {
        Ok(self.element_count(selector).await? > 0)
    }

    /// Whether the first element matching `selector` is rendered with a
    /// non-empty box.
    pub async fn is_visible(&self, selector: &str) -> Result<bool> {
        let js = format!(
            "(() => {{ const el = document.querySelector({sel}); if (!el) return false; \
             const r = el.getBoundingClientRect(); return r.width > 0 && r.height > 0; }})()",
            sel = js_quote(selector)
        );
        let visible = self
            .inner
            .evaluate(js)
            .await?
            .into_value::<bool>()
            .map_err(|err| TestkitError::Decode(format!("visibility probe: {err}")))?;
        debug!("visibility of {selector}: {visible}");
        Ok(visible)
    }

    /// Waits up to the action timeout for `selector` to become visible.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        self.wait_for_selector_within(selector, self.action_timeout)
            .await
    }

    /// Waits up to `timeout` for `selector` to become visible.
    pub async fn wait_for_selector_within(&self, selector: &str, timeout: Duration) -> Result<()> {
        debug!("waiting for {selector} to be visible");
        self.poll(timeout, selector, || async {
            self.is_visible(selector).await
        })
        .await
    }

    /// Waits up to the action timeout for `selector` to disappear or become
    /// invisible.
    pub async fn wait_for_hidden(&self, selector: &str) -> Result<()> {
        debug!("waiting for {selector} to be hidden");
        self.poll(self.action_timeout, selector, || async {
            Ok(!self.is_visible(selector).await?)
        })
        .await
    }

    async fn poll<F, Fut>(&self, timeout: Duration, selector: &str, condition: F) -> Result<()>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<bool>>,
    {
        let start = tokio::time::Instant::now();
        loop {
            if condition().await? {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(TestkitError::WaitTimeout {
                    selector: selector.to_owned(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Scrolls the first element matching `selector` into view.
    pub async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        debug!("scrolling {selector} into view");
        self.inner
            .find_element(selector)
            .await?
            .scroll_into_view()
            .await?;
        Ok(())
    }

    /// PNG screenshot of the viewport, or of the whole document when
    /// `full_page` is set.
    pub async fn screenshot_bytes(&self, full_page: bool) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();
        Ok(self.inner.screenshot(params).await?)
    }

    /// PNG screenshot of the first element matching `selector`.
    pub async fn element_screenshot_bytes(&self, selector: &str) -> Result<Vec<u8>> {
        let element = self.inner.find_element(selector).await?;
        Ok(element.screenshot(CaptureScreenshotFormat::Png).await?)
    }

    /// Evaluates `js` in the page and decodes the result as a string.
    pub async fn evaluate_string(&self, js: &str) -> Result<String> {
        self.inner
            .evaluate(js)
            .await?
            .into_value::<String>()
            .map_err(|err| TestkitError::Decode(format!("evaluate result: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{join_url, js_quote};

    #[test]
    fn relative_paths_join_onto_the_base() {
        assert_eq!(
            join_url("https://playwright.dev", "/docs/intro"),
            "https://playwright.dev/docs/intro"
        );
        assert_eq!(
            join_url("https://playwright.dev", "docs/intro"),
            "https://playwright.dev/docs/intro"
        );
        assert_eq!(join_url("https://playwright.dev", ""), "https://playwright.dev");
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            join_url("https://playwright.dev", "https://example.com/x"),
            "https://example.com/x"
        );
        assert_eq!(
            join_url("https://playwright.dev", "http://example.com"),
            "http://example.com"
        );
    }

    #[test]
    fn selectors_are_json_escaped_for_injection() {
        assert_eq!(js_quote("a[href='/x']"), r#""a[href='/x']""#);
        assert_eq!(js_quote(r#"a[name="q"]"#), r#""a[name=\"q\"]""#);
    }
}
