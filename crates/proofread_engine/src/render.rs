use markdown::{to_html_with_options, Options};
use proofread_logging::proofread_warn;

/// Provider text together with the HTML shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofreadResult {
    pub raw_text: String,
    pub rendered_html: String,
}

pub trait MarkdownRenderer: Send + Sync {
    /// `None` when there is nothing to show.
    fn to_html(&self, markdown: &str) -> Option<String>;
}

/// GFM renderer with raw HTML and unsafe link protocols disabled, so provider
/// output can only produce markdown formatting.
#[derive(Debug, Default, Clone, Copy)]
pub struct SafeMarkdownRenderer;

impl MarkdownRenderer for SafeMarkdownRenderer {
    fn to_html(&self, markdown: &str) -> Option<String> {
        let trimmed = markdown.trim();
        if trimmed.is_empty() {
            return None;
        }
        // Only MDX constructs can fail to compile and none are enabled.
        match to_html_with_options(trimmed, &safe_options()) {
            Ok(html) => Some(html),
            Err(err) => {
                proofread_warn!("Markdown rendering failed: {}", err);
                None
            }
        }
    }
}

fn safe_options() -> Options {
    let mut options = Options::gfm();
    options.compile.allow_dangerous_html = false;
    options.compile.allow_dangerous_protocol = false;
    options.compile.gfm_tagfilter = true;
    options
}

pub fn render_result(renderer: &dyn MarkdownRenderer, raw_text: &str) -> Option<ProofreadResult> {
    renderer.to_html(raw_text).map(|rendered_html| ProofreadResult {
        raw_text: raw_text.to_string(),
        rendered_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_renders_nothing() {
        assert_eq!(SafeMarkdownRenderer.to_html(""), None);
        assert_eq!(SafeMarkdownRenderer.to_html("  \n\t"), None);
        assert_eq!(render_result(&SafeMarkdownRenderer, "\n"), None);
    }
}
