// src/widgets.rs
// =============================================================================
// The callables a documentation host wires into its pages.
//
// There is one callable per widget kind:
// - gist_codeblock: a fenced code block with the gist's content
// - svg_gist: an inline SVG icon taken from a gist
//
// Both return a plain String. A broken reference renders as "Error: ..." in
// the page instead of aborting the whole documentation build. The try_*
// variants return the typed error for callers that want to react to it.
//
// `Widgets` is async. `BlockingWidgets` wraps it with its own runtime for
// hosts that call from ordinary synchronous code. Called from inside a tokio
// runtime it cannot block, so it renders an "Error: ..." string instead.
// =============================================================================

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

use crate::config::Config;
use crate::gist::{HttpFetcher, ReferenceParser, ResolveError, Resolver, ResourceCache};
use crate::lang::LanguageDetector;
use crate::render;

pub const CODEBLOCK_TARGET: &str = "gist_codeblock";
pub const SVG_TARGET: &str = "svg_gist";

/// Why a widget could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No SVG content found in {filename}")]
    NotSvg { filename: String },

    #[error("blocking widget called from inside an async runtime; use Widgets instead")]
    InsideRuntime,
}

/// Options accepted by the code block widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeblockOptions {
    /// Indent level; each level is four spaces
    pub indent: usize,
    /// Force this language tag instead of detecting one
    pub ext: Option<String>,
}

/// Outcome of rendering one reference in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderReport {
    pub reference: String,
    pub ok: bool,
    /// The rendered widget, or the "Error: ..." text
    pub output: String,
}

pub struct Widgets {
    resolver: Resolver,
    detector: LanguageDetector,
}

impl Widgets {
    pub fn new(resolver: Resolver, detector: LanguageDetector) -> Self {
        Self { resolver, detector }
    }

    /// Real network, fresh cache, default language detection.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let parser = ReferenceParser::new(&config.endpoints)?;
        let fetcher = Arc::new(HttpFetcher::new(&config.http)?);
        let resolver = Resolver::new(parser, fetcher, Arc::new(ResourceCache::new()));
        Ok(Self::new(resolver, LanguageDetector::new()))
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub async fn try_gist_codeblock(
        &self,
        reference: &str,
        options: &CodeblockOptions,
    ) -> Result<String, WidgetError> {
        debug!(target: CODEBLOCK_TARGET, reference, "=== Starting new Gist processing ===");

        let resolved = self.resolver.resolve(reference).await?;
        let language = self.detector.detect(
            &resolved.body,
            Some(&resolved.filename),
            options.ext.as_deref(),
        );
        debug!(target: CODEBLOCK_TARGET, filename = %resolved.filename, %language);

        let block = render::codeblock(&resolved.body, &language, options.indent);
        debug!(target: CODEBLOCK_TARGET, "=== Gist processing completed ===");
        Ok(block)
    }

    pub async fn gist_codeblock(&self, reference: &str, options: &CodeblockOptions) -> String {
        self.try_gist_codeblock(reference, options)
            .await
            .unwrap_or_else(codeblock_error)
    }

    pub async fn try_svg_gist(&self, reference: &str) -> Result<String, WidgetError> {
        debug!(target: SVG_TARGET, reference, "Processing SVG Gist");

        let resolved = self.resolver.resolve(reference).await?;
        if !render::is_svg(&resolved.filename) {
            return Err(WidgetError::NotSvg {
                filename: resolved.filename,
            });
        }

        let widget = render::svg_widget(&resolved.body, &resolved.filename);
        debug!(target: SVG_TARGET, filename = %resolved.filename, "SVG processing completed");
        Ok(widget)
    }

    pub async fn svg_gist(&self, reference: &str) -> String {
        self.try_svg_gist(reference).await.unwrap_or_else(svg_error)
    }

    /// Renders many code blocks concurrently, at most `concurrency` at once.
    ///
    /// Reports come back in the same order as `references`.
    pub async fn render_codeblocks(
        &self,
        references: Vec<String>,
        options: &CodeblockOptions,
        concurrency: usize,
    ) -> Vec<RenderReport> {
        stream::iter(references)
            .map(|reference| async move {
                match self.try_gist_codeblock(&reference, options).await {
                    Ok(output) => RenderReport {
                        reference,
                        ok: true,
                        output,
                    },
                    Err(err) => RenderReport {
                        output: codeblock_error(err),
                        reference,
                        ok: false,
                    },
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn codeblock_error(err: WidgetError) -> String {
    debug!(target: CODEBLOCK_TARGET, error = %err, "code block failed");
    format!("Error: {err}")
}

fn svg_error(err: WidgetError) -> String {
    debug!(target: SVG_TARGET, error = %err, "SVG widget failed");
    format!("Error: {err}")
}

/// Synchronous front for hosts without an async runtime.
pub struct BlockingWidgets {
    widgets: Widgets,
    runtime: Runtime,
}

impl BlockingWidgets {
    pub fn new(widgets: Widgets) -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { widgets, runtime })
    }

    pub fn gist_codeblock(&self, reference: &str, options: &CodeblockOptions) -> String {
        if Handle::try_current().is_ok() {
            return codeblock_error(WidgetError::InsideRuntime);
        }
        self.runtime
            .block_on(self.widgets.gist_codeblock(reference, options))
    }

    pub fn svg_gist(&self, reference: &str) -> String {
        if Handle::try_current().is_ok() {
            return svg_error(WidgetError::InsideRuntime);
        }
        self.runtime.block_on(self.widgets.svg_gist(reference))
    }

    pub fn widgets(&self) -> &Widgets {
        &self.widgets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gist::mock::StubFetcher;
    use crate::gist::Endpoints;
    use crate::lang::{ContentGuesser, Guess, GuessError};

    const SHARE: &str = "https://sharehost.example/user/123";
    const RAW: &str = "https://contenthost.example/user/123/raw/test.py";
    const PAGE: &str = r#"<a href="/user/123/raw/test.py">Raw</a>"#;

    struct NeverGuesses;

    impl ContentGuesser for NeverGuesses {
        fn guess(&self, _content: &str) -> Result<Guess, GuessError> {
            Err(GuessError("not used".to_string()))
        }
    }

    fn widgets(stub: Arc<StubFetcher>) -> Widgets {
        let parser = ReferenceParser::new(&Endpoints {
            share_host: "https://sharehost.example".to_string(),
            content_host: "https://contenthost.example".to_string(),
        })
        .unwrap();
        let resolver = Resolver::new(parser, stub, Arc::new(ResourceCache::new()));
        Widgets::new(resolver, LanguageDetector::with_guesser(NeverGuesses))
    }

    #[tokio::test]
    async fn test_codeblock_complete() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "print('test')"));
        let output = widgets(stub)
            .gist_codeblock(SHARE, &CodeblockOptions::default())
            .await;

        assert_eq!(output, "\n```python\nprint('test')\n```\n");
    }

    #[tokio::test]
    async fn test_codeblock_with_indent_and_forced_ext() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "x\ny"));
        let options = CodeblockOptions {
            indent: 1,
            ext: Some("javascript".to_string()),
        };
        let output = widgets(stub).gist_codeblock(SHARE, &options).await;

        assert_eq!(output, "\n    ```javascript\n    x\n    y\n    ```\n");
    }

    #[tokio::test]
    async fn test_language_detected_before_unescape() {
        let direct = "https://contenthost.example/user/1/raw/notes";
        let stub = Arc::new(StubFetcher::new().ok(direct, r"cost: \$5"));
        let output = widgets(stub)
            .gist_codeblock(direct, &CodeblockOptions::default())
            .await;

        assert_eq!(output, "\n```text\ncost: $5\n```\n");
    }

    #[tokio::test]
    async fn test_errors_become_text() {
        let stub = Arc::new(StubFetcher::new().status(SHARE, 404));
        let widgets = widgets(stub);

        let output = widgets
            .gist_codeblock(SHARE, &CodeblockOptions::default())
            .await;
        assert_eq!(output, "Error: Failed to fetch Gist: HTTP 404");

        let output = widgets
            .gist_codeblock("https://invalid.url", &CodeblockOptions::default())
            .await;
        assert_eq!(output, "Error: Invalid Gist URL format");
    }

    #[tokio::test]
    async fn test_try_variant_keeps_error_type() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, "<html></html>"));
        let err = widgets(stub)
            .try_gist_codeblock(SHARE, &CodeblockOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err, WidgetError::Resolve(ResolveError::RawLinkNotFound));
    }

    #[tokio::test]
    async fn test_svg_widget() {
        let share = "https://sharehost.example/user/abc";
        let raw = "https://contenthost.example/user/abc/raw/icon.svg";
        let stub = Arc::new(
            StubFetcher::new()
                .ok(share, r#"<a href="/user/abc/raw/icon.svg">Raw</a>"#)
                .ok(raw, r#"<svg width="10" height="10"><path fill="black"/></svg>"#),
        );

        let output = widgets(stub).svg_gist(share).await;

        assert!(output.contains(r#"class="custom-link-card-image""#));
        assert!(output.contains(r#"<path class="custom-link-card-icon"/>"#));
        assert!(!output.contains(r#"width="10""#));
    }

    #[tokio::test]
    async fn test_svg_widget_rejects_other_files() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "print(1)"));
        let output = widgets(stub).svg_gist(SHARE).await;
        assert_eq!(output, "Error: No SVG content found in test.py");
    }

    #[tokio::test]
    async fn test_render_many_keeps_order_and_shares_cache() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "a = 1"));
        let widgets = widgets(stub.clone());

        let references = vec![
            SHARE.to_string(),
            "https://invalid.url".to_string(),
            SHARE.to_string(),
        ];
        let reports = widgets
            .render_codeblocks(references, &CodeblockOptions::default(), 4)
            .await;

        assert_eq!(reports.len(), 3);
        assert!(reports[0].ok);
        assert!(!reports[1].ok);
        assert_eq!(reports[1].output, "Error: Invalid Gist URL format");
        assert_eq!(reports[2].output, reports[0].output);
        assert_eq!(stub.calls_to(SHARE), 1);
        assert_eq!(stub.calls_to(RAW), 1);
    }

    #[test]
    fn test_blocking_adapter() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "print('sync')"));
        let blocking = BlockingWidgets::new(widgets(stub.clone())).unwrap();

        let first = blocking.gist_codeblock(SHARE, &CodeblockOptions::default());
        let second = blocking.gist_codeblock(SHARE, &CodeblockOptions::default());

        assert_eq!(first, "\n```python\nprint('sync')\n```\n");
        assert_eq!(first, second);
        assert_eq!(stub.calls().len(), 2);
        assert_eq!(blocking.widgets().resolver().cache().len(), 1);
    }

    #[test]
    fn test_blocking_adapter_refuses_inside_runtime() {
        let stub = Arc::new(StubFetcher::new().ok(SHARE, PAGE).ok(RAW, "print('sync')"));
        let blocking = BlockingWidgets::new(widgets(stub.clone())).unwrap();
        let host = Builder::new_current_thread().build().unwrap();

        let (codeblock, svg) = host.block_on(async {
            (
                blocking.gist_codeblock(SHARE, &CodeblockOptions::default()),
                blocking.svg_gist(SHARE),
            )
        });

        let expected = format!("Error: {}", WidgetError::InsideRuntime);
        assert_eq!(codeblock, expected);
        assert_eq!(svg, expected);
        assert!(stub.calls().is_empty());

        // Outside the host runtime it works again
        let output = blocking.gist_codeblock(SHARE, &CodeblockOptions::default());
        assert_eq!(output, "\n```python\nprint('sync')\n```\n");
    }

    #[test]
    fn test_from_config() {
        let widgets = Widgets::from_config(&Config::default()).unwrap();
        assert!(widgets.resolver().cache().is_empty());
    }
}
