//! The fragment loader.

use std::sync::Arc;

use futures::future::join_all;

use lintel_fetch::{append_param, cache_buster, FetchError, Source};
use lintel_html::{extract_scripts, Document};

/// A known placeholder: the mount element's id and the fragment URL that
/// fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Id of the placeholder element.
    pub id: String,
    /// Site-relative URL of the fragment.
    pub fragment: String,
}

impl Mount {
    pub fn new(id: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fragment: fragment.into(),
        }
    }

    /// The site's standard mounts: navbar and footer.
    pub fn defaults() -> Vec<Mount> {
        vec![
            Mount::new("navbar-placeholder", "/components/navbar.html"),
            Mount::new("footer-placeholder", "/components/footer.html"),
        ]
    }
}

/// Outcome of one assembly pass. Per-load failures are logged and listed
/// here; they never abort sibling loads or the pass itself.
#[derive(Debug, Default)]
pub struct AssembleReport {
    /// Fragment URLs applied to their mounts.
    pub loaded: Vec<String>,
    /// Fragment URLs whose load failed.
    pub failed: Vec<String>,
}

type AfterLoad = Box<dyn Fn(&mut Document) + Send + Sync>;

/// Loads fragments into placeholder mounts.
pub struct Assembler {
    source: Arc<dyn Source>,
    mounts: Vec<Mount>,
    cache_bust: bool,
    after_load: Option<AfterLoad>,
}

impl Assembler {
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self {
            source,
            mounts: Mount::defaults(),
            cache_bust: true,
            after_load: None,
        }
    }

    /// Replace the mount table.
    pub fn with_mounts(mut self, mounts: Vec<Mount>) -> Self {
        self.mounts = mounts;
        self
    }

    /// Toggle the per-pass cache-busting parameter.
    pub fn with_cache_bust(mut self, on: bool) -> Self {
        self.cache_bust = on;
        self
    }

    /// Register a callback invoked once per assembly pass, after every
    /// issued load has settled — successes and failures alike. This is
    /// the place for wiring that needs the injected navbar to exist.
    pub fn with_after_load(
        mut self,
        hook: impl Fn(&mut Document) + Send + Sync + 'static,
    ) -> Self {
        self.after_load = Some(Box::new(hook));
        self
    }

    /// Load one fragment and inject it into the mount with id
    /// `target_id`. A missing mount is a tolerated condition (warned, not
    /// an error); a failed fetch is returned for the caller to report.
    pub async fn load_fragment(
        &self,
        doc: &mut Document,
        url: &str,
        target_id: &str,
    ) -> Result<(), FetchError> {
        let fragment = self.source.fetch(url).await?;
        self.inject(doc, target_id, &fragment);
        Ok(())
    }

    /// Fill every known mount present in the document.
    ///
    /// All loads of one pass share a single cache-busting parameter and
    /// run concurrently. The pass waits for all of them to settle and
    /// logs each failure individually rather than failing fast, so one
    /// fragment's failure never suppresses another's success.
    pub async fn assemble(&self, doc: &mut Document) -> AssembleReport {
        let buster = cache_buster();
        let pending: Vec<(String, String)> = self
            .mounts
            .iter()
            .filter(|m| doc.has_element(&m.id))
            .map(|m| {
                let url = if self.cache_bust {
                    append_param(&m.fragment, &buster)
                } else {
                    m.fragment.clone()
                };
                (m.id.clone(), url)
            })
            .collect();

        let fetches = pending.iter().map(|(_, url)| {
            let source = Arc::clone(&self.source);
            let url = url.clone();
            async move { source.fetch(&url).await }
        });
        let results = join_all(fetches).await;

        let mut report = AssembleReport::default();
        for ((id, url), result) in pending.into_iter().zip(results) {
            match result {
                Ok(fragment) => {
                    self.inject(doc, &id, &fragment);
                    report.loaded.push(url);
                }
                Err(e) => {
                    tracing::error!("error loading fragment: {}", e);
                    report.failed.push(url);
                }
            }
        }

        if let Some(hook) = &self.after_load {
            hook(doc);
        }

        report
    }

    fn inject(&self, doc: &mut Document, target_id: &str, fragment: &str) {
        if !doc.set_inner_html(target_id, fragment) {
            tracing::warn!("target element #{} not found", target_id);
            return;
        }
        // Injected markup never executes its scripts; re-create each one
        // at the end of the body.
        for script in extract_scripts(fragment) {
            if !doc.append_to_body(&script.markup()) {
                tracing::warn!("document has no body to receive scripts");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_fetch::MemorySource;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<html><head><title>t</title></head><body>
<div id="navbar-placeholder"></div>
<main>content</main>
<div id="footer-placeholder"></div>
</body></html>"#;

    fn source() -> MemorySource {
        MemorySource::new()
            .with("/components/navbar.html", "<nav>menu</nav>")
            .with("/components/footer.html", "<footer>fine print</footer>")
    }

    #[tokio::test]
    async fn fills_every_present_mount() {
        let assembler = Assembler::new(Arc::new(source()));
        let mut doc = Document::new(PAGE);

        let report = assembler.assemble(&mut doc).await;

        assert_eq!(report.loaded.len(), 2);
        assert!(report.failed.is_empty());
        assert_eq!(doc.inner_html("navbar-placeholder"), Some("<nav>menu</nav>"));
        assert_eq!(
            doc.inner_html("footer-placeholder"),
            Some("<footer>fine print</footer>")
        );
    }

    #[tokio::test]
    async fn absent_mounts_are_skipped_without_error() {
        let assembler = Assembler::new(Arc::new(source()));
        let mut doc = Document::new(
            r#"<html><body><div id="footer-placeholder"></div></body></html>"#,
        );

        let report = assembler.assemble(&mut doc).await;

        assert_eq!(report.loaded.len(), 1);
        assert!(report.loaded[0].starts_with("/components/footer.html"));
        assert!(!doc.html().contains("<nav>"));
    }

    #[tokio::test]
    async fn reexecutes_inline_fragment_scripts() {
        let source = MemorySource::new()
            .with(
                "/components/navbar.html",
                r#"<nav>menu</nav><script type="text/javascript">navToggle();</script>"#,
            )
            .with("/components/footer.html", "<footer></footer>");
        let assembler = Assembler::new(Arc::new(source));
        let mut doc = Document::new(PAGE);

        assembler.assemble(&mut doc).await;

        // Exactly one re-created copy, appended to the body.
        let html = doc.html();
        assert_eq!(html.matches("<script>navToggle();</script>").count(), 1);
        let appended = html.find("<script>navToggle();</script>").unwrap();
        let footer_mount = html.find("footer-placeholder").unwrap();
        assert!(appended > footer_mount);
    }

    #[tokio::test]
    async fn reexecutes_external_fragment_scripts() {
        let source = MemorySource::new()
            .with(
                "/components/navbar.html",
                "<nav></nav><script src='/assets/js/nav.js'></script>",
            )
            .with("/components/footer.html", "<footer></footer>");
        let assembler = Assembler::new(Arc::new(source));
        let mut doc = Document::new(PAGE);

        assembler.assemble(&mut doc).await;

        assert_eq!(
            doc.html()
                .matches(r#"<script src="/assets/js/nav.js"></script>"#)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_suppress_the_other() {
        let source = MemorySource::new()
            .with("/components/navbar.html", "<nav>menu</nav>")
            .with_status("/components/footer.html", "500 Internal Server Error");
        let assembler = Assembler::new(Arc::new(source))
            .with_after_load(|doc| {
                doc.set_body_attr("data-nav-ready", "1");
            });
        let mut doc = Document::new(PAGE);

        let report = assembler.assemble(&mut doc).await;

        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(doc.inner_html("navbar-placeholder"), Some("<nav>menu</nav>"));
        assert_eq!(doc.inner_html("footer-placeholder"), Some(""));
        // The hook still fired after both loads settled.
        assert!(doc.html().contains(r#"data-nav-ready="1""#));
    }

    #[tokio::test]
    async fn loads_share_one_cache_buster_per_pass() {
        use std::sync::Mutex;

        struct Recording {
            inner: MemorySource,
            seen: Mutex<Vec<String>>,
        }

        #[async_trait::async_trait]
        impl Source for Recording {
            async fn fetch(&self, url: &str) -> Result<String, FetchError> {
                self.seen.lock().unwrap().push(url.to_string());
                self.inner.fetch(url).await
            }
        }

        let recording = Arc::new(Recording {
            inner: source(),
            seen: Mutex::new(Vec::new()),
        });
        let assembler = Assembler::new(Arc::clone(&recording) as Arc<dyn Source>);
        let mut doc = Document::new(PAGE);

        assembler.assemble(&mut doc).await;

        let seen = recording.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        let buster = seen[0].split("?v=").nth(1).unwrap();
        assert!(buster.parse::<u128>().is_ok());
        assert!(seen[1].ends_with(&format!("?v={}", buster)));
    }

    #[tokio::test]
    async fn cache_bust_can_be_disabled() {
        let assembler = Assembler::new(Arc::new(source())).with_cache_bust(false);
        let mut doc = Document::new(PAGE);

        let report = assembler.assemble(&mut doc).await;

        assert_eq!(report.loaded, vec![
            "/components/navbar.html".to_string(),
            "/components/footer.html".to_string(),
        ]);
    }

    #[tokio::test]
    async fn load_fragment_tolerates_missing_target() {
        let assembler = Assembler::new(Arc::new(source()));
        let mut doc = Document::new("<html><body><p>bare</p></body></html>");
        let before = doc.html().to_string();

        assembler
            .load_fragment(&mut doc, "/components/navbar.html", "navbar-placeholder")
            .await
            .unwrap();

        assert_eq!(doc.html(), before);
    }
}
