//! Page assembly command.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use walkdir::WalkDir;

use lintel_assemble::Assembler;
use lintel_fetch::{DirSource, HttpSource, Source};
use lintel_html::Document;
use lintel_memo::{MemoRenderer, RenderConfig};

/// Configuration file structure (site.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    assemble: AssembleSettings,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    /// Fragment and data source: a directory or an http(s) base URL
    #[serde(default = "default_root")]
    root: String,
    #[serde(default = "default_pages")]
    pages: String,
    #[serde(default = "default_output")]
    output: String,
    /// Origin for canonical URLs
    #[serde(default = "default_origin")]
    origin: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            pages: default_pages(),
            output: default_output(),
            origin: default_origin(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssembleSettings {
    #[serde(default = "default_cache_bust")]
    cache_bust: bool,
}

impl Default for AssembleSettings {
    fn default() -> Self {
        Self {
            cache_bust: default_cache_bust(),
        }
    }
}

fn default_root() -> String {
    ".".to_string()
}
fn default_pages() -> String {
    "pages".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_origin() -> String {
    "https://pengandy.com".to_string()
}
fn default_cache_bust() -> bool {
    true
}

/// Load configuration from site.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Output directory named in site.toml (or the default when the file or
/// the setting is absent).
pub(crate) fn configured_output(config_path: &Path) -> Result<PathBuf> {
    let config = load_config(config_path)?;
    Ok(PathBuf::from(config.site.output))
}

/// Pick a source for fragments and data files based on the site root.
fn make_source(root: &str) -> Result<Arc<dyn Source>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(root)?))
    } else {
        Ok(Arc::new(DirSource::new(root)))
    }
}

/// Run the assemble command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, cache_bust: bool) -> Result<()> {
    tracing::info!("Assembling pages...");
    let start = Instant::now();

    let file_config = load_config(config_path)?;
    let site = &file_config.site;

    let pages_dir = PathBuf::from(&site.pages);
    if !pages_dir.exists() {
        anyhow::bail!(
            "Pages directory not found: {}. Run 'lintel init' first.",
            pages_dir.display()
        );
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from(&site.output));
    let source = make_source(&site.root)?;
    let assembler = Assembler::new(Arc::clone(&source))
        .with_cache_bust(cache_bust && file_config.assemble.cache_bust);

    let mut pages = 0usize;
    let mut fragments = 0usize;

    for entry in WalkDir::new(&pages_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("html") {
            continue;
        }

        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut doc = Document::new(html);

        let report = assembler.assemble(&mut doc).await;
        fragments += report.loaded.len();

        // A memo page names its data file on the content container.
        if let Some(data_file) = doc.attr("memo-content", "data-memo") {
            let config = RenderConfig::new(data_file).with_site_origin(site.origin.as_str());
            MemoRenderer::new(config, Arc::clone(&source))
                .render(&mut doc)
                .await;
        }

        let relative = path.strip_prefix(&pages_dir).unwrap_or(path);
        let out_path = output_dir.join(relative);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&out_path, doc.html())
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        pages += 1;
    }

    tracing::info!(
        "Assembled {} pages ({} fragment loads) in {}ms",
        pages,
        fragments,
        start.elapsed().as_millis()
    );
    tracing::info!("Output: {}", output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[site]
root = "site"
pages = "site/pages"
output = "out"
origin = "https://example.com"

[assemble]
cache_bust = false
"#,
        )
        .unwrap();

        assert_eq!(config.site.root, "site");
        assert_eq!(config.site.origin, "https://example.com");
        assert!(!config.assemble.cache_bust);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: ConfigFile = toml::from_str("").unwrap();

        assert_eq!(config.site.root, ".");
        assert_eq!(config.site.pages, "pages");
        assert_eq!(config.site.output, "dist");
        assert!(config.assemble.cache_bust);
    }

    #[test]
    fn configured_output_falls_back_to_default() {
        let output = configured_output(Path::new("no-such-site.toml")).unwrap();
        assert_eq!(output, PathBuf::from("dist"));
    }

    #[tokio::test]
    async fn assembles_a_site_end_to_end() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        let components = root.join("components");
        let pages = root.join("pages");
        let data = root.join("data");
        fs::create_dir_all(&components).unwrap();
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&data).unwrap();

        fs::write(
            components.join("navbar.html"),
            "<nav>menu</nav><script>navToggle();</script>",
        )
        .unwrap();
        fs::write(components.join("footer.html"), "<footer>fin</footer>").unwrap();
        fs::write(
            data.join("posts.json"),
            r#"{
                "tableType": "bootstrap",
                "title": "Memos",
                "pageId": "memos",
                "items": [{"date": "2024-03-01", "url": "/posts/a.html", "title": "A"}]
            }"#,
        )
        .unwrap();
        fs::write(
            pages.join("memo.html"),
            r#"<html><head><title>t</title></head><body>
<div id="navbar-placeholder"></div>
<main id="memo-content" data-memo="/data/posts.json"></main>
<div id="footer-placeholder"></div>
</body></html>"#,
        )
        .unwrap();

        let config_path = root.join("site.toml");
        fs::write(
            &config_path,
            format!(
                r#"
[site]
root = "{root}"
pages = "{pages}"
output = "{out}"
origin = "https://example.com"
"#,
                root = root.display(),
                pages = pages.display(),
                out = root.join("dist").display(),
            ),
        )
        .unwrap();

        run(&config_path, None, true).await.unwrap();

        let assembled = fs::read_to_string(root.join("dist").join("memo.html")).unwrap();
        assert!(assembled.contains("<nav>menu</nav>"));
        assert!(assembled.contains("<footer>fin</footer>"));
        assert!(assembled.contains(r#"<a href="/posts/a.html">A</a>"#));
        assert!(assembled.contains("<title>Memos</title>"));
        assert!(assembled.contains(r#"data-page="memos""#));
    }
}
