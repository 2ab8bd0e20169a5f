//! Scaffold a site in the current directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing site...");

    let pages_dir = Path::new("pages");

    // Check if pages already exists
    if pages_dir.exists() {
        if !yes {
            tracing::warn!("pages/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(pages_dir).context("Failed to create pages directory")?;
    }

    // Create default config
    let config_path = Path::new("site.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write site.toml")?;
        tracing::info!("Created site.toml");
    }

    // Create the memo page
    let memo_path = pages_dir.join("memo.html");
    if !memo_path.exists() || yes {
        fs::write(&memo_path, DEFAULT_MEMO_PAGE).context("Failed to write memo.html")?;
        tracing::info!("Created pages/memo.html");
    }

    // Create shared fragments
    let components_dir = Path::new("components");
    if !components_dir.exists() {
        fs::create_dir_all(components_dir).context("Failed to create components directory")?;
    }

    let navbar_path = components_dir.join("navbar.html");
    if !navbar_path.exists() || yes {
        fs::write(&navbar_path, DEFAULT_NAVBAR).context("Failed to write navbar.html")?;
        tracing::info!("Created components/navbar.html");
    }

    let footer_path = components_dir.join("footer.html");
    if !footer_path.exists() || yes {
        fs::write(&footer_path, DEFAULT_FOOTER).context("Failed to write footer.html")?;
        tracing::info!("Created components/footer.html");
    }

    // Create a sample data payload
    let data_dir = Path::new("data");
    if !data_dir.exists() {
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    }

    let posts_path = data_dir.join("posts.json");
    if !posts_path.exists() || yes {
        fs::write(&posts_path, DEFAULT_POSTS).context("Failed to write posts.json")?;
        tracing::info!("Created data/posts.json");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'lintel assemble' to assemble the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Lintel Configuration

[site]
# Fragment and data source: a directory or an http(s) base URL
root = "."

# Directory of pages to assemble
pages = "pages"

# Output directory for assembled pages
output = "dist"

# Origin for canonical URLs
origin = "https://example.com"

[assemble]
# Append a cache-busting parameter to fragment loads
cache_bust = true
"#;

const DEFAULT_MEMO_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Memos</title>
  <meta name="description" content="Short notes and links">
  <meta name="keywords" content="memos,notes">
  <link rel="canonical" href="https://example.com/memo.html">
</head>
<body>
  <div id="navbar-placeholder"></div>
  <main id="memo-content" data-memo="/data/posts.json"></main>
  <div id="footer-placeholder"></div>
</body>
</html>
"#;

const DEFAULT_NAVBAR: &str = r#"<nav class="navbar">
  <a class="navbar-brand" href="/">Home</a>
  <button class="navbar-toggle" type="button">Menu</button>
  <ul class="navbar-links">
    <li><a href="/memo.html">Memos</a></li>
    <li><a href="/novels/">Novels</a></li>
  </ul>
</nav>
<script>
  var toggle = document.querySelector('.navbar-toggle');
  if (toggle) {
    toggle.addEventListener('click', function () {
      document.querySelector('.navbar-links').classList.toggle('open');
    });
  }
</script>
"#;

const DEFAULT_FOOTER: &str = r#"<footer class="site-footer">
  <p>Built with lintel.</p>
</footer>
"#;

const DEFAULT_POSTS: &str = r#"{
  "tableType": "bootstrap",
  "title": "Memos",
  "subtitle": "Short notes, newest first",
  "description": "Short notes and links",
  "keywords": "memos,notes,blog",
  "url": "memo.html",
  "pageId": "memos",
  "items": [
    { "date": "2024-03-01", "url": "/posts/hello.html", "title": "Hello" }
  ]
}
"#;
