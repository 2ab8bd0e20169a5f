//! The memo page renderer.

use std::sync::Arc;

use lintel_fetch::{FetchError, Source};
use lintel_html::Document;

use crate::metadata::sync_metadata;
use crate::model::{MemoData, MemoItem, TableKind};
use crate::templates::{Cell, Header, PostRow, Row, TemplateEngine};

/// Site origin used for canonical URLs unless configured otherwise.
const DEFAULT_ORIGIN: &str = "https://pengandy.com";

/// Tells the renderer which data file to load and where to put the
/// result. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Site-relative URL of the JSON payload.
    pub data_file: String,
    /// Id of the content container.
    pub container_id: String,
    /// Origin prepended to the payload's relative canonical URL.
    pub site_origin: String,
}

impl RenderConfig {
    pub fn new(data_file: impl Into<String>) -> Self {
        Self {
            data_file: data_file.into(),
            container_id: "memo-content".to_string(),
            site_origin: DEFAULT_ORIGIN.to_string(),
        }
    }

    /// Use a different content container.
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Use a different canonical origin.
    pub fn with_site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }
}

/// Errors that can occur during a render.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("content container #{0} not found")]
    MissingContainer(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to parse {url}: {source}")]
    Data {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render table: {0}")]
    Template(#[from] minijinja::Error),
}

/// Renders one memo page from its data payload.
pub struct MemoRenderer {
    config: RenderConfig,
    source: Arc<dyn Source>,
    templates: TemplateEngine,
}

impl MemoRenderer {
    pub fn new(config: RenderConfig, source: Arc<dyn Source>) -> Self {
        Self {
            config,
            source,
            templates: TemplateEngine::new(),
        }
    }

    /// Render into the document.
    ///
    /// Failures are contained here: they are logged and the document is
    /// left in its prior state. No partial or error UI is ever shown.
    /// Re-rendering is safe; the container and metadata are fully
    /// overwritten each time.
    pub async fn render(&self, doc: &mut Document) {
        if let Err(e) = self.try_render(doc).await {
            tracing::error!("error rendering memo: {}", e);
        }
    }

    async fn try_render(&self, doc: &mut Document) -> Result<(), RenderError> {
        if !doc.has_element(&self.config.container_id) {
            return Err(RenderError::MissingContainer(
                self.config.container_id.clone(),
            ));
        }

        let data = self.load_data().await?;

        match data.table_type {
            TableKind::Bootstrap => {
                let html = self.render_bootstrap(&data)?;
                doc.set_inner_html(&self.config.container_id, &html);
            }
            TableKind::Custom => {
                let html = self.render_custom(&data)?;
                doc.set_inner_html(&self.config.container_id, &html);
            }
            // No table for unrecognized kinds; metadata still syncs below.
            TableKind::Unknown => {}
        }

        sync_metadata(doc, &data, &self.config.site_origin);

        Ok(())
    }

    async fn load_data(&self) -> Result<MemoData, RenderError> {
        let body = self.source.fetch(&self.config.data_file).await?;
        serde_json::from_str(&body).map_err(|e| RenderError::Data {
            url: self.config.data_file.clone(),
            source: e,
        })
    }

    fn header(data: &MemoData) -> Header {
        Header {
            title: data.title.clone(),
            subtitle: data.subtitle.clone(),
        }
    }

    fn render_bootstrap(&self, data: &MemoData) -> Result<String, RenderError> {
        let posts: Vec<PostRow> = data
            .items
            .iter()
            .filter_map(|item| match item {
                MemoItem::Post { date, url, title } => Some(PostRow {
                    date: date.clone(),
                    url: url.clone(),
                    title: title.clone(),
                }),
                MemoItem::Row { .. } => {
                    tracing::warn!("skipping item without date/title in post list");
                    None
                }
            })
            .collect();

        Ok(self.templates.render_bootstrap(&Self::header(data), &posts)?)
    }

    fn render_custom(&self, data: &MemoData) -> Result<String, RenderError> {
        let column_count = data.columns.len();
        let mut warned = false;

        let rows: Vec<Row> = data
            .items
            .iter()
            .filter_map(|item| {
                let (values, url) = match item {
                    MemoItem::Row { values, url } => (values, url),
                    MemoItem::Post { .. } => {
                        tracing::warn!("skipping item without values in custom table");
                        return None;
                    }
                };

                if values.len() != column_count && !warned {
                    tracing::warn!(
                        "item has {} values for {} columns; padding/truncating",
                        values.len(),
                        column_count
                    );
                    warned = true;
                }

                // The link belongs on the item's last supplied value.
                let link_at = match url {
                    Some(_) if !values.is_empty() => {
                        Some(values.len().min(column_count).saturating_sub(1))
                    }
                    _ => None,
                };

                let cells = (0..column_count)
                    .map(|i| Cell {
                        value: values.get(i).cloned().unwrap_or_default(),
                        class: data
                            .column_classes
                            .as_ref()
                            .and_then(|classes| classes.get(i))
                            .cloned(),
                        href: if link_at == Some(i) { url.clone() } else { None },
                    })
                    .collect();

                Some(Row { cells })
            })
            .collect();

        let table_class = data.table_class.as_deref().unwrap_or("paper-table");

        Ok(self.templates.render_custom(
            &Self::header(data),
            table_class,
            &data.columns,
            &rows,
        )?)
    }
}
