//! Memo page data payloads.

use serde::Deserialize;

/// Which table layout a payload renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Compact post list: date column plus linked title column.
    Bootstrap,
    /// Generic multi-column table driven by `columns`.
    Custom,
    /// Anything else renders no table; metadata sync still runs.
    #[default]
    #[serde(other)]
    Unknown,
}

/// One table entry. Bootstrap payloads carry dated posts; custom payloads
/// carry positional row values with an optional link target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MemoItem {
    Post {
        date: String,
        url: String,
        title: String,
    },
    Row {
        values: Vec<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

/// A memo page's payload: table content plus page metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoData {
    #[serde(default)]
    pub table_type: TableKind,

    /// Page title, also used for the document title.
    pub title: String,

    #[serde(default)]
    pub subtitle: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub keywords: Option<String>,

    /// Relative canonical URL, joined onto the site origin.
    #[serde(default)]
    pub url: Option<String>,

    /// Value for the body's `data-page` attribute.
    #[serde(default)]
    pub page_id: Option<String>,

    /// CSS class of the custom table.
    #[serde(default)]
    pub table_class: Option<String>,

    /// Header row of the custom layout, in order.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Per-column CSS classes, parallel to `columns`.
    #[serde(default)]
    pub column_classes: Option<Vec<String>>,

    #[serde(default)]
    pub items: Vec<MemoItem>,
}
