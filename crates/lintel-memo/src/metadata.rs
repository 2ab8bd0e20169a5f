//! Document metadata sync.

use lintel_html::Document;

use crate::model::MemoData;

/// Update a document's metadata from a payload.
///
/// Runs for every payload regardless of which table layout was used (or
/// whether one was recognized at all). Each update is independently
/// conditional: the absence of either the target element or the source
/// field is a silent no-op, never an error.
pub fn sync_metadata(doc: &mut Document, data: &MemoData, site_origin: &str) {
    doc.set_title(&data.title);

    if let Some(description) = &data.description {
        doc.set_meta_content("description", description);
    }

    if let Some(keywords) = &data.keywords {
        doc.set_meta_content("keywords", keywords);
    }

    if let Some(url) = &data.url {
        let href = format!(
            "{}/{}",
            site_origin.trim_end_matches('/'),
            url.trim_start_matches('/')
        );
        doc.set_canonical_href(&href);
    }

    if let Some(page_id) = &data.page_id {
        doc.set_body_attr("data-page", page_id);
    }
}
