//! Owned HTML document with whole-replace mutations.

use crate::scan;

/// One page's HTML. All writes are full-content replacements on a single
/// element or tag; nothing is diffed incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    /// Wrap a page's HTML text.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// The current HTML text.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Consume the document, returning its HTML text.
    pub fn into_html(self) -> String {
        self.html
    }

    /// Whether an element with the given id exists.
    pub fn has_element(&self, id: &str) -> bool {
        scan::find_element_by_id(&self.html, id).is_some()
    }

    /// Inner content of the element with the given id.
    pub fn inner_html(&self, id: &str) -> Option<&str> {
        scan::find_element_by_id(&self.html, id)
            .map(|span| &self.html[span.open_tag_end..span.inner_end])
    }

    /// Replace the inner content of the element with the given id in one
    /// write. Returns false when the element is absent.
    pub fn set_inner_html(&mut self, id: &str, content: &str) -> bool {
        match scan::find_element_by_id(&self.html, id) {
            Some(span) => {
                self.html
                    .replace_range(span.open_tag_end..span.inner_end, content);
                true
            }
            None => false,
        }
    }

    /// Read an attribute of the element with the given id.
    pub fn attr(&self, id: &str, name: &str) -> Option<String> {
        let span = scan::find_element_by_id(&self.html, id)?;
        scan::attr_value(&self.html[span.tag_start..span.open_tag_end], name)
    }

    /// Insert markup just before `</body>`. Returns false when the
    /// document has no body close tag.
    pub fn append_to_body(&mut self, markup: &str) -> bool {
        let lc = scan::lowercase_ascii(&self.html);
        match lc.rfind("</body") {
            Some(at) => {
                self.html.insert_str(at, markup);
                true
            }
            None => false,
        }
    }

    /// Replace the `<title>` text. When the tag is missing but a `<head>`
    /// exists, a title element is inserted instead, mirroring what
    /// assigning `document.title` does in a browser.
    pub fn set_title(&mut self, title: &str) -> bool {
        let lc = scan::lowercase_ascii(&self.html);
        if let Some((_, open_end)) = scan::find_open_tag(&lc, "title", 0) {
            if let Some((inner_end, _)) = scan::find_matching_close(&lc, "title", open_end) {
                self.html.replace_range(open_end..inner_end, title);
                return true;
            }
        }
        if let Some((_, head_end)) = scan::find_open_tag(&lc, "head", 0) {
            self.html
                .insert_str(head_end, &format!("\n  <title>{}</title>", title));
            return true;
        }
        false
    }

    /// Set the `content` attribute of `<meta name="...">`. No-op (false)
    /// when no such meta tag exists.
    pub fn set_meta_content(&mut self, name: &str, content: &str) -> bool {
        self.set_tag_attr("meta", "name", name, "content", content)
    }

    /// Set the `href` of `<link rel="canonical">`. No-op (false) when the
    /// link element is absent.
    pub fn set_canonical_href(&mut self, href: &str) -> bool {
        self.set_tag_attr("link", "rel", "canonical", "href", href)
    }

    /// Set or replace an attribute on the `<body>` open tag.
    pub fn set_body_attr(&mut self, name: &str, value: &str) -> bool {
        let lc = scan::lowercase_ascii(&self.html);
        match scan::find_open_tag(&lc, "body", 0) {
            Some((start, end)) => {
                let rewritten = scan::set_attr(&self.html[start..end], name, value);
                self.html.replace_range(start..end, &rewritten);
                true
            }
            None => false,
        }
    }

    /// Rewrite one attribute on the first `tag` whose `match_attr` equals
    /// `match_value`.
    fn set_tag_attr(
        &mut self,
        tag: &str,
        match_attr: &str,
        match_value: &str,
        set_name: &str,
        set_value: &str,
    ) -> bool {
        let lc = scan::lowercase_ascii(&self.html);
        let mut from = 0;
        while let Some((start, end)) = scan::find_open_tag(&lc, tag, from) {
            let tag_text = &self.html[start..end];
            if scan::attr_value(tag_text, match_attr).as_deref() == Some(match_value) {
                let rewritten = scan::set_attr(tag_text, set_name, set_value);
                self.html.replace_range(start..end, &rewritten);
                return true;
            }
            from = end;
        }
        false
    }
}
