//! Script extraction from HTML fragments.
//!
//! Injected markup never executes its `<script>` tags, so the assembler
//! re-creates each one and appends it to the document body. A recovered
//! script keeps either its source URL or its inline text, nothing else.

use regex::Regex;

/// A script element recovered from a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Script {
    /// `<script src="...">` — only the URL is carried over.
    External(String),
    /// Inline script — only the text content is carried over.
    Inline(String),
}

impl Script {
    /// Re-create the element as markup suitable for the document body.
    pub fn markup(&self) -> String {
        match self {
            Script::External(src) => format!(r#"<script src="{}"></script>"#, src),
            Script::Inline(text) => format!("<script>{}</script>", text),
        }
    }
}

/// Extract every script element from a fragment, in document order.
pub fn extract_scripts(fragment: &str) -> Vec<Script> {
    let re = Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").expect("script pattern");

    re.captures_iter(fragment)
        .map(|cap| {
            let attrs = cap.get(1).map(|m| m.as_str()).unwrap_or("");
            let body = cap.get(2).map(|m| m.as_str()).unwrap_or("");
            match crate::scan::attr_value(attrs, "src") {
                Some(src) if !src.is_empty() => Script::External(src),
                _ => Script::Inline(body.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_inline_script() {
        let scripts = extract_scripts("<nav></nav><script>navToggle();</script>");
        assert_eq!(scripts, vec![Script::Inline("navToggle();".to_string())]);
    }

    #[test]
    fn extracts_external_script() {
        let scripts = extract_scripts(r#"<script src="/assets/js/nav.js"></script>"#);
        assert_eq!(
            scripts,
            vec![Script::External("/assets/js/nav.js".to_string())]
        );
    }

    #[test]
    fn preserves_document_order() {
        let fragment = r#"
<nav>...</nav>
<script src="/a.js"></script>
<script>
  wire();
</script>"#;
        let scripts = extract_scripts(fragment);
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0], Script::External("/a.js".to_string()));
        match &scripts[1] {
            Script::Inline(text) => assert!(text.contains("wire();")),
            other => panic!("expected inline script, got {:?}", other),
        }
    }

    #[test]
    fn fragment_without_scripts_is_empty() {
        assert!(extract_scripts("<footer><p>© 2024</p></footer>").is_empty());
    }

    #[test]
    fn markup_recreates_elements() {
        assert_eq!(
            Script::External("/a.js".to_string()).markup(),
            r#"<script src="/a.js"></script>"#
        );
        assert_eq!(
            Script::Inline("x();".to_string()).markup(),
            "<script>x();</script>"
        );
    }

    #[test]
    fn ignores_case_and_attributes() {
        let scripts = extract_scripts(r#"<SCRIPT type="text/javascript" SRC='/b.js'></SCRIPT>"#);
        assert_eq!(scripts, vec![Script::External("/b.js".to_string())]);
    }
}
