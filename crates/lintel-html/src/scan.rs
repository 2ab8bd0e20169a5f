// Low-level HTML string scanning helpers.
// These are deliberately naive but tailored to the site's page structure.
// They operate case-insensitively on ASCII tag/attribute names.

/// Byte offsets of one element within a document: the opening tag, its
/// inner content, and the end of the closing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ElementSpan {
    /// Offset of the opening `<`.
    pub tag_start: usize,
    /// Offset just past the opening tag's `>`.
    pub open_tag_end: usize,
    /// Offset of the matching closing tag's `<` (inner content ends here).
    pub inner_end: usize,
    /// Offset just past the closing tag's `>`.
    pub element_end: usize,
}

/// Fast ASCII-only lowercasing for tag/attribute matching.
pub(crate) fn lowercase_ascii(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Tags that never carry inner content.
fn is_void_tag(name: &str) -> bool {
    matches!(name, "meta" | "link" | "br" | "hr" | "img" | "input")
}

/// Locate the element carrying `id="<id>"` (any quoting style). The id
/// value comparison is case-sensitive; the attribute name is not.
pub(crate) fn find_element_by_id(html: &str, id: &str) -> Option<ElementSpan> {
    let lc = lowercase_ascii(html);
    let mut from = 0;
    while let Some(rel) = lc[from..].find("id=") {
        let at = from + rel;
        from = at + 3;
        // Attribute names start a word.
        if at == 0 || !html.as_bytes()[at - 1].is_ascii_whitespace() {
            continue;
        }
        let (value, _) = read_attr_value(&html[at + 3..]);
        if value != id {
            continue;
        }
        // The match must sit inside a tag, not in text content.
        let Some(tag_start) = html[..at].rfind('<') else {
            continue;
        };
        if html[tag_start..at].contains('>') {
            continue;
        }
        return element_span(&lc, tag_start);
    }
    None
}

/// Compute the span of the element whose opening tag starts at `tag_start`.
fn element_span(lc: &str, tag_start: usize) -> Option<ElementSpan> {
    let name_start = tag_start + 1;
    let name_end = lc[name_start..]
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .map(|i| name_start + i)?;
    let tag_name = &lc[name_start..name_end];

    let gt = lc[tag_start..].find('>')? + tag_start;
    let open_tag_end = gt + 1;

    if lc[..gt].ends_with('/') || is_void_tag(tag_name) {
        return Some(ElementSpan {
            tag_start,
            open_tag_end,
            inner_end: open_tag_end,
            element_end: open_tag_end,
        });
    }

    let (inner_end, element_end) = find_matching_close(lc, tag_name, open_tag_end)?;
    Some(ElementSpan {
        tag_start,
        open_tag_end,
        inner_end,
        element_end,
    })
}

/// Find the closing tag matching an already-open element, counting nested
/// same-name elements. Returns (close tag start, offset past its `>`).
pub(crate) fn find_matching_close(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let open_pat = format!("<{}", tag);
    let close_pat = format!("</{}", tag);
    let mut depth = 1usize;
    let mut at = from;
    loop {
        let close = find_tag_token(lc, &close_pat, at)?;
        match find_tag_token(lc, &open_pat, at) {
            Some(open) if open < close => {
                let open_end = lc[open..].find('>').map(|i| open + i)?;
                // Self-closing opens do not add depth.
                if !lc[..open_end].ends_with('/') {
                    depth += 1;
                }
                at = open_end + 1;
            }
            _ => {
                depth -= 1;
                let close_end = lc[close..].find('>').map(|i| close + i)?;
                if depth == 0 {
                    return Some((close, close_end + 1));
                }
                at = close_end + 1;
            }
        }
    }
}

/// Find `pat` at a tag-name boundary: the next byte must be whitespace,
/// `>`, or `/`, so that `<t` never matches `<table`.
fn find_tag_token(lc: &str, pat: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(rel) = lc[at..].find(pat) {
        let pos = at + rel;
        match lc.as_bytes().get(pos + pat.len()) {
            None => return None,
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(pos),
            _ => at = pos + 1,
        }
    }
    None
}

/// Find the next opening tag with the given name from `from` onwards.
/// Returns (tag start, offset past the opening tag's `>`).
pub(crate) fn find_open_tag(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let pat = format!("<{}", tag);
    let start = find_tag_token(lc, &pat, from)?;
    let end = lc[start..].find('>')? + start + 1;
    Some((start, end))
}

/// Read the value of an attribute starting right after its `=`.
/// Handles double-quoted, single-quoted, and bare values.
/// Returns the value and the number of bytes consumed.
pub(crate) fn read_attr_value(s: &str) -> (&str, usize) {
    match s.as_bytes().first() {
        Some(b'"') => {
            let end = s[1..].find('"').map(|i| i + 1).unwrap_or(s.len());
            (&s[1..end], (end + 1).min(s.len()))
        }
        Some(b'\'') => {
            let end = s[1..].find('\'').map(|i| i + 1).unwrap_or(s.len());
            (&s[1..end], (end + 1).min(s.len()))
        }
        _ => {
            let end = s
                .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
                .unwrap_or(s.len());
            (&s[..end], end)
        }
    }
}

/// Read an attribute's value from a single tag's text (`<meta ...>`).
pub(crate) fn attr_value(tag: &str, name: &str) -> Option<String> {
    let lc = lowercase_ascii(tag);
    let pat = format!("{}=", lowercase_ascii(name));
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&pat) {
        let at = from + rel;
        from = at + pat.len();
        if at == 0 || !lc.as_bytes()[at - 1].is_ascii_whitespace() {
            continue;
        }
        let (value, _) = read_attr_value(&tag[at + pat.len()..]);
        return Some(value.to_string());
    }
    None
}

/// Rewrite a single tag's text so that the attribute holds `value`,
/// replacing an existing value or appending the attribute before `>`.
pub(crate) fn set_attr(tag: &str, name: &str, value: &str) -> String {
    let lc = lowercase_ascii(tag);
    let pat = format!("{}=", lowercase_ascii(name));
    let mut from = 0;
    while let Some(rel) = lc[from..].find(&pat) {
        let at = from + rel;
        from = at + pat.len();
        if at == 0 || !lc.as_bytes()[at - 1].is_ascii_whitespace() {
            continue;
        }
        let value_start = at + pat.len();
        let (_, consumed) = read_attr_value(&tag[value_start..]);
        let mut out = String::with_capacity(tag.len() + value.len());
        out.push_str(&tag[..value_start]);
        out.push('"');
        out.push_str(value);
        out.push('"');
        out.push_str(&tag[value_start + consumed..]);
        return out;
    }
    let insert_at = if tag.ends_with("/>") {
        tag.len() - 2
    } else {
        tag.len() - 1
    };
    format!(
        "{} {}=\"{}\"{}",
        tag[..insert_at].trim_end(),
        name,
        value,
        &tag[insert_at..]
    )
}
