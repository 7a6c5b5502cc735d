//! HTML rendering of search results.
//!
//! All document and query text is escaped before it reaches markup.

use std::fmt::Write;

use crate::engine::SearchHit;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Byte range of the first case-insensitive occurrence of `needle` in `haystack`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().find_map(|(start, _)| {
        let mut rest = haystack[start..].char_indices();
        for n in needle.chars() {
            let (_, h) = rest.next()?;
            if !h.to_lowercase().eq(n.to_lowercase()) {
                return None;
            }
        }
        let end = rest.next().map_or(haystack.len(), |(offset, _)| start + offset);
        Some((start, end))
    })
}

/// Escape `text`, wrapping the first occurrence of `query` in `<mark>`.
pub fn highlight(text: &str, query: &str) -> String {
    match find_ignore_case(text, query.trim()) {
        Some((start, end)) => format!(
            "{}<mark>{}</mark>{}",
            escape_html(&text[..start]),
            escape_html(&text[start..end]),
            escape_html(&text[end..])
        ),
        None => escape_html(text),
    }
}

/// DOM id of a result row, used for `aria-activedescendant`.
pub fn result_id(index: usize) -> String {
    format!("folio-search-result-{index}")
}

/// Render a result list with the selected row marked.
pub fn render_results(hits: &[SearchHit], query: &str, selected: Option<usize>) -> String {
    if hits.is_empty() {
        return render_empty(query);
    }

    let mut html = String::from(r#"<ul class="folio-search-list" role="listbox">"#);
    for (index, hit) in hits.iter().enumerate() {
        let doc = &hit.document;
        let is_selected = selected == Some(index);
        let _ = write!(
            html,
            r#"<li id="{id}" class="folio-search-item{active}" role="option" aria-selected="{is_selected}"><a href="{url}" class="folio-search-link"><span class="folio-search-title">{title}</span><span class="folio-search-category">{category}</span>"#,
            id = result_id(index),
            active = if is_selected { " selected" } else { "" },
            url = escape_html(&doc.url),
            title = highlight(&doc.title, query),
            category = doc.category,
        );
        if !doc.content_preview.is_empty() {
            let _ = write!(
                html,
                r#"<span class="folio-search-preview">{}</span>"#,
                escape_html(&doc.content_preview)
            );
        }
        html.push_str("</a></li>");
    }
    html.push_str("</ul>");
    html
}

/// Render the empty-result message.
pub fn render_empty(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return r#"<div class="folio-search-empty"></div>"#.to_string();
    }
    format!(
        r#"<div class="folio-search-no-results">No results found for "{}"</div>"#,
        escape_html(query)
    )
}

/// Render the recent-search suggestions shown for an empty query.
pub fn render_suggestions(recent: &[String]) -> String {
    if recent.is_empty() {
        return render_empty("");
    }

    let mut html = String::from(
        r#"<div class="folio-search-suggestions"><span class="folio-search-suggestions-title">Recent searches</span><ul>"#,
    );
    for entry in recent {
        let _ = write!(
            html,
            r#"<li class="folio-search-suggestion"><button type="button">{}</button></li>"#,
            escape_html(entry)
        );
    }
    html.push_str("</ul></div>");
    html
}
