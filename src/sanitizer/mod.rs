//! Markup stripping for post bodies.
//!
//! Post content arrives as an HTML fragment (`<p>`, `<a>`, `<span class="h-card">`
//! and friends). The exported document carries only the visible text: every text
//! node in document order, with character references decoded.

use scraper::Html;

/// Return the visible text of an HTML fragment.
///
/// `None` and empty input yield an empty string. Malformed markup never fails;
/// html5ever recovers and whatever text it finds is returned.
pub fn visible_text(markup: Option<&str>) -> String {
    let Some(markup) = markup else {
        return String::new();
    };

    // Plain text has nothing to strip or decode. Re-sanitizing output is a no-op
    // only when the source had no encoded delimiters: `&lt;b&gt;` decodes to
    // `<b>`, which a second pass treats as a tag.
    if !markup.contains(['<', '&']) {
        return markup.to_string();
    }

    let fragment = Html::parse_fragment(markup);
    fragment.root_element().text().collect()
}
