use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters percent-encoded in link destinations. `%` is left alone so
/// existing escapes survive; every non-ASCII byte is always encoded.
const HREF_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters percent-encoded in footnote ids and `#` fragments.
const FRAGMENT_UNSAFE: &AsciiSet = &HREF_UNSAFE.add(b'#').add(b'%').add(b'\'').add(b'?');

/// Escapes `&`, `<`, `>` and `"` for text and attribute values.
pub fn escape_html(s: &str, out: &mut String) {
    html_escape::encode_double_quoted_attribute_to_string(s, out);
}

/// Percent-encodes unsafe characters of a URL, then escapes it for an
/// attribute value.
pub fn escape_href(url: &str, out: &mut String) {
    let encoded = utf8_percent_encode(url, HREF_UNSAFE).to_string();
    escape_html(&encoded, out);
}

/// Encodes a label for use as an element id and a `#` fragment, so the
/// two always match.
pub fn escape_fragment(label: &str, out: &mut String) {
    let encoded = utf8_percent_encode(label, FRAGMENT_UNSAFE).to_string();
    escape_html(&encoded, out);
}
