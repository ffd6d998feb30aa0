//! Decoding of HTML entities in element notes.
//!
//! The host stores notes as lightly marked-up text. Exported cells get the
//! entities resolved; markup tags are left as they are.

use std::borrow::Cow;

use quick_xml::escape::resolve_html5_entity;

/// Longest name between `&` and `;` worth looking up.
const MAX_ENTITY_LEN: usize = 32;

/// Resolve HTML character entities one by one. Named entities come from the
/// HTML5 table; decimal and hex references are decoded. Anything that does
/// not resolve, including a bare `&`, is copied through unchanged.
pub fn decode_html_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let reference = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| resolve(&after[..end]).map(|value| (end, value)));

        match reference {
            Some((end, value)) => {
                decoded.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = after;
            }
        }
    }

    decoded.push_str(rest);
    Cow::Owned(decoded)
}

fn resolve(name: &str) -> Option<Cow<'static, str>> {
    match name.strip_prefix('#') {
        Some(number) => {
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
                .filter(|&c| c != '\0')
                .map(|c| Cow::Owned(c.to_string()))
        }
        None => resolve_html5_entity(name).map(Cow::Borrowed),
    }
}
