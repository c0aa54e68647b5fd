use std::borrow::Cow;

/// Returned by [`resolve`] when `..` segments climb above the container root.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct OutsideContainer;

pub(crate) fn parent(href: &str) -> &str {
    href.rfind('/')
        .map_or("", |index| if index == 0 { "/" } else { &href[..index] })
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// Removes the `#fragment` portion of an href, if any.
pub(crate) fn strip_fragment(href: &str) -> &str {
    href.find('#').map_or(href, |position| &href[..position])
}

/// Removes both the `?query` and `#fragment` portions of an href, if any.
pub(crate) fn strip_query_and_fragment(href: &str) -> &str {
    href.find(['?', '#']).map_or(href, |position| &href[..position])
}

/// `true` if the href starts with a URI scheme (`scheme:`), per RFC 3986.
pub(crate) fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();

    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a relative href against the document located at `base`,
/// percent-decoding and normalizing the result.
///
/// Hrefs with a scheme are returned unchanged.
/// Fragments are preserved as written.
pub(crate) fn resolve(base: &str, relative: &str) -> Result<String, OutsideContainer> {
    if has_scheme(relative) {
        return Ok(relative.to_owned());
    }
    let (main_href, frag) = relative
        .find('#')
        .map(|position| (&relative[..position], &relative[position..]))
        .unwrap_or((relative, ""));

    let decoded = decode(main_href);
    let joined = if decoded.is_empty() {
        // Same-document reference
        strip_fragment(base).to_owned()
    } else if decoded.starts_with('/') {
        decoded.into_owned()
    } else {
        match parent(base) {
            "" => decoded.into_owned(),
            "/" => format!("/{decoded}"),
            dir => format!("{dir}/{decoded}"),
        }
    };

    Ok(normalize(&joined)? + frag)
}

/// Collapses `.` and `..` segments as well as repeated separators.
pub(crate) fn normalize(href: &str) -> Result<String, OutsideContainer> {
    let absolute = href.starts_with('/');
    let mut stack = Vec::new();

    for segment in href.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop().ok_or(OutsideContainer)?;
            }
            _ => stack.push(segment),
        }
    }

    let mut normalized = stack.join("/");
    if absolute {
        normalized.insert(0, '/');
    }
    Ok(normalized)
}
