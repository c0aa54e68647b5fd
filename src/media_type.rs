//! Media-type classification.
//!
//! Every predicate is a lookup into a constant table so the divergence
//! between the EPUB 2 and EPUB 3 rule sets stays auditable in one place.

use crate::settings::EpubVersion;

const BLESSED_ITEM_EPUB2: &[&str] = &["application/xhtml+xml", "application/x-dtbook+xml"];
const BLESSED_ITEM_EPUB3: &[&str] = &["application/xhtml+xml", "image/svg+xml"];
const DEPRECATED_ITEM: &[&str] = &["text/x-oeb1-document", "text/html"];
const BLESSED_STYLE: &[&str] = &["text/css"];
const DEPRECATED_STYLE: &[&str] = &["text/x-oeb1-css"];
const BLESSED_IMAGE: &[&str] = &["image/gif", "image/png", "image/jpeg", "image/svg+xml"];
const BLESSED_AUDIO: &[&str] = &["audio/mpeg", "audio/mp4"];
const BLESSED_FONT_PREFIXES: &[&str] = &["font/", "application/font", "application/x-font"];
const BLESSED_FONT: &[&str] = &["application/vnd.ms-opentype"];
const CORE_MEDIA_EXTRA: &[&str] = &[
    "text/javascript",
    "application/pls+xml",
    "application/smil+xml",
];

fn contains(table: &[&str], media_type: &str) -> bool {
    table.contains(&media_type)
}

/// Content document types natively supported by `version`.
pub fn is_blessed_item(media_type: &str, version: EpubVersion) -> bool {
    contains(
        match version {
            EpubVersion::Epub2 => BLESSED_ITEM_EPUB2,
            EpubVersion::Epub3 => BLESSED_ITEM_EPUB3,
        },
        media_type,
    )
}

/// Legacy content document types, tolerated with a warning.
pub fn is_deprecated_item(media_type: &str) -> bool {
    contains(DEPRECATED_ITEM, media_type)
}

pub fn is_blessed_style(media_type: &str) -> bool {
    contains(BLESSED_STYLE, media_type)
}

pub fn is_deprecated_style(media_type: &str) -> bool {
    contains(DEPRECATED_STYLE, media_type)
}

pub fn is_blessed_image(media_type: &str) -> bool {
    contains(BLESSED_IMAGE, media_type)
}

pub fn is_blessed_audio(media_type: &str) -> bool {
    contains(BLESSED_AUDIO, media_type)
}

pub fn is_blessed_font(media_type: &str) -> bool {
    BLESSED_FONT_PREFIXES
        .iter()
        .any(|prefix| media_type.starts_with(prefix))
        || contains(BLESSED_FONT, media_type)
}

/// EPUB 3 core media types.
pub fn is_core_media(media_type: &str) -> bool {
    is_blessed_audio(media_type)
        || is_blessed_font(media_type)
        || is_blessed_item(media_type, EpubVersion::Epub3)
        || is_blessed_image(media_type)
        || contains(CORE_MEDIA_EXTRA, media_type)
}

/// `true` if `media_type` is `type/subtype` with both tokens drawn from
/// `[A-Za-z0-9!#$&+\-^_]`.
pub fn is_valid_syntax(media_type: &str) -> bool {
    fn is_token_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric()
            || matches!(b, b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'^' | b'_')
    }

    fn is_token(token: &str) -> bool {
        !token.is_empty() && token.bytes().all(is_token_byte)
    }

    media_type
        .split_once('/')
        .is_some_and(|(kind, subtype)| is_token(kind) && is_token(subtype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EpubVersion::{Epub2, Epub3};

    #[test]
    fn test_blessed_item_by_version() {
        #[rustfmt::skip]
        let expected = [
            ("application/xhtml+xml", true, true),
            ("application/x-dtbook+xml", true, false),
            ("image/svg+xml", false, true),
            ("text/html", false, false),
            ("application/octet-stream", false, false),
        ];

        for (media_type, epub2, epub3) in expected {
            assert_eq!(epub2, is_blessed_item(media_type, Epub2), "{media_type}");
            assert_eq!(epub3, is_blessed_item(media_type, Epub3), "{media_type}");
        }
    }

    #[test]
    fn test_style_and_deprecated() {
        assert!(is_blessed_style("text/css"));
        assert!(is_deprecated_style("text/x-oeb1-css"));
        assert!(!is_blessed_style("text/x-oeb1-css"));
        assert!(is_deprecated_item("text/html"));
        assert!(is_deprecated_item("text/x-oeb1-document"));
        assert!(!is_deprecated_item("application/xhtml+xml"));
    }

    #[test]
    fn test_fonts_and_core_media() {
        #[rustfmt::skip]
        let fonts = [
            ("font/woff2", true),
            ("application/font-woff", true),
            ("application/x-font-ttf", true),
            ("application/vnd.ms-opentype", true),
            ("application/vnd.ms-fontobject", false),
        ];
        for (media_type, expected) in fonts {
            assert_eq!(expected, is_blessed_font(media_type), "{media_type}");
        }

        #[rustfmt::skip]
        let core = [
            ("audio/mpeg", true),
            ("audio/ogg", false),
            ("text/javascript", true),
            ("application/smil+xml", true),
            ("application/pls+xml", true),
            ("image/png", true),
            ("image/webp", false),
            ("application/x-dtbook+xml", false),
            ("video/mp4", false),
        ];
        for (media_type, expected) in core {
            assert_eq!(expected, is_core_media(media_type), "{media_type}");
        }
    }

    #[test]
    fn test_media_type_syntax() {
        #[rustfmt::skip]
        let expected = [
            ("application/xhtml+xml", true),
            ("image/svg+xml", true),
            ("application/x-dtbncx+xml", true),
            ("x!#$&^_/y", true),
            ("application/vnd.ms-opentype", false),
            ("text", false),
            ("text/", false),
            ("/css", false),
            ("text/css; charset=utf-8", false),
            ("text/css/extra", false),
            ("", false),
        ];

        for (media_type, valid) in expected {
            assert_eq!(valid, is_valid_syntax(media_type), "{media_type}");
        }
    }
}
