use crate::opf::{build, check, problems};
use opfcheck::{Diagnostics, EpubVersion, FallbackResolver, RuleSet, Severity};

/// Wraps `body` in a package whose unique identifier is declared.
fn package(body: &str) -> String {
    format!(
        r#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid">
<metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:identifier id="uid">urn:x</dc:identifier></metadata>
{body}
</package>"#
    )
}

#[test]
fn test_one_hop_fallback_in_spine() {
    let opf = package(
        r#"<manifest>
<item id="a" href="a.bin" media-type="application/octet-stream" fallback="b"/>
<item id="b" href="b.xhtml" media-type="application/xhtml+xml"/>
</manifest>
<spine><itemref idref="a"/></spine>"#,
    );

    let diagnostics = check(EpubVersion::Epub2, opf.as_bytes());
    assert!(problems(&diagnostics).is_empty());
}

#[test]
fn test_self_referential_fallback() {
    let opf = package(
        r#"<manifest>
<item id="a" href="a.bin" media-type="application/octet-stream" fallback="a"/>
</manifest>"#,
    );

    for version in [EpubVersion::Epub2, EpubVersion::Epub3] {
        let (document, _) = build(version, opf.as_bytes());
        let resolver = FallbackResolver::new(&document, RuleSet::for_version(version), 256);
        let item = document.item_by_id("a").unwrap();
        let mut diagnostics = Diagnostics::new();

        assert!(!resolver.resolve_item_fallback(item, true, &mut diagnostics));
        assert_eq!(
            vec![("opf.fallback.circular", Some(4))],
            problems(&diagnostics)
        );
    }
}

#[test]
fn test_duplicate_spine_reference() {
    let opf = package(
        r#"<manifest>
<item id="t" href="t.xhtml" media-type="application/xhtml+xml"/>
</manifest>
<spine>
<itemref idref="t"/>
<itemref idref="t"/>
</spine>"#,
    );

    let diagnostics = check(EpubVersion::Epub2, opf.as_bytes());
    assert_eq!(
        vec![("opf.spine.duplicate-reference", Some(8))],
        problems(&diagnostics)
    );
    let duplicate = diagnostics.problems().next().unwrap();
    assert_eq!(vec!["t"], duplicate.message_args());
    assert_eq!(Severity::Error, duplicate.severity);
}

#[test]
fn test_spine_item_without_fallback() {
    let opf = package(
        r#"<manifest>
<item id="a" href="a.bin" media-type="application/octet-stream"/>
</manifest>
<spine><itemref idref="a"/></spine>"#,
    );

    let diagnostics = check(EpubVersion::Epub3, opf.as_bytes());
    assert_eq!(vec![("opf.spine.no-fallback", Some(4))], problems(&diagnostics));
    assert_eq!(
        "non-standard media-type 'application/octet-stream' with no fallback",
        diagnostics.problems().next().unwrap().issue.to_string()
    );
}

#[test]
fn test_guide_reference_with_fragment() {
    let opf = package(
        r#"<manifest>
<item id="c1" href="chap1.xhtml" media-type="application/xhtml+xml"/>
</manifest>
<spine><itemref idref="c1"/></spine>
<guide><reference type="text" title="Start" href="chap1.xhtml#anchor"/></guide>"#,
    );

    for version in [EpubVersion::Epub2, EpubVersion::Epub3] {
        let diagnostics = check(version, opf.as_bytes());
        assert!(problems(&diagnostics).is_empty(), "{version}");
    }
}

#[test]
fn test_missing_unique_identifier_element() {
    let opf = r#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid">
<metadata xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:identifier>urn:x</dc:identifier></metadata>
</package>"#;

    for version in [EpubVersion::Epub2, EpubVersion::Epub3] {
        let diagnostics = check(version, opf.as_bytes());
        assert_eq!(
            vec![("opf.unique-identifier.not-found", None)],
            problems(&diagnostics)
        );
        assert_eq!(
            "unique-identifier attribute in package element must reference an existing identifier element id",
            diagnostics.problems().next().unwrap().issue.to_string()
        );
    }
}

#[test]
fn test_blessed_items_skip_fallback_resolution() {
    let opf = package(
        r#"<manifest>
<item id="c1" href="c1.xhtml" media-type="application/xhtml+xml"/>
<item id="c2" href="c2.xhtml" media-type="application/xhtml+xml"/>
</manifest>
<spine><itemref idref="c1"/><itemref idref="c2" linear="no"/></spine>"#,
    );

    for version in [EpubVersion::Epub2, EpubVersion::Epub3] {
        let diagnostics = check(version, opf.as_bytes());
        assert!(diagnostics.is_empty(), "{version}");
    }
}
