use crate::opf::{build, read_package, settings};
use opfcheck::xref::{ReferenceGraph, ResourceGraph};
use opfcheck::{Diagnostics, EpubVersion, InvalidArgument, Location, ReferenceKind, Validator};

/// Records every call made by the validator.
#[derive(Default)]
struct RecordingGraph {
    resources: Vec<(String, Option<String>, bool, bool, bool)>,
    references: Vec<(String, Location, String)>,
    bindings: Vec<(String, String)>,
    checked: usize,
}

impl ReferenceGraph for RecordingGraph {
    fn register_resource(
        &mut self,
        path: &str,
        media_type: Option<&str>,
        in_spine: bool,
        has_item_fallback: bool,
        has_image_fallback: bool,
    ) -> Result<(), InvalidArgument> {
        self.resources.push((
            path.to_owned(),
            media_type.map(str::to_owned),
            in_spine,
            has_item_fallback,
            has_image_fallback,
        ));
        Ok(())
    }

    fn register_reference(
        &mut self,
        source: &str,
        location: Location,
        target: &str,
        _kind: ReferenceKind,
    ) {
        self.references
            .push((source.to_owned(), location, target.to_owned()));
    }

    fn register_binding(&mut self, media_type: &str, handler_path: &str) {
        self.bindings
            .push((media_type.to_owned(), handler_path.to_owned()));
    }

    fn bindings_mime_types(&self) -> Vec<&str> {
        self.bindings.iter().map(|(media_type, _)| media_type.as_str()).collect()
    }

    fn binding_handler_src(&self, media_type: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == media_type)
            .map(|(_, handler)| handler.as_str())
    }

    fn check_references(&mut self) -> Diagnostics {
        self.checked += 1;
        Diagnostics::new()
    }
}

#[test]
fn test_registered_fallbacks() {
    let opf = br#"<package xmlns="http://www.idpf.org/2007/opf">
<manifest>
<item id="x" href="x.bin" media-type="application/x-x" fallback="y"/>
<item id="y" href="y.xhtml" media-type="application/xhtml+xml"/>
<item id="img" href="img.bin" media-type="application/x-img" fallback="png"/>
<item id="png" href="a.png" media-type="image/png"/>
<item id="styled" href="s.bin" media-type="application/x-s" fallback="png" fallback-style="css"/>
<item id="css" href="s.css" media-type="text/css"/>
</manifest>
<spine><itemref idref="y"/></spine>
</package>"#;
    let (document, _) = build(EpubVersion::Epub2, opf);
    let mut graph = RecordingGraph::default();

    Validator::new(settings(EpubVersion::Epub2)).validate_with(&document, &mut graph);

    let resources = graph
        .resources
        .iter()
        .map(|(path, _, in_spine, item, image)| (path.as_str(), *in_spine, *item, *image))
        .collect::<Vec<_>>();
    #[rustfmt::skip]
    assert_eq!(
        vec![
            // (path, in spine, has item fallback, has image fallback)
            ("OEBPS/x.bin", false, true, false),
            ("OEBPS/y.xhtml", true, false, false),
            ("OEBPS/img.bin", false, false, true),
            ("OEBPS/a.png", false, false, false),
            ("OEBPS/s.bin", false, true, true),
            ("OEBPS/s.css", false, false, false),
        ],
        resources
    );
    assert_eq!(Some("application/x-x".to_string()), graph.resources[0].1);
    assert_eq!(1, graph.checked);
}

#[test]
fn test_forwarded_references_and_bindings() {
    let (document, _) = build(EpubVersion::Epub3, &read_package("epub3_valid.opf"));
    let mut graph = RecordingGraph::default();

    let diagnostics = Validator::new(settings(EpubVersion::Epub3)).validate_with(&document, &mut graph);

    assert!(diagnostics.is_empty());
    assert_eq!(7, graph.resources.len());
    assert!(graph.references.is_empty());
    assert_eq!(
        vec![("application/x-demo-widget".to_string(), "OEBPS/widget.xhtml".to_string())],
        graph.bindings
    );

    let (document, _) = build(EpubVersion::Epub2, &read_package("epub2_valid.opf"));
    let mut graph = RecordingGraph::default();
    Validator::new(settings(EpubVersion::Epub2)).validate_with(&document, &mut graph);

    let targets = graph
        .references
        .iter()
        .map(|(source, _, target)| (source.as_str(), target.as_str()))
        .collect::<Vec<_>>();
    #[rustfmt::skip]
    assert_eq!(
        vec![
            ("OEBPS/content.opf", "OEBPS/text/cover.xhtml"),
            ("OEBPS/content.opf", "OEBPS/text/chapter 1.xhtml#start"),
        ],
        targets
    );
    assert_eq!(Location::new(29, 5), graph.references[0].1);
}

#[test]
fn test_container_entries() {
    let (document, _) = build(EpubVersion::Epub2, &read_package("epub2_broken.opf"));
    let mut graph = ResourceGraph::with_container(["OEBPS/text/t.xhtml", "OEBPS/style.css"]);

    let diagnostics = Validator::new(settings(EpubVersion::Epub2)).validate_with(&document, &mut graph);

    let xref = diagnostics
        .iter()
        .filter(|d| d.message_key().starts_with("xref."))
        .map(|d| (d.message_key(), d.message_args()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![("xref.resource.missing", vec!["OEBPS/text/toc.xhtml".to_string()])],
        xref
    );
    assert_eq!(5, graph.resource_count());
    assert!(graph.resource("OEBPS/text/t.xhtml").unwrap().in_spine);
}
