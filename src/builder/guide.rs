use crate::builder::PackageBuilder;
use crate::consts;
use crate::diagnostics::{Feature, Issue};
use crate::package::{CrossReference, GuideReference, ReferenceKind};
use crate::parser::StartElement;
use crate::util::str::StrExt;
use crate::util::uri;

impl PackageBuilder {
    pub(super) fn on_reference(&mut self, element: &StartElement) {
        let href = element
            .attribute(consts::HREF)
            .and_then(|href| match uri::resolve(self.path(), href) {
                Ok(resolved) => Some(resolved),
                Err(_) => {
                    self.error(element, Issue::InvalidHref(href.to_owned()));
                    None
                }
            });

        if let Some(target) = &href {
            self.document.cross_references.push(CrossReference {
                source: self.settings.package_path.clone(),
                location: element.location,
                target: target.clone(),
                kind: ReferenceKind::Generic,
            });
            if target.starts_with_ignore_case("http") {
                let path = self.path().to_owned();
                self.feature(Some(&path), Feature::Reference, target);
            }
        }

        self.document.guide.push(GuideReference {
            kind: element.attribute(consts::GUIDE_TYPE).map(str::to_owned),
            title: element.attribute(consts::GUIDE_TITLE).map(str::to_owned),
            href,
            location: element.location,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::Location;
    use crate::package::ReferenceKind;
    use crate::settings::CheckSettings;

    #[test]
    fn test_guide_references() {
        let opf = r#"<package xmlns="http://www.idpf.org/2007/opf" unique-identifier="uid"><guide>
            <reference type="text" title="Start" href="text/chap1.xhtml#anchor"/>
            <reference type="cover" href="http://example.com/cover.xhtml"/>
            <reference type="toc" href="../../toc.xhtml"/>
          </guide></package>"#;
        let settings = CheckSettings::builder().package_path("OPS/content.opf");
        let (document, diagnostics) = crate::build_from_xml(settings, opf.as_bytes()).unwrap();

        let guide = document.guide();
        assert_eq!(3, guide.len());
        assert_eq!(Some("text"), guide[0].kind());
        assert_eq!(Some("Start"), guide[0].title());
        assert_eq!(Some("OPS/text/chap1.xhtml#anchor"), guide[0].href());
        assert_eq!(Some("OPS/text/chap1.xhtml"), guide[0].path());
        assert_eq!(Location::new(2, 13), guide[0].location());
        assert_eq!(None, guide[2].href());

        let references = document.cross_references();
        assert_eq!(2, references.len());
        assert_eq!("OPS/content.opf", references[0].source);
        assert_eq!("OPS/text/chap1.xhtml#anchor", references[0].target);
        assert_eq!(ReferenceKind::Generic, references[0].kind);
        assert_eq!("http://example.com/cover.xhtml", references[1].target);

        assert_eq!(1, diagnostics.by_key("opf.item.invalid-href").count());
        assert_eq!(1, diagnostics.by_key("info.feature").count());
    }
}
