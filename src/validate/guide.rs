use crate::diagnostics::Issue;
use crate::media_type;
use crate::validate::Pass;

impl Pass<'_> {
    /// Every guide reference must point at a content document in the manifest.
    pub(super) fn check_guide(&mut self) {
        let document = self.document;

        for reference in document.guide() {
            // Unresolvable hrefs were reported while building
            let (Some(href), Some(path)) = (reference.href(), reference.path()) else {
                continue;
            };
            let location = Some(reference.location());

            match document.item_by_path(path) {
                None => self.error(location, Issue::GuideUndeclared(href.to_owned())),
                Some(item) => {
                    let media_type = item.media_type().unwrap_or_default();

                    if !self.rules.is_blessed_item(media_type)
                        && !media_type::is_deprecated_item(media_type)
                    {
                        self.error(location, Issue::GuideNotContentDocument(href.to_owned()));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::{CheckSettings, EpubVersion};
    use crate::validate::Validator;

    #[test]
    fn test_guide_references() {
        let opf = r#"<package xmlns="http://www.idpf.org/2007/opf">
<manifest>
<item id="c1" href="text/chap1.xhtml" media-type="application/xhtml+xml"/>
<item id="old" href="text/old.html" media-type="text/html"/>
<item id="img" href="images/cover.png" media-type="image/png"/>
</manifest>
<guide>
<reference type="text" href="text/chap1.xhtml#anchor"/>
<reference type="text" href="text/old.html"/>
<reference type="cover" href="images/cover.png#top"/>
<reference type="toc" href="text/toc.xhtml"/>
</guide>
</package>"#;
        let settings = CheckSettings::builder().version(EpubVersion::Epub2).build();
        let (document, _) = crate::build_from_xml(settings.clone(), opf.as_bytes()).unwrap();

        let diagnostics = Validator::new(settings).validate(&document);
        let guide = diagnostics
            .problems()
            .filter(|d| d.message_key().starts_with("opf.guide"))
            .map(|d| (d.message_key(), d.message_args(), d.line()))
            .collect::<Vec<_>>();

        #[rustfmt::skip]
        assert_eq!(
            vec![
                ("opf.guide.not-content-document", vec!["OEBPS/images/cover.png#top".to_string()], Some(10)),
                ("opf.guide.undeclared", vec!["OEBPS/text/toc.xhtml".to_string()], Some(11)),
            ],
            guide
        );
    }
}
