use crate::consts;
use crate::diagnostics::Issue;
use crate::media_type;
use crate::package::Item;
use crate::validate::Pass;

impl Pass<'_> {
    /// Media-type and fallback-link checks for one manifest item.
    pub(super) fn check_item(&mut self, item: &Item) {
        let media_type = item
            .media_type()
            .filter(|media_type| media_type::is_valid_syntax(media_type));

        match media_type {
            Some(media_type) if self.rules.legacy_item_warnings => {
                self.check_deprecated_type(item, media_type);
            }
            Some(_) => {}
            // Missing and malformed types are left to the schema
            None if self.rules.strict_media_type_syntax => return,
            None => {}
        }
        if self.rules.legacy_item_warnings && self.document.is_legacy_syntax() {
            self.check_oeb12_type(item);
        }

        if let Some(fallback) = item.fallback() {
            if self.document.item_by_id(fallback.trim()).is_none() {
                self.error(Some(item.location()), Issue::FallbackNotFound);
            }
        }
        if !self.rules.check_fallback_style {
            return;
        }
        if let Some(fallback_style) = item.fallback_style() {
            if self.document.item_by_id(fallback_style.trim()).is_none() {
                self.error(Some(item.location()), Issue::FallbackStyleNotFound);
            }
        }
    }

    fn check_deprecated_type(&mut self, item: &Item, media_type: &str) {
        if !media_type::is_deprecated_item(media_type) && !media_type::is_deprecated_style(media_type) {
            return;
        }
        let legacy = self.document.is_legacy_syntax();

        let issue = match media_type {
            consts::HTML_TYPE if legacy => Issue::HtmlForOeb12,
            consts::HTML_TYPE => Issue::HtmlForXhtml,
            _ if legacy => return,
            _ => Issue::DeprecatedMediaType(media_type.to_owned()),
        };
        self.warning(Some(item.location()), issue);
    }

    /// OPS types declared without a fallback in an OEBPS 1.2 package.
    fn check_oeb12_type(&mut self, item: &Item) {
        let Some(media_type) = item.media_type().filter(|_| item.fallback().is_none()) else {
            return;
        };

        let preferred = if self.rules.is_blessed_item(media_type) {
            consts::OEB1_DOCUMENT_TYPE
        } else if media_type::is_blessed_style(media_type) {
            consts::OEB1_CSS_TYPE
        } else {
            return;
        };
        let issue = Issue::OpsMediaTypeInOeb12 {
            media_type: media_type.to_owned(),
            preferred,
        };
        self.warning(Some(item.location()), issue);
    }
}
