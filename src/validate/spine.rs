use crate::diagnostics::Issue;
use crate::media_type;
use crate::package::Item;
use crate::validate::Pass;
use std::collections::HashSet;

impl Pass<'_> {
    pub(super) fn check_spine(&mut self) {
        let document = self.document;

        for item in document.spine_items() {
            self.check_spine_item(item);
        }

        let spine = document.spine();
        if !spine.is_empty() && document.spine_items().all(|item| !item.linear()) {
            self.warning(None, Issue::SpineOnlyNonLinear);
        }

        if self.rules.check_spine_duplicates {
            let mut seen = HashSet::new();

            for entry in spine {
                if !seen.insert(entry.item) {
                    let id = document.item(entry.item).id().unwrap_or(&entry.idref);
                    self.error(
                        Some(entry.location),
                        Issue::SpineDuplicateReference(id.to_owned()),
                    );
                }
            }
        }
    }

    fn check_spine_item(&mut self, item: &Item) {
        let Some(media_type) = item.media_type() else {
            return;
        };
        let location = Some(item.location());

        if self.rules.reject_style_and_image_in_spine
            && (media_type::is_blessed_style(media_type)
                || media_type::is_deprecated_style(media_type)
                || media_type::is_blessed_image(media_type))
        {
            self.error(location, Issue::NotSpineMediaType(media_type.to_owned()));
            return;
        }
        if self.rules.is_blessed_item(media_type)
            || (self.rules.deprecated_items_in_spine && media_type::is_deprecated_item(media_type))
        {
            return;
        }

        if item.fallback().is_none() {
            self.error(location, Issue::SpineNoFallback(media_type.to_owned()));
            return;
        }
        let check_style = self.rules.style_fallback_in_spine();
        if !self
            .resolver()
            .resolve_item_fallback(item, check_style, &mut self.diagnostics)
        {
            self.error(location, Issue::SpineInvalidFallback(media_type.to_owned()));
        }
    }
}
