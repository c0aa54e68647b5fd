use crate::builder::PackageBuilder;
use crate::consts;
use crate::diagnostics::{Feature, Issue};
use crate::media_type;
use crate::package::Item;
use crate::parser::StartElement;
use crate::util::uri;

impl PackageBuilder {
    pub(super) fn on_item(&mut self, element: &StartElement) {
        let owned = |name| element.attribute(name).map(str::to_owned);
        let fallback = owned(consts::FALLBACK);

        let mut item = Item {
            id: owned(consts::ID),
            path: self.item_path(element),
            media_type: owned(consts::MEDIA_TYPE),
            fallback_style: if self.rules.fallback_is_style_fallback {
                fallback.clone()
            } else {
                owned(consts::FALLBACK_STYLE)
            },
            fallback,
            island_type: owned(consts::ISLAND_TYPE),
            location: element.location,
            ..Item::default()
        };
        if let Some(properties) = element.attribute(consts::PROPERTIES) {
            item.set_properties(properties);
        }

        if item.is_remote() {
            self.check_remote_item(element, &item);
        }
        if self.rules.check_properties {
            self.check_item_properties(element, &item);
        }
        if let Some(id) = item.id() {
            if self.document.index_by_id(id).is_some() {
                self.error(element, Issue::DuplicateItemId(id.to_owned()));
            }
        }

        log::trace!("manifest item {:?} -> {:?}", item.id(), item.path());
        self.document.insert_item(item);
    }

    /// Resolves `href` against the package document; remote URLs are kept as-is.
    fn item_path(&mut self, element: &StartElement) -> Option<String> {
        let Some(href) = element.attribute(consts::HREF) else {
            self.error(
                element,
                Issue::MissingAttribute {
                    element: consts::ITEM,
                    attribute: consts::HREF,
                },
            );
            return None;
        };

        match uri::resolve(self.path(), href) {
            Ok(path) => Some(path),
            Err(_) => {
                self.error(element, Issue::InvalidHref(href.to_owned()));
                None
            }
        }
    }

    fn check_remote_item(&mut self, element: &StartElement, item: &Item) {
        let path = self.path().to_owned();
        self.feature(Some(&path), Feature::Reference, item.path().unwrap_or_default());

        let media_type = item.media_type().unwrap_or_default();
        if self.rules.restrict_remote_resources
            && media_type::is_core_media(media_type)
            && !media_type::is_blessed_audio(media_type)
        {
            self.error(element, Issue::RemoteResourceNotAllowed);
        }
    }

    fn check_item_properties(&mut self, element: &StartElement, item: &Item) {
        let media_type = item.media_type().unwrap_or_default().trim();

        for property in item.properties() {
            // Prefixed properties belong to other vocabularies
            if property.contains(':') {
                continue;
            }
            let issue = match consts::ITEM_PROPERTIES
                .iter()
                .find(|(name, _)| *name == property.as_str())
            {
                None => Issue::UndefinedProperty(property.clone()),
                Some((_, types)) if !types.contains(&media_type) => Issue::PropertyNotApplicable {
                    property: property.clone(),
                    media_type: media_type.to_owned(),
                },
                Some(_) => continue,
            };
            self.error(element, issue);
        }
    }
}
