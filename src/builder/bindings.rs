use crate::builder::PackageBuilder;
use crate::consts;
use crate::diagnostics::Issue;
use crate::media_type;
use crate::package::Binding;
use crate::parser::StartElement;

impl PackageBuilder {
    /// `<bindings><mediaType media-type="..." handler="..."/></bindings>`
    pub(super) fn on_binding(&mut self, element: &StartElement) {
        let (Some(media_type), Some(handler)) = (
            element.attribute(consts::MEDIA_TYPE),
            element.attribute(consts::HANDLER),
        ) else {
            return;
        };

        if media_type::is_core_media(media_type) {
            self.error(element, Issue::CoreMediaTypeBinding(media_type.to_owned()));
            return;
        }
        if let Some(existing) = self
            .document
            .bindings
            .iter()
            .find(|binding| binding.media_type == media_type)
        {
            let issue = Issue::DuplicateBinding {
                media_type: media_type.to_owned(),
                handler: existing.handler_path.clone(),
            };
            self.error(element, issue);
            return;
        }

        let handler_path = self
            .document
            .index_by_id(handler)
            .and_then(|index| Some((index, self.document.item(index).path()?.to_owned())));
        match handler_path {
            Some((handler, handler_path)) => self.document.bindings.push(Binding {
                media_type: media_type.to_owned(),
                handler,
                handler_path,
                location: element.location,
            }),
            None => self.error(element, Issue::ItemNotFound(handler.to_owned())),
        }
    }
}
