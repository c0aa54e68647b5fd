use crate::diagnostics::Issue;
use crate::validate::Pass;
use crate::xref::ReferenceGraph;

impl Pass<'_> {
    /// Binding handlers registered with `graph` must be scripted.
    pub(super) fn check_bindings(&mut self, graph: &dyn ReferenceGraph) {
        let document = self.document;

        for media_type in graph.bindings_mime_types() {
            let handler = graph
                .binding_handler_src(media_type)
                .and_then(|src| Some((src, document.item_by_path(src)?)));

            // Handlers that are not manifest items were reported while building
            let Some((src, handler)) = handler else {
                log::debug!("binding handler for {media_type} is not a manifest item");
                continue;
            };
            if !handler.is_scripted() {
                self.diagnostics.error(
                    src,
                    Some(handler.location()),
                    Issue::BindingHandlerNotScripted,
                );
            }
        }
    }
}
