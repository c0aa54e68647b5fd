use crate::builder::PackageBuilder;
use crate::consts;
use crate::diagnostics::{Feature, Issue};
use crate::package::SpineEntry;
use crate::parser::StartElement;

impl PackageBuilder {
    /// Links the `toc` attribute to its (NCX) item.
    pub(super) fn on_spine(&mut self, element: &StartElement) {
        let Some(idref) = element.attribute(consts::TOC) else {
            return;
        };
        let Some(index) = self.document.index_by_id(idref) else {
            self.error(element, Issue::ItemNotFound(idref.to_owned()));
            return;
        };

        let toc = self.document.item_mut(index);
        toc.is_ncx = true;
        let non_ncx = toc
            .media_type
            .as_deref()
            .is_some_and(|media_type| media_type != consts::NCX_TYPE);

        self.document.toc = Some(index);
        if non_ncx {
            self.error(element, Issue::TocNotNcx);
        }
    }

    pub(super) fn on_itemref(&mut self, element: &StartElement) {
        let Some(idref) = element.attribute(consts::IDREF) else {
            return;
        };
        let Some(index) = self.document.index_by_id(idref) else {
            self.error(element, Issue::ItemNotFound(idref.to_owned()));
            return;
        };
        let linear = element
            .attribute(consts::LINEAR)
            .is_none_or(|linear| linear.trim() != consts::LINEAR_NO);

        self.document.item_mut(index).add_to_spine(linear);
        self.document.spine.push(SpineEntry {
            item: index,
            idref: idref.to_owned(),
            location: element.location,
        });

        let properties = element.attribute(consts::PROPERTIES).unwrap_or_default();
        self.check_itemref_properties(element, properties);

        let fixed = properties
            .split_whitespace()
            .fold(self.pre_paginated, |fixed, property| match property {
                consts::LAYOUT_PRE_PAGINATED => true,
                consts::LAYOUT_REFLOWABLE => false,
                _ => fixed,
            });
        if fixed {
            let path = self.document.item(index).path().map(str::to_owned);
            self.feature(path.as_deref(), Feature::FixedLayout, "true");
        }
    }

    fn check_itemref_properties(&mut self, element: &StartElement, properties: &str) {
        if !self.rules.check_properties {
            return;
        }
        let mut tokens = properties.split_whitespace();
        let left = tokens.clone().any(|p| p == consts::PAGE_SPREAD_LEFT);
        let right = tokens.any(|p| p == consts::PAGE_SPREAD_RIGHT);

        if left && right {
            self.error(element, Issue::ConflictingPageSpread);
        }
    }
}
