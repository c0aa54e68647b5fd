use crate::builder::PackageBuilder;
use crate::consts;
use crate::datetime::DateTime;
use crate::diagnostics::{Feature, Issue, Severity};
use crate::parser::StartElement;
use crate::util::str::StringExt;

fn is_valid_role(role: &str) -> bool {
    consts::MARC_RELATORS.contains(&role) || role.starts_with("oth.")
}

impl PackageBuilder {
    pub(super) fn on_dc_start(&mut self, element: &StartElement) {
        match element.name.as_str() {
            consts::IDENTIFIER if self.is_unique_identifier(element) => {
                self.document.unique_identifier_found = true;
            }
            consts::CREATOR if self.rules.check_creator_roles => {
                let role = element
                    .attribute_ns(consts::OPF_NAMESPACE, consts::ROLE)
                    .filter(|role| !role.is_empty() && !is_valid_role(role));

                if let Some(role) = role {
                    self.error(element, Issue::InvalidRole(role.to_owned()));
                }
            }
            _ => {}
        }
    }

    pub(super) fn on_dc_end(&mut self, element: &StartElement, text: &str) {
        let mut value = text.to_owned();
        value.trim_in_place();

        let feature = match element.name.as_str() {
            consts::IDENTIFIER if self.is_unique_identifier(element) => Feature::UniqueIdentifier,
            consts::DATE => return self.on_date(element, text),
            name @ (consts::TITLE | consts::LANGUAGE) => {
                if self.rules.warn_empty_title_language && value.is_empty() {
                    self.warning(element, Issue::EmptyElement(name.to_owned()));
                }
                if name == consts::TITLE {
                    Feature::DcTitle
                } else {
                    Feature::DcLanguage
                }
            }
            consts::CREATOR => Feature::DcCreator,
            consts::CONTRIBUTOR => Feature::DcContributor,
            consts::PUBLISHER => Feature::DcPublisher,
            consts::RIGHTS => Feature::DcRights,
            consts::SUBJECT => Feature::DcSubject,
            consts::DESCRIPTION => Feature::DcDescription,
            _ => return,
        };
        self.feature(None, feature, &value);
    }

    /// `<meta property="...">` (EPUB 3) and `<meta name="..." content="...">` (EPUB 2).
    pub(super) fn on_meta_end(&mut self, element: &StartElement, text: &str) {
        let value = text.trim();

        match element.attribute(consts::PROPERTY) {
            Some(consts::MODIFIED) => self.feature(None, Feature::ModifiedDate, value),
            Some(consts::RENDITION_LAYOUT) => {
                if value == consts::PRE_PAGINATED {
                    self.pre_paginated = true;
                    self.feature(None, Feature::FixedLayout, consts::PRE_PAGINATED);
                }
            }
            _ => {
                if element.attribute(consts::NAME) == Some(consts::FIXED_LAYOUT)
                    && element.attribute(consts::CONTENT) == Some("true")
                {
                    self.feature(None, Feature::FixedLayout, consts::FIXED_LAYOUT);
                }
            }
        }
    }

    fn is_unique_identifier(&self, element: &StartElement) -> bool {
        element
            .attribute(consts::ID)
            .filter(|id| !id.is_empty())
            .is_some_and(|id| self.document.unique_identifier() == Some(id))
    }

    fn on_date(&mut self, element: &StartElement, text: &str) {
        match DateTime::parse(text) {
            Ok(_) => self.feature(None, Feature::DcDate, text),
            Err(error) => {
                let value = text.to_owned();
                let detail = error.detail().to_owned();
                let severity = self.rules.invalid_date;
                let issue = match severity {
                    Severity::Error => Issue::InvalidDate { value, detail },
                    _ => Issue::UnrecommendedDate { value, detail },
                };
                self.report(severity, element, issue);
            }
        }
    }
}
