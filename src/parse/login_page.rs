use scraper::{ElementRef, Html, Selector};

use crate::parse::Error;
use crate::static_selector;

/// The hidden anti-forgery fields the portal's login form must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTokens {
    view_state: String,
    view_state_generator: String,
}

impl LoginTokens {
    pub fn from_page(html: &str) -> Result<Self, Error> {
        let document = Html::parse_document(html);
        Self::from_html_element(document.root_element())
    }

    pub fn from_html_element(element: ElementRef) -> Result<Self, Error> {
        static_selector!(VIEW_STATE_SELECTOR <- "input#__VIEWSTATE");
        static_selector!(VIEW_STATE_GENERATOR_SELECTOR <- "input#__VIEWSTATEGENERATOR");

        Ok(Self {
            view_state: hidden_value(element, &VIEW_STATE_SELECTOR, "__VIEWSTATE")?,
            view_state_generator: hidden_value(
                element,
                &VIEW_STATE_GENERATOR_SELECTOR,
                "__VIEWSTATEGENERATOR",
            )?,
        })
    }

    pub fn view_state(&self) -> &str {
        &self.view_state
    }

    pub fn view_state_generator(&self) -> &str {
        &self.view_state_generator
    }
}

fn hidden_value(element: ElementRef, selector: &Selector, field: &str) -> Result<String, Error> {
    element
        .select(selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_owned)
        .ok_or_else(|| Error::missing_field_error(field))
}
