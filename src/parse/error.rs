#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTML Parse Error: {0}")]
    HtmlParse(String),
    #[error("Missing Field Error: {0}")]
    MissingField(String),
}

impl Error {
    pub fn html_parse_error(msg: &str) -> Self {
        Self::HtmlParse(msg.to_string())
    }

    pub fn missing_field_error(field: &str) -> Self {
        Self::MissingField(format!("`{field}` was not found on the page"))
    }
}
