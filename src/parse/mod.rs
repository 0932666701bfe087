mod element_text;
mod error;
mod grade_table;
mod login_page;
mod static_selector;

pub use error::Error;
pub use grade_table::grades_from_page;
pub use login_page::LoginTokens;
