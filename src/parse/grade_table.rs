use scraper::{ElementRef, Html};

use super::element_text::{text_segments, trimmed_text};
use crate::grade::GradeRecord;
use crate::parse::Error;
use crate::static_selector;

// Positional columns of the grades table as the portal currently renders it.
// Revalidate these whenever the portal's markup changes.
const SUBJECT_COLUMN: usize = 0;
const SUBJECT_TYPE_COLUMN: usize = 1;
const GRADE_COLUMN: usize = 5;

/// Parses the grades page into one record per table row, top to bottom.
///
/// Fails only when the grades table itself is missing. Rows never fail: a
/// field that cannot be read degrades to an empty string.
pub fn grades_from_page(html: &str) -> Result<Vec<GradeRecord>, Error> {
    let document = Html::parse_document(html);
    grades_from_html_element(document.root_element())
}

pub fn grades_from_html_element(element: ElementRef) -> Result<Vec<GradeRecord>, Error> {
    static_selector!(TABLE_SELECTOR <- "table#ctl00_ctl00_ContentPlaceHolder_RightContentPlaceHolder_dgDane");
    static_selector!(ROW_SELECTOR <- "tr");

    let Some(table) = element.select(&TABLE_SELECTOR).next() else {
        return Err(Error::html_parse_error("Grades table not found"));
    };

    // first row is the header
    Ok(table
        .select(&ROW_SELECTOR)
        .skip(1)
        .filter_map(record_from_row)
        .collect())
}

fn record_from_row(row: ElementRef) -> Option<GradeRecord> {
    static_selector!(CELL_SELECTOR <- "td");
    let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
    if cells.is_empty() {
        return None;
    }
    let text_at = |i: usize| cells.get(i).map(|c| trimmed_text(*c)).unwrap_or_default();
    let (grade, date) = cells
        .get(GRADE_COLUMN)
        .map(|c| split_grade_cell(*c))
        .unwrap_or_default();

    Some(GradeRecord::new(
        text_at(SUBJECT_COLUMN),
        text_at(SUBJECT_TYPE_COLUMN),
        grade,
        date,
    ))
}

/// Reads `(grade, date)` from the grade cell.
///
/// Finalized grades come as two `span.ocena` elements. Anything else is read as
/// plain text lines: two lines are grade and date, one line is a grade without
/// a date, and any other shape yields two empty strings.
fn split_grade_cell(cell: ElementRef) -> (String, String) {
    static_selector!(GRADE_SPAN_SELECTOR <- "span.ocena");
    let spans: Vec<ElementRef> = cell.select(&GRADE_SPAN_SELECTOR).collect();
    if let [grade, date] = spans.as_slice() {
        return (trimmed_text(*grade), trimmed_text(*date));
    }

    let segments: Vec<&str> = text_segments(cell).collect();
    match segments.as_slice() {
        [grade, date] => ((*grade).to_owned(), (*date).to_owned()),
        [grade] => ((*grade).to_owned(), String::new()),
        _ => (String::new(), String::new()),
    }
}
