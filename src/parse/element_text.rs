use scraper::ElementRef;

/// All text below `element`, concatenated and trimmed.
pub fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Non-empty trimmed lines of `element`, where both `<br>` tags (separate text
/// nodes) and literal newlines count as line breaks.
pub fn text_segments<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element
        .text()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
