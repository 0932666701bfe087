use scraper::Selector;

/// Compiles a selector literal. Only ever called with constants, so an invalid
/// selector is a programming error.
pub(super) fn compile(selector: &str) -> Selector {
    match Selector::parse(selector) {
        Ok(sel) => sel,
        Err(e) => panic!("Error parsing static selector {selector}: {e:?}"),
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: std::sync::LazyLock<scraper::Selector> =
            std::sync::LazyLock::new(|| $crate::parse::static_selector::compile($sel));
    };
}
