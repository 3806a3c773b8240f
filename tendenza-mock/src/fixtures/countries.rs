/// Default reference countries, in the natural (alphabetical) order the
/// reference query would return them.
pub fn all() -> &'static [&'static str] {
    &[
        "Argentina",
        "Australia",
        "Brazil",
        "France",
        "Germany",
        "India",
        "Italy",
        "Japan",
        "Mexico",
        "Philippines",
        "Turkey",
        "United Kingdom",
        "United States",
        "Vietnam",
    ]
}
