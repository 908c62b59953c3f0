use std::fs;
use std::path::Path;

/// Load an HTML fixture from src/tests/fixtures by name.
pub fn load_html_fixture(name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", name));
    fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("missing test fixture: {}", path.display()))
}
