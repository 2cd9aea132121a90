use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::{Role, table};
use super::page::PageTarget;

/// `pages` - list the page targets `open` accepts.
pub fn execute_pages<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console.tell("list", Role::Primary, "Available pages:");
    let rows: Vec<Vec<String>> = PageTarget::variants()
        .iter()
        .map(|p| {
            vec![
                p.name().to_string(),
                p.description().to_string(),
                d.config.url_for(p.path()),
            ]
        })
        .collect();
    let rendered = table(&["PAGE", "DESCRIPTION", "URL"], &rows, d.console.style());
    for line in rendered.lines() {
        d.console.raw(format!("   {line}"));
    }
    Outcome::Success
}
