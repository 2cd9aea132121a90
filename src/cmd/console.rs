//! Line-oriented writer for user-facing output.
//!
//! Commands never call `println!` directly; they go through a `Console` so the
//! same code renders to stdout in the binary and to a buffer in tests.

use std::io::{self, Write};

use super::format::{Role, StyleOptions, color, tagged};

pub struct Console<W: Write> {
    out: W,
    style: StyleOptions,
}

impl Console<io::Stdout> {
    pub fn stdout(style: StyleOptions) -> Self {
        Console::new(io::stdout(), style)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, style: StyleOptions) -> Self {
        Console { out, style }
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    /// Print one colored line. A closed stdout is not worth failing a command over.
    pub fn say(&mut self, role: Role, text: impl AsRef<str>) {
        let line = color(role, text, &self.style);
        let _ = writeln!(self.out, "{line}");
    }

    /// Print one colored line prefixed by the emoji for `tag`.
    pub fn tell(&mut self, tag: &str, role: Role, text: impl AsRef<str>) {
        let line = tagged(tag, text, &self.style);
        self.say(role, line);
    }

    /// Print preformatted text as-is (already colored or multi-line).
    pub fn raw(&mut self, text: impl AsRef<str>) {
        let _ = writeln!(self.out, "{}", text.as_ref());
    }

    pub fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Write without a newline and flush, for prompts.
    pub fn prompt(&mut self, text: impl AsRef<str>) {
        let _ = write!(self.out, "{}", text.as_ref());
        let _ = self.out.flush();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
