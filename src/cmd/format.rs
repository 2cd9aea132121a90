/*!
format.rs

Formatting utilities for the human output of `matriz-cli`.

  - StyleOptions::detect() / StyleOptions::plain()
  - color(role, text, &StyleOptions) -> String
  - emoji(tag, &StyleOptions) -> &'static str
  - box_header(title, subtitle_opt, &StyleOptions) -> String
  - table(headers, rows, &StyleOptions) -> String
  - preview(s, max_chars) -> String

Colors are disabled by NO_COLOR (or `--no-color`), emoji by NO_EMOJI.
Nothing in here prints; callers hand the strings to a `Console`.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
    pub padding: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let use_color = std::env::var_os("NO_COLOR").is_none();
        let use_emoji = std::env::var_os("NO_EMOJI").is_none();

        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color,
            use_emoji,
            term_width: width,
            padding: 1,
        }
    }

    /// No ANSI codes, no emoji, fixed width. Used by `--no-color` and tests.
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
            padding: 1,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Primary,
    Accent,
    Success,
    Warning,
    Error,
    Plain,
    Dim,
    Bold,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Plain => return text.as_ref().to_string(),
        Role::Primary => "96", // cyan
        Role::Accent => "94",  // blue
        Role::Success => "92", // green
        Role::Warning => "93", // yellow
        Role::Error => "91",   // red
        Role::Dim => "2",
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✅",
        "error" => "❌",
        "hint" => "💡",
        "search" => "🔍",
        "clock" => "📅",
        "db" => "🗄️",
        "globe" => "🌍",
        "chart" => "📊",
        "package" => "📦",
        "rocket" => "🚀",
        "wait" => "⏳",
        "robot" => "🤖",
        "note" => "📝",
        "link" => "🔗",
        "folder" => "📁",
        "tag" => "🏷️",
        "list" => "📋",
        "web" => "🌐",
        "wave" => "👋",
        "stop" => "🛑",
        "brain" => "🧠",
        _ => "",
    }
}

/// Join an emoji and a message, dropping the separator when emoji are off.
pub fn tagged(tag: &str, text: impl AsRef<str>, style: &StyleOptions) -> String {
    let e = emoji(tag, style);
    if e.is_empty() {
        text.as_ref().to_string()
    } else {
        format!("{e} {}", text.as_ref())
    }
}

/* -------------------------------------------------------------------------- */
/* Box Header                                                                 */
/* -------------------------------------------------------------------------- */

pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let (h, v, tl, tr, bl, br) = ('═', '║', '╔', '╗', '╚', '╝');

    let title_line = title.as_ref().to_string();
    let sub_line = subtitle.as_ref().map(|s| AsRef::<str>::as_ref(s).to_string());

    let content_width = style.term_width.clamp(20, 200);
    let padding = style.padding;
    let widest = std::iter::once(&title_line)
        .chain(sub_line.iter())
        .map(|l| display_width(l))
        .max()
        .unwrap_or(0);
    let inner = (widest + padding * 2).min(content_width - 2);
    let text_width = inner - padding * 2;

    let mut lines = vec![format!("{tl}{}{tr}", h.to_string().repeat(inner))];
    let rows = wrap_text(&title_line, text_width)
        .into_iter()
        .map(|l| (l, Role::Primary))
        .chain(
            sub_line
                .iter()
                .flat_map(|s| wrap_text(s, text_width))
                .map(|l| (l, Role::Dim)),
        );
    for (row, role) in rows {
        // Center each row inside the frame.
        let free = text_width.saturating_sub(display_width(&row));
        let left = free / 2;
        let right = free - left;
        lines.push(format!(
            "{v}{pad}{lsp}{text}{rsp}{pad}{v}",
            pad = " ".repeat(padding),
            lsp = " ".repeat(left),
            text = color(role, &row, style),
            rsp = " ".repeat(right),
        ));
    }
    lines.push(format!("{bl}{}{br}", h.to_string().repeat(inner)));

    lines.join("\n")
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                             */
/* -------------------------------------------------------------------------- */

/// Left-aligned columns separated by two spaces. Header row is accented.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| pad(c, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(color(
        Role::Accent,
        render_row(headers.iter().map(|h| h.to_string()).collect()),
        style,
    ));
    for row in rows {
        let cells = (0..col_count)
            .map(|c| row.get(c).cloned().unwrap_or_default())
            .collect();
        out.push(render_row(cells));
    }
    out.join("\n")
}

fn pad(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/* -------------------------------------------------------------------------- */
/* Text Helpers                                                                */
/* -------------------------------------------------------------------------- */

pub fn wrap_text(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        if !current.is_empty() && display_width(&current) + display_width(word) + 1 > max_width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// First `max_chars` characters, with `...` appended when anything was cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                      */
/* -------------------------------------------------------------------------- */

pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Skip parameters up to and including the final letter.
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                       */
/* -------------------------------------------------------------------------- */
