/*!
Page targets for `open` and `pages`.

Closed set, in display order:
  home       -> ""
  dashboard  -> /dashboard.html
  notes      -> /strategic-notes.html
  posts      -> /post.html
  logs       -> /logs-dashboard.html
*/

use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PageTarget {
    Home,
    Dashboard,
    Notes,
    Posts,
    Logs,
}

impl PageTarget {
    /// All variants (order matters for help and error listings).
    pub const fn variants() -> &'static [PageTarget] {
        &[
            PageTarget::Home,
            PageTarget::Dashboard,
            PageTarget::Notes,
            PageTarget::Posts,
            PageTarget::Logs,
        ]
    }

    /// Case-insensitive lookup by name.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        let norm = s.trim().to_ascii_lowercase();
        Self::variants()
            .iter()
            .copied()
            .find(|p| p.name() == norm)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            PageTarget::Home => "home",
            PageTarget::Dashboard => "dashboard",
            PageTarget::Notes => "notes",
            PageTarget::Posts => "posts",
            PageTarget::Logs => "logs",
        }
    }

    /// Path appended to the base address.
    pub const fn path(&self) -> &'static str {
        match self {
            PageTarget::Home => "",
            PageTarget::Dashboard => "/dashboard.html",
            PageTarget::Notes => "/strategic-notes.html",
            PageTarget::Posts => "/post.html",
            PageTarget::Logs => "/logs-dashboard.html",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            PageTarget::Home => "Matriz main page",
            PageTarget::Dashboard => "Dashboard with AI and metrics",
            PageTarget::Notes => "Strategic notes and planning",
            PageTarget::Posts => "Posts and articles",
            PageTarget::Logs => "Log and monitoring dashboard",
        }
    }

    /// "home, dashboard, notes, posts, logs"
    pub fn names_joined() -> String {
        Self::variants()
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
