use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;
use super::page::PageTarget;

/// `open <page>` - resolve the page and hand its URL to the browser opener.
pub fn execute_open<W: Write>(d: &mut Dispatcher<'_, W>, target: &str) -> Outcome {
    let Some(page) = PageTarget::from_str_ci(target) else {
        d.console.tell(
            "error",
            Role::Error,
            format!("Page '{target}' not found!"),
        );
        d.console.say(
            Role::Warning,
            format!("Available pages: {}", PageTarget::names_joined()),
        );
        return Outcome::Failure;
    };

    let url = d.config.url_for(page.path());
    if d.browser.open(&url) {
        d.console
            .tell("web", Role::Success, format!("Opening {page}: {url}"));
        Outcome::Success
    } else {
        d.console
            .tell("error", Role::Error, format!("Could not open {url}"));
        Outcome::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::super::dispatch::testing::{FakeService, Rig, output};
    use super::*;

    #[test]
    fn opens_resolved_url() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        assert_eq!(execute_open(&mut d, "Dashboard"), Outcome::Success);
        assert!(output(d).contains("Opening dashboard: http://localhost:3001/dashboard.html"));
        assert_eq!(
            *rig.browser.opened.borrow(),
            vec!["http://localhost:3001/dashboard.html".to_string()]
        );
    }

    #[test]
    fn home_is_the_bare_base_url() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        execute_open(&mut d, "home");
        assert_eq!(
            *rig.browser.opened.borrow(),
            vec!["http://localhost:3001".to_string()]
        );
    }

    #[test]
    fn unknown_page_lists_choices_without_opening() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        assert_eq!(execute_open(&mut d, "settings"), Outcome::Failure);
        let out = output(d);
        assert!(out.contains("Page 'settings' not found!"));
        assert!(out.contains("Available pages: home, dashboard, notes, posts, logs"));
        assert!(rig.browser.opened.borrow().is_empty());
    }

    #[test]
    fn browser_failure_is_a_failure() {
        let mut rig = Rig::new(FakeService::default());
        rig.browser.fail = true;
        let mut d = rig.dispatcher();
        assert_eq!(execute_open(&mut d, "logs"), Outcome::Failure);
        assert!(output(d).contains("Could not open http://localhost:3001/logs-dashboard.html"));
    }
}
