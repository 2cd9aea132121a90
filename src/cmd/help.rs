/*!
`help` - grouped command reference.
*/

use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::Role;
use super::page::PageTarget;

const INFORMATION: &[(&str, &str)] = &[
    ("status", "Show server, storage and backup status"),
    ("pages", "List the pages that can be opened"),
    ("help", "Show this help"),
];

const MANAGEMENT: &[(&str, &str)] = &[
    ("start", "Start the server if it is not running"),
    ("backup", "Create a manual data backup"),
    ("test-ai", "Exercise the AI endpoint and Obsidian saving"),
    ("create-note", "Create a test note through the notes API"),
];

const EXAMPLES: &[&str] = &[
    "matriz-cli status",
    "matriz-cli open dashboard",
    "matriz-cli backup",
    "matriz-cli test-ai",
    "matriz-cli create-note",
];

pub fn execute_help<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    let c = &mut d.console;
    c.tell("tag", Role::Bold, "AVAILABLE COMMANDS");
    c.blank();

    c.tell("chart", Role::Primary, "INFORMATION:");
    for (name, about) in INFORMATION {
        c.say(Role::Plain, format!("   {name:<20}{about}"));
    }
    c.blank();

    c.tell("web", Role::Primary, "NAVIGATION:");
    c.say(
        Role::Plain,
        format!("   {:<20}{}", "open <page>", "Open a page in the browser"),
    );
    c.say(Role::Dim, "   Pages:");
    for page in PageTarget::variants() {
        c.say(
            Role::Plain,
            format!("   - {:<18}{}", page.name(), page.description()),
        );
    }
    c.blank();

    c.tell("rocket", Role::Primary, "MANAGEMENT:");
    for (name, about) in MANAGEMENT {
        c.say(Role::Plain, format!("   {name:<20}{about}"));
    }
    c.blank();

    c.tell("note", Role::Primary, "EXAMPLES:");
    for example in EXAMPLES {
        c.say(Role::Dim, format!("   {example}"));
    }
    c.say(
        Role::Dim,
        "   Run without arguments for interactive mode; exit, quit or q leaves it.",
    );
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use super::super::command::Command;
    use super::super::dispatch::testing::{FakeService, Rig, output};
    use super::*;

    #[test]
    fn mentions_every_command_and_page() {
        let rig = Rig::new(FakeService::default());
        let mut d = rig.dispatcher();
        execute_help(&mut d);
        let out = output(d);
        for name in Command::NAMES {
            assert!(out.contains(name), "help is missing {name}");
        }
        for page in PageTarget::variants() {
            assert!(out.contains(page.name()));
        }
        assert!(out.contains("INFORMATION:"));
        assert!(out.contains("MANAGEMENT:"));
    }
}
