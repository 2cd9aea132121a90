/*!
`test-ai` - round trip through the AI endpoint.

Sends a fixed prompt and summarizes the answer: hash prefix, generation mode,
whether the backend saved it to Obsidian, and a short preview.
*/

use std::io::Write;

use super::dispatch::{Dispatcher, Outcome};
use super::format::{Role, preview};

pub const TEST_PROMPT: &str =
    "Write a sample note about agile methodologies to test the Obsidian integration";

const HASH_PREFIX: usize = 16;
const PREVIEW_CHARS: usize = 200;

pub fn execute_test_ai<W: Write>(d: &mut Dispatcher<'_, W>) -> Outcome {
    d.console.tell(
        "robot",
        Role::Warning,
        "Testing AI + Obsidian integration...",
    );

    let Some(resp) = d.service.test_ai(TEST_PROMPT) else {
        d.console.tell(
            "error",
            Role::Error,
            "AI test failed: service unavailable",
        );
        return Outcome::Failure;
    };

    let answer = match resp.answer.as_deref() {
        Some(a) if !a.is_empty() => a,
        _ => {
            d.console
                .tell("error", Role::Error, "No AI answer was received");
            return Outcome::Failure;
        }
    };

    let c = &mut d.console;
    c.tell("success", Role::Success, "AI answer generated successfully!");
    let hash: String = resp
        .hash
        .as_deref()
        .unwrap_or("N/A")
        .chars()
        .take(HASH_PREFIX)
        .collect();
    c.tell("link", Role::Plain, format!("Hash: {hash}..."));
    c.tell(
        "robot",
        Role::Plain,
        format!("Mode: {}", resp.ai_mode.as_deref().unwrap_or("N/A")),
    );

    if resp.obsidian.enabled {
        c.tell("note", Role::Success, "Obsidian saving: ACTIVE");
        c.say(
            Role::Primary,
            "   The answer was sent to Obsidian automatically.",
        );
        c.say(
            Role::Primary,
            "   File will be created at: AI Responses/[note-title].md",
        );
    } else {
        c.tell("note", Role::Warning, "Obsidian saving: INACTIVE");
    }

    c.blank();
    c.tell("list", Role::Primary, "Answer preview:");
    c.say(Role::Plain, format!("   {}", preview(answer, PREVIEW_CHARS)));
    c.blank();
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use super::super::dispatch::testing::{FakeService, Rig, output};
    use super::*;
    use crate::client::AiTestResponse;
    use crate::client::model::ObsidianInfo;

    fn run(ai: Option<AiTestResponse>) -> (Outcome, String, Vec<String>) {
        let rig = Rig::new(FakeService {
            ai,
            ..Default::default()
        });
        let mut d = rig.dispatcher();
        let outcome = execute_test_ai(&mut d);
        let out = output(d);
        let prompts = rig.service.prompts.borrow().clone();
        (outcome, out, prompts)
    }

    #[test]
    fn summarizes_a_full_answer() {
        let long = "a".repeat(250);
        let (outcome, out, prompts) = run(Some(AiTestResponse {
            answer: Some(long),
            hash: Some("0123456789abcdef0123".into()),
            ai_mode: Some("openai".into()),
            obsidian: ObsidianInfo { enabled: true },
        }));
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(prompts, vec![TEST_PROMPT.to_string()]);
        assert!(out.contains("Hash: 0123456789abcdef..."));
        assert!(out.contains("Mode: openai"));
        assert!(out.contains("Obsidian saving: ACTIVE"));
        assert!(out.contains("AI Responses/[note-title].md"));
        assert!(out.contains(&format!("   {}...", "a".repeat(200))));
        assert!(!out.contains(&"a".repeat(201)));
    }

    #[test]
    fn short_answer_and_missing_fields() {
        let (_, out, _) = run(Some(AiTestResponse {
            answer: Some("short".into()),
            ..Default::default()
        }));
        assert!(out.contains("Hash: N/A..."));
        assert!(out.contains("Mode: N/A"));
        assert!(out.contains("Obsidian saving: INACTIVE"));
        assert!(out.contains("   short\n"));
    }

    #[test]
    fn empty_answer_is_a_failure() {
        let (outcome, out, _) = run(Some(AiTestResponse {
            answer: Some(String::new()),
            ..Default::default()
        }));
        assert_eq!(outcome, Outcome::Failure);
        assert!(out.contains("No AI answer was received"));
    }

    #[test]
    fn absent_is_a_failure() {
        let (outcome, out, _) = run(None);
        assert_eq!(outcome, Outcome::Failure);
        assert!(out.contains("service unavailable"));
    }
}
