//! Interactive question collection.
//!
//! Questions go through a `Prompter` so the answers flow can be driven by
//! scripted input in tests. `StdioPrompter` reads lines from any `BufRead`
//! and writes questions to any `Write`.

use crate::answers::{Answers, CampfireNotifications};
use crate::error::{RailyardError, Result};
use std::io::{self, BufRead, Write};
use tracing::debug;

pub const NEWRELIC_QUESTION: &str =
    "What is your NewRelic license key(enter nothing if you don't have one)?";
pub const HONEYBADGER_QUESTION: &str =
    "What is your Honeybadger API key(enter nothing if you don't have one)?";
pub const CAMPFIRE_QUESTION: &str = "Do you want TravisCI Campfire Notifications?";
pub const CAMPFIRE_SUBDOMAIN_QUESTION: &str = "What's your Campfire subdomain?";
pub const CAMPFIRE_API_KEY_QUESTION: &str = "What is your API key?";
pub const CAMPFIRE_ROOM_QUESTION: &str = "What is your Campfire room ID(not the name)?";

/// Asks questions and returns the user's reply.
pub trait Prompter {
    /// Ask a free-form question; the reply may be empty
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Ask a yes/no question. Only `y` or `yes` (any case) is affirmative.
    fn yes(&mut self, question: &str) -> Result<bool> {
        let reply = self.ask(question)?;
        Ok(is_affirmative(&reply))
    }
}

fn is_affirmative(reply: &str) -> bool {
    matches!(reply.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Line-based prompter over a reader/writer pair.
pub struct StdioPrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl StdioPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Questions on stderr, replies from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| RailyardError::prompt(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            return Err(RailyardError::prompt(format!(
                "input closed before answering {:?}",
                question
            )));
        }

        Ok(line.trim().to_string())
    }
}

/// Ask every question, in order, and collect the answers.
pub fn collect_answers(prompter: &mut dyn Prompter) -> Result<Answers> {
    let newrelic_license_key = prompter.ask(NEWRELIC_QUESTION)?;
    let honeybadger_api_key = prompter.ask(HONEYBADGER_QUESTION)?;

    let campfire = if prompter.yes(CAMPFIRE_QUESTION)? {
        Some(CampfireNotifications {
            subdomain: prompter.ask(CAMPFIRE_SUBDOMAIN_QUESTION)?,
            api_key: prompter.ask(CAMPFIRE_API_KEY_QUESTION)?,
            room_id: prompter.ask(CAMPFIRE_ROOM_QUESTION)?,
        })
    } else {
        None
    };

    let answers = Answers {
        newrelic_license_key,
        honeybadger_api_key,
        campfire,
    };
    debug!("collected answers ({})", answers.integrations());

    Ok(answers)
}
