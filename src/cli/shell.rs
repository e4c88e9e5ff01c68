use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, ShellContext};
use crate::cli::help::usage_forms;
use crate::cli::output::info as output_info;
use crate::config::Config;
use crate::ledger::SharedLedger;
use crate::services::SearchService;

/// Environment variable that switches the shell to line-by-line stdin mode.
pub const SCRIPT_ENV: &str = "SME_LEDGER_CLI_SCRIPT";

const SME_SUBCOMMANDS: [&str; 5] = ["add", "edit", "remove", "list", "show"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Script => drive(&mut context, ScriptInput::new(io::stdin().lock())),
        CliMode::Interactive => {
            let input = PromptInput::new(&context)?;
            output_info("SME Ledger shell. Type `help` to list commands or `demo` to load sample SMEs.");
            drive(&mut context, input)
        }
    }
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Where the shell reads its next command from.
trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError>;
}

fn drive(context: &mut ShellContext, mut source: impl LineSource) -> Result<(), CliError> {
    while context.running {
        match source.next_line(&context.prompt())? {
            Input::Line(line) => {
                if let Err(err) = context.process_line(&line) {
                    context.report_error(err)?;
                }
            }
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Input::Closed => break,
        }
    }
    tracing::debug!(status = %context.status(), "shell finished");
    Ok(())
}

struct ScriptInput<B> {
    lines: io::Lines<B>,
}

impl<B: BufRead> ScriptInput<B> {
    fn new(reader: B) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<B: BufRead> LineSource for ScriptInput<B> {
    fn next_line(&mut self, _prompt: &str) -> Result<Input, CliError> {
        match self.lines.next() {
            Some(line) => Ok(Input::Line(line?)),
            None => Ok(Input::Closed),
        }
    }
}

struct PromptInput {
    editor: Editor<LedgerHelper, DefaultHistory>,
}

impl PromptInput {
    fn new(context: &ShellContext) -> Result<Self, CliError> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(LedgerHelper::new(
            context.command_usages(),
            context.ledger.clone(),
        )));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for PromptInput {
    fn next_line(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    self.editor.add_history_entry(line).ok();
                }
                Ok(Input::Line(line.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                Ok(Input::Closed)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Completes command words and the ids the ledger currently holds, and hints
/// at a command's arguments once its name is typed.
struct LedgerHelper {
    /// `(name, usage)` in registration order.
    commands: Vec<(&'static str, &'static str)>,
    ledger: SharedLedger,
}

impl LedgerHelper {
    fn new(commands: Vec<(&'static str, &'static str)>, ledger: SharedLedger) -> Self {
        Self { commands, ledger }
    }

    /// Start of the word under the cursor and the candidates that extend it.
    fn complete_prefix(&self, prefix: &str) -> (usize, Vec<String>) {
        let word = prefix.rsplit(char::is_whitespace).next().unwrap_or("");
        let start = prefix.len() - word.len();
        let preceding: Vec<&str> = prefix[..start].split_whitespace().collect();
        let needle = word.to_ascii_lowercase();
        let matches = self
            .candidates(&preceding)
            .into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .collect();
        (start, matches)
    }

    fn candidates(&self, preceding: &[&str]) -> Vec<String> {
        let lowered: Vec<String> = preceding.iter().map(|word| word.to_ascii_lowercase()).collect();
        let words: Vec<&str> = lowered.iter().map(String::as_str).collect();
        match words.as_slice() {
            [] | ["help"] => self.commands.iter().map(|(name, _)| name.to_string()).collect(),
            ["sme"] => owned(&SME_SUBCOMMANDS),
            ["sme", "edit" | "remove" | "delete" | "show"] => self.sme_ids(),
            ["pay"] => self.active_sme_ids(),
            ["receipt"] => self.receipt_ids(),
            ["txn"] => owned(&["list"]),
            ["config"] => owned(&["show", "set"]),
            ["config", "set"] => owned(&Config::KEYS),
            _ => Vec::new(),
        }
    }

    fn sme_ids(&self) -> Vec<String> {
        self.ledger
            .read(|store| store.smes().iter().map(|sme| sme.id.to_string()).collect())
    }

    fn active_sme_ids(&self) -> Vec<String> {
        let projection = self.ledger.project();
        SearchService::active_smes(&projection)
            .into_iter()
            .map(|entry| entry.id().to_string())
            .collect()
    }

    fn receipt_ids(&self) -> Vec<String> {
        self.ledger.read(|store| {
            store
                .transactions()
                .iter()
                .map(|txn| txn.receipt_id.to_string())
                .collect()
        })
    }

    /// Argument synopsis for `line` when it is exactly `<command> `.
    fn usage_hint(&self, line: &str) -> Option<String> {
        let name = line.strip_suffix(' ')?;
        let (_, usage) = self
            .commands
            .iter()
            .find(|(command, _)| command.eq_ignore_ascii_case(name))?;
        let form = usage_forms(usage).next()?;
        let args = form.split_once(' ')?.1;
        Some(args.to_string())
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

impl Helper for LedgerHelper {}

impl Completer for LedgerHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.complete_prefix(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for LedgerHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for LedgerHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for LedgerHelper {}
