//! REPL driving one rater through a session

use super::command::{ReplCommand, parse_command};
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::{debug, warn};
use ttseval_application::{Action, RunSessionUseCase};
use ttseval_domain::{Phase, SessionState, WorkflowVariant};

/// Interactive rating REPL
pub struct RaterRepl {
    use_case: RunSessionUseCase,
    config: ReplConfig,
    name: Option<String>,
}

impl RaterRepl {
    pub fn new(use_case: RunSessionUseCase, config: ReplConfig) -> Self {
        Self {
            use_case,
            config,
            name: None,
        }
    }

    /// Identify the rater up front instead of asking
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Run the interactive REPL until the rater quits
    pub fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let variant = self.use_case.controller().config().variant;
        println!("{}", ConsoleFormatter::welcome(variant));
        if self.config.show_legend {
            print!("{}", ConsoleFormatter::legend(variant.scale()));
        }

        let mut state = self.use_case.start();
        if let Some(name) = self.name.clone() {
            self.step(&mut state, Action::SubmitName(name));
        }

        loop {
            print!(
                "{}",
                ConsoleFormatter::screen(&state, self.use_case.controller())
            );
            let prompt = format!("{}> ", state.phase().as_str());

            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    match parse_command(state.phase(), &line) {
                        Ok(ReplCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => self.execute(&mut state, command),
                        Err(message) => println!("{}", ConsoleFormatter::error(&message)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn execute(&self, state: &mut SessionState, command: ReplCommand) {
        match command {
            ReplCommand::Act(action) => self.step(state, action),
            ReplCommand::KeepScore => match self.use_case.controller().prefill_score(state) {
                Some(score) => self.step(
                    state,
                    Action::SubmitScore {
                        score: i64::from(score.value()),
                        remark: None,
                    },
                ),
                None => println!("{}", ConsoleFormatter::error("Enter a score")),
            },
            ReplCommand::Next => self.next(state),
            ReplCommand::Legend => {
                print!("{}", ConsoleFormatter::legend(state.variant().scale()));
            }
            ReplCommand::Report => self.print_report(state),
            ReplCommand::Help => print!("{}", ConsoleFormatter::help(state.phase())),
            ReplCommand::Quit => {}
        }
    }

    /// Continue with the first set this rater has not finished
    fn next(&self, state: &mut SessionState) {
        let Some(selection) = self.use_case.controller().next_selection(state) else {
            println!("Nothing left to rate.");
            return;
        };
        if state.phase() == Phase::Done {
            self.step(state, Action::Restart);
        }
        self.step(state, Action::Confirm(selection));
    }

    fn step(&self, state: &mut SessionState, action: Action) {
        let before = state.phase();
        debug!("Dispatching '{}' in {}", action.name(), before);

        match self.use_case.dispatch(state, action) {
            Ok(report) => {
                if let Some(warning) = &report.warning {
                    println!("{}", ConsoleFormatter::warning(warning));
                }
                if report.persisted > 0 {
                    println!("{}", ConsoleFormatter::saved(report.persisted));
                }
                if report.loaded > 0 {
                    println!("Found {} earlier ratings; they will be suggested.", report.loaded);
                }
            }
            Err(e) => {
                warn!("Step failed: {}", e);
                println!(
                    "{}",
                    ConsoleFormatter::error(&format!("{} (nothing changed, try again)", e))
                );
                return;
            }
        }

        if before != Phase::Done
            && state.phase() == Phase::Done
            && state.variant() == WorkflowVariant::Calibration
        {
            self.print_report(state);
        }
    }

    fn print_report(&self, state: &SessionState) {
        let Some(rater) = state.rater() else {
            println!("{}", ConsoleFormatter::error("Enter your name first"));
            return;
        };
        match self.use_case.calibration_report(rater) {
            Ok(Some(report)) => print!("{}", ConsoleFormatter::calibration_report(&report)),
            Ok(None) => println!("No calibration samples rated yet."),
            Err(e) => println!("{}", ConsoleFormatter::error(&e.to_string())),
        }
    }
}
