//! Console output formatter for rating sessions

use colored::Colorize;
use ttseval_application::WorkflowController;
use ttseval_domain::{
    CalibrationReport, ModelPair, Phase, ScoreScale, SessionState, Subject, WorkflowVariant,
    WorkflowWarning, legend,
};

/// Formats session screens for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner shown once when the session starts
    pub fn welcome(variant: WorkflowVariant) -> String {
        let mut output = Self::header(&format!("ttseval - {} session", variant));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Scale:".cyan().bold(),
            variant.scale()
        ));
        output.push_str(&format!("{}\n", "Type 'help' for commands.".dimmed()));
        output
    }

    /// The criteria legend for `scale`
    pub fn legend(scale: ScoreScale) -> String {
        let mut output = Self::section_header(&format!("Rating criteria ({})", scale));
        for band in legend(scale) {
            output.push_str(&format!(
                "  {:>6}  {:<20} {}\n",
                band.range.bold(),
                band.label,
                band.description.dimmed()
            ));
        }
        output
    }

    /// The screen for the current phase of `state`
    pub fn screen(state: &SessionState, controller: &WorkflowController) -> String {
        match state.phase() {
            Phase::Identify => format!("{}\n", "Please enter your name to start.".cyan()),
            Phase::SelectSubject => Self::selection_menu(state, controller),
            Phase::Rate => Self::rating_screen(state, controller),
            Phase::BlindCompare => Self::blind_screen(state, controller),
            Phase::Done => Self::done_screen(state, controller),
        }
    }

    fn selection_menu(state: &SessionState, controller: &WorkflowController) -> String {
        let catalog = controller.catalog();
        let mut output = Self::section_header("Select what to rate");

        match state.variant() {
            WorkflowVariant::Single => {
                for model in catalog.models() {
                    let versions = catalog.versions(model);
                    if versions.is_empty() {
                        output.push_str(&format!("  model {}\n", model));
                    } else {
                        output.push_str(&format!(
                            "  model {} [{}]\n",
                            model,
                            versions.join(" | ")
                        ));
                    }
                }
            }
            WorkflowVariant::Paired | WorkflowVariant::Blind => {
                let remaining = controller.remaining_pairs(state);
                if remaining.is_empty() {
                    output.push_str(&format!("  {}\n", "All pairs completed.".green()));
                }
                for pair in remaining {
                    output.push_str(&format!("  {}\n", Self::pair_command(&pair)));
                }
            }
            WorkflowVariant::Calibration => {
                output.push_str("  calibrate\n");
            }
        }

        if let Some(next) = controller.next_selection(state) {
            output.push_str(&format!("{} {}\n", "next:".dimmed(), next));
        }
        output
    }

    fn pair_command(pair: &ModelPair) -> String {
        format!("pair {} {}", pair.baseline, pair.experimental)
    }

    fn rating_screen(state: &SessionState, controller: &WorkflowController) -> String {
        let Some(subject) = state.current_subject() else {
            return String::new();
        };
        let (position, total) = state.progress();
        let mut output = format!(
            "\n{} {}\n",
            format!("── Sample {} of {} ──", position, total).yellow().bold(),
            Self::subject_label(state, subject).dimmed()
        );
        output.push_str(&format!(
            "{} {}\n",
            "Transcript:".cyan().bold(),
            subject.transcript
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Audio:".cyan().bold(),
            controller.assets().locate_subject(subject).display()
        ));
        if let Some(score) = controller.prefill_score(state) {
            output.push_str(&format!(
                "{} {} {}\n",
                "Score".cyan().bold(),
                format!("({})", state.variant().scale()).dimmed(),
                format!("[{}]", score).bold()
            ));
        }
        output
    }

    /// Model names stay hidden in paired sessions so scoring is not biased
    fn subject_label(state: &SessionState, subject: &Subject) -> String {
        match state.variant() {
            WorkflowVariant::Single => subject.label(),
            WorkflowVariant::Paired | WorkflowVariant::Blind => {
                let side = if state.cursor() % 2 == 0 { "A" } else { "B" };
                format!("sample {}", side)
            }
            WorkflowVariant::Calibration => String::new(),
        }
    }

    fn blind_screen(state: &SessionState, controller: &WorkflowController) -> String {
        let (Some(pair), Some(presentation)) = (state.current_pair(), state.blind_presentation())
        else {
            return String::new();
        };
        let (position, total) = state.progress();
        let assets = controller.assets();

        let mut output = format!(
            "\n{}\n",
            format!("── Blind comparison {} of {} ──", position, total)
                .yellow()
                .bold()
        );
        output.push_str(&format!(
            "{} {}\n",
            "Transcript:".cyan().bold(),
            pair.transcript()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Left: ".cyan().bold(),
            assets.locate_subject(presentation.left(pair)).display()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Right:".cyan().bold(),
            assets.locate_subject(presentation.right(pair)).display()
        ));
        output.push_str(&format!(
            "{}\n",
            "Which sounds better? left / right / tie".dimmed()
        ));
        output
    }

    fn done_screen(state: &SessionState, controller: &WorkflowController) -> String {
        let mut output = format!(
            "\n{}\n",
            "All samples in this set have been rated. Thank you!"
                .green()
                .bold()
        );
        if controller.next_selection(state).is_some() {
            output.push_str(&format!(
                "{}\n",
                "Type 'next' for the next set or 'restart' to choose.".dimmed()
            ));
        }
        output
    }

    /// A recoverable rejection
    pub fn warning(warning: &WorkflowWarning) -> String {
        format!("{} {}", "!".yellow().bold(), warning.to_string().yellow())
    }

    /// A failure that left the session unchanged
    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Confirmation after records were written
    pub fn saved(count: usize) -> String {
        let noun = if count == 1 { "rating" } else { "ratings" };
        format!("{}", format!("Saved {} {}.", count, noun).green())
    }

    pub fn calibration_report(report: &CalibrationReport) -> String {
        let mut output = Self::section_header("Calibration result");
        output.push_str(&format!("  Rated:          {}\n", report.rated));
        output.push_str(&format!("  Accuracy:       {:.1}%\n", report.accuracy));
        output.push_str(&format!("  Average error:  {:.2}\n", report.avg_error));
        output.push_str(&format!(
            "  Error range:    {:.1} - {:.1}\n",
            report.min_error, report.max_error
        ));
        let verdict = if report.passed {
            "You understand the criteria well.".green().bold()
        } else {
            "Please review the criteria and try again.".yellow().bold()
        };
        output.push_str(&format!("\n  {}\n", verdict));
        output
    }

    pub fn help(phase: Phase) -> String {
        let mut output = Self::section_header("Commands");
        let lines: &[&str] = match phase {
            Phase::Identify => &["<name>                 start the session"],
            Phase::SelectSubject => &[
                "model <id> [version]   rate one model",
                "pair <base> <exp>      rate a model pair",
                "calibrate              start the calibration quiz",
                "next                   pick the next unfinished set",
            ],
            Phase::Rate => &[
                "<score> [remark]       save a score and continue",
                "<enter>                keep the suggested score",
                "back                   previous sample",
                "restart                back to selection",
            ],
            Phase::BlindCompare => &[
                "left | right | tie     pick the better sample",
                "back                   previous pair",
            ],
            Phase::Done => &[
                "next                   continue with the next set",
                "restart                back to selection",
            ],
        };
        for line in lines {
            output.push_str(&format!("  {}\n", line));
        }
        output.push_str("  legend                 show the rating criteria\n");
        output.push_str("  report                 calibration accuracy\n");
        output.push_str("  quit                   leave (saved ratings are kept)\n");
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
