//! Line parsing for the rater REPL
//!
//! What a line means depends on the phase: in `Rate` a number is a score,
//! in `BlindCompare` `left` is a choice, in `Identify` anything is a name.
//! A handful of keywords work everywhere.

use ttseval_application::Action;
use ttseval_domain::{Phase, Selection, VisibleChoice};

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Forward to the session
    Act(Action),
    /// Submit the suggested score for the current sample
    KeepScore,
    /// Continue with the first unfinished set
    Next,
    Legend,
    Report,
    Help,
    Quit,
}

/// Interpret `line` for the given phase
///
/// Returns a message for the rater when the line makes no sense here.
pub fn parse_command(phase: Phase, line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or("").to_lowercase();

    match keyword.as_str() {
        "quit" | "exit" | "q" => return Ok(ReplCommand::Quit),
        "help" | "h" | "?" => return Ok(ReplCommand::Help),
        "legend" => return Ok(ReplCommand::Legend),
        "report" => return Ok(ReplCommand::Report),
        _ => {}
    }

    match phase {
        Phase::Identify => Ok(ReplCommand::Act(Action::SubmitName(line.to_string()))),
        Phase::SelectSubject => parse_selection(&keyword, words.collect()),
        Phase::Rate => {
            if line.is_empty() {
                return Ok(ReplCommand::KeepScore);
            }
            match keyword.as_str() {
                "back" => return Ok(ReplCommand::Act(Action::GoBack)),
                "restart" => return Ok(ReplCommand::Act(Action::Restart)),
                _ => {}
            }
            let score = keyword
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not a score; enter a number", keyword))?;
            let remark = words.collect::<Vec<_>>().join(" ");
            Ok(ReplCommand::Act(Action::SubmitScore {
                score,
                remark: (!remark.is_empty()).then_some(remark),
            }))
        }
        Phase::BlindCompare => match keyword.as_str() {
            "back" => Ok(ReplCommand::Act(Action::GoBack)),
            "restart" => Ok(ReplCommand::Act(Action::Restart)),
            choice => choice
                .parse::<VisibleChoice>()
                .map(|c| ReplCommand::Act(Action::SubmitPreference(c)))
                .map_err(|_| "Choose left, right or tie".to_string()),
        },
        Phase::Done => match keyword.as_str() {
            "next" | "" => Ok(ReplCommand::Next),
            "restart" => Ok(ReplCommand::Act(Action::Restart)),
            other => Err(format!("Unknown command '{}'; try next or restart", other)),
        },
    }
}

fn parse_selection(keyword: &str, args: Vec<&str>) -> Result<ReplCommand, String> {
    let selection = match (keyword, args.as_slice()) {
        ("model", [model]) => Selection::model(*model),
        ("model", [model, version]) => Selection::model_version(*model, *version),
        ("pair", [baseline, experimental]) => Selection::pair(*baseline, *experimental),
        ("calibrate" | "calibration", []) => Selection::Calibration,
        ("next" | "", _) => return Ok(ReplCommand::Next),
        ("model", _) => return Err("Usage: model <id> [version]".to_string()),
        ("pair", _) => return Err("Usage: pair <baseline> <experimental>".to_string()),
        (other, _) => return Err(format!("Unknown command '{}'; type help", other)),
    };
    Ok(ReplCommand::Act(Action::Confirm(selection)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_takes_whole_line_as_name() {
        assert_eq!(
            parse_command(Phase::Identify, "  Alex Doe "),
            Ok(ReplCommand::Act(Action::SubmitName("Alex Doe".into())))
        );
    }

    #[test]
    fn test_global_keywords() {
        assert_eq!(parse_command(Phase::Rate, "quit"), Ok(ReplCommand::Quit));
        assert_eq!(parse_command(Phase::Identify, "legend"), Ok(ReplCommand::Legend));
        assert_eq!(parse_command(Phase::Done, "?"), Ok(ReplCommand::Help));
    }

    #[test]
    fn test_selection_commands() {
        assert_eq!(
            parse_command(Phase::SelectSubject, "model tts_v1 r2"),
            Ok(ReplCommand::Act(Action::Confirm(Selection::model_version(
                "tts_v1", "r2"
            ))))
        );
        assert_eq!(
            parse_command(Phase::SelectSubject, "pair a b"),
            Ok(ReplCommand::Act(Action::Confirm(Selection::pair("a", "b"))))
        );
        assert_eq!(
            parse_command(Phase::SelectSubject, "calibrate"),
            Ok(ReplCommand::Act(Action::Confirm(Selection::Calibration)))
        );
        assert_eq!(parse_command(Phase::SelectSubject, "next"), Ok(ReplCommand::Next));
        assert!(parse_command(Phase::SelectSubject, "pair a").is_err());
    }

    #[test]
    fn test_score_with_remark() {
        assert_eq!(
            parse_command(Phase::Rate, "72 a bit  flat"),
            Ok(ReplCommand::Act(Action::SubmitScore {
                score: 72,
                remark: Some("a bit flat".into()),
            }))
        );
        assert_eq!(
            parse_command(Phase::Rate, "-5"),
            Ok(ReplCommand::Act(Action::SubmitScore {
                score: -5,
                remark: None,
            }))
        );
        assert_eq!(parse_command(Phase::Rate, ""), Ok(ReplCommand::KeepScore));
        assert_eq!(
            parse_command(Phase::Rate, "back"),
            Ok(ReplCommand::Act(Action::GoBack))
        );
        assert_eq!(
            parse_command(Phase::Rate, "restart"),
            Ok(ReplCommand::Act(Action::Restart))
        );
        assert!(parse_command(Phase::Rate, "great").is_err());
    }

    #[test]
    fn test_blind_choices() {
        assert_eq!(
            parse_command(Phase::BlindCompare, "L"),
            Ok(ReplCommand::Act(Action::SubmitPreference(VisibleChoice::Left)))
        );
        assert_eq!(
            parse_command(Phase::BlindCompare, "tie"),
            Ok(ReplCommand::Act(Action::SubmitPreference(VisibleChoice::Tie)))
        );
        assert!(parse_command(Phase::BlindCompare, "both").is_err());
    }

    #[test]
    fn test_done_commands() {
        assert_eq!(parse_command(Phase::Done, "next"), Ok(ReplCommand::Next));
        assert_eq!(
            parse_command(Phase::Done, "restart"),
            Ok(ReplCommand::Act(Action::Restart))
        );
    }
}
