use std::path::PathBuf;

use assistant_core::{AppViewModel, FileHandle, Msg, SlotKind};

pub const HELP: &str = "\
Commands:
  find <text>      focus the employee search and type <text>
  focus | blur     focus or leave the search box
  down | up        move the suggestion highlight
  enter            select the highlighted suggestion
  esc              close the suggestions
  pick <n>         click the n-th suggestion
  clear            clear the selected employee
  question <text>  set the question
  ask [text]       ask the assistant (optionally setting the question first)
  roster <path>    choose the employee data file (CSV/XLSX)
  policy <path>    choose the policy document (PDF)
  upload           upload both files
  ok               dismiss the current notice
  show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Turns one console line into the messages a form user would produce.
/// `view` resolves suggestion numbers to names.
pub fn parse(line: &str, view: &AppViewModel) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" | "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "find" => Command::Dispatch(vec![Msg::SearchFocused, Msg::SearchChanged(rest.to_string())]),
        "focus" => Command::Dispatch(vec![Msg::SearchFocused]),
        "blur" => Command::Dispatch(vec![Msg::SearchBlurred]),
        "down" => Command::Dispatch(vec![Msg::HighlightNext]),
        "up" => Command::Dispatch(vec![Msg::HighlightPrev]),
        "enter" => Command::Dispatch(vec![Msg::HighlightConfirmed]),
        "esc" => Command::Dispatch(vec![Msg::SearchEscaped]),
        "pick" => pick(rest, view),
        "clear" => Command::Dispatch(vec![Msg::SelectionCleared]),
        "question" => Command::Dispatch(vec![Msg::QuestionChanged(rest.to_string())]),
        "ask" if rest.is_empty() => Command::Dispatch(vec![Msg::AskClicked]),
        "ask" => Command::Dispatch(vec![Msg::QuestionChanged(rest.to_string()), Msg::AskClicked]),
        "roster" => choose_file(SlotKind::Roster, rest),
        "policy" => choose_file(SlotKind::Policy, rest),
        "upload" => Command::Dispatch(vec![Msg::UploadClicked]),
        "ok" | "dismiss" => Command::Dispatch(vec![Msg::NoticeDismissed]),
        other => Command::Invalid(format!("unknown command `{other}`; type `help`")),
    }
}

// A click is press, input blur, release; the blur must not eat the click.
fn pick(rest: &str, view: &AppViewModel) -> Command {
    let Ok(number) = rest.parse::<usize>() else {
        return Command::Invalid("usage: pick <n>".to_string());
    };
    let Some(suggestion) = number
        .checked_sub(1)
        .and_then(|index| view.search.suggestions.get(index))
    else {
        return Command::Invalid(format!("no suggestion #{number} is shown"));
    };
    let name = suggestion.name.clone();
    Command::Dispatch(vec![
        Msg::SuggestionPressed(name.clone()),
        Msg::SearchBlurred,
        Msg::SuggestionReleased(name),
    ])
}

fn choose_file(slot: SlotKind, rest: &str) -> Command {
    if rest.is_empty() {
        return Command::Invalid(format!("usage: {} <path>", slot_command(slot)));
    }
    let path = PathBuf::from(rest);
    if !path.is_file() {
        return Command::Invalid(format!("{} is not a file", path.display()));
    }
    match FileHandle::from_path(path) {
        Some(file) => Command::Dispatch(vec![Msg::FileChosen { slot, file }]),
        None => Command::Invalid(format!("{rest} has no file name")),
    }
}

fn slot_command(slot: SlotKind) -> &'static str {
    match slot {
        SlotKind::Roster => "roster",
        SlotKind::Policy => "policy",
    }
}

#[cfg(test)]
mod tests {
    use assistant_core::{SearchView, SuggestionView};

    use super::*;

    fn view_with(names: &[&str]) -> AppViewModel {
        AppViewModel {
            search: SearchView {
                query: String::new(),
                open: true,
                suggestions: names
                    .iter()
                    .map(|name| SuggestionView {
                        name: name.to_string(),
                        highlighted: false,
                    })
                    .collect(),
            },
            ..AppViewModel::default()
        }
    }

    #[test]
    fn find_focuses_then_types() {
        assert_eq!(
            parse("find  ali ", &AppViewModel::default()),
            Command::Dispatch(vec![
                Msg::SearchFocused,
                Msg::SearchChanged("ali".to_string())
            ])
        );
    }

    #[test]
    fn pick_is_press_blur_release() {
        let view = view_with(&["Alice Smith", "Bob Jones"]);
        assert_eq!(
            parse("pick 2", &view),
            Command::Dispatch(vec![
                Msg::SuggestionPressed("Bob Jones".to_string()),
                Msg::SearchBlurred,
                Msg::SuggestionReleased("Bob Jones".to_string()),
            ])
        );
    }

    #[test]
    fn pick_out_of_range_is_invalid() {
        let view = view_with(&["Alice Smith"]);
        assert!(matches!(parse("pick 0", &view), Command::Invalid(_)));
        assert!(matches!(parse("pick 2", &view), Command::Invalid(_)));
        assert!(matches!(parse("pick x", &view), Command::Invalid(_)));
    }

    #[test]
    fn ask_with_text_sets_question_first() {
        assert_eq!(
            parse("ask How many leave days remain?", &AppViewModel::default()),
            Command::Dispatch(vec![
                Msg::QuestionChanged("How many leave days remain?".to_string()),
                Msg::AskClicked,
            ])
        );
        assert_eq!(
            parse("ask", &AppViewModel::default()),
            Command::Dispatch(vec![Msg::AskClicked])
        );
    }

    #[test]
    fn file_commands_require_existing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("roster.csv");
        std::fs::write(&path, "name\nAlice Smith\n").expect("write");

        let line = format!("roster {}", path.display());
        match parse(&line, &AppViewModel::default()) {
            Command::Dispatch(msgs) => {
                assert_eq!(msgs.len(), 1);
                assert!(matches!(
                    &msgs[0],
                    Msg::FileChosen { slot: SlotKind::Roster, file }
                        if file.file_name() == "roster.csv"
                ));
            }
            other => panic!("unexpected {other:?}"),
        }

        let missing = format!("policy {}", dir.path().join("nope.pdf").display());
        assert!(matches!(
            parse(&missing, &AppViewModel::default()),
            Command::Invalid(_)
        ));
        assert!(matches!(
            parse("policy", &AppViewModel::default()),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn blank_line_reshows_and_unknown_is_invalid() {
        assert_eq!(parse("   ", &AppViewModel::default()), Command::Show);
        assert!(matches!(
            parse("frobnicate", &AppViewModel::default()),
            Command::Invalid(_)
        ));
    }
}
