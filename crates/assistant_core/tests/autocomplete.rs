use std::sync::Once;

use assistant_core::{update, AppState, DropdownState, Msg, SUGGESTION_LIMIT};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn with_directory(list: &[&str]) -> AppState {
    let names = list.iter().map(|name| name.to_string()).collect();
    let (state, _) = update(AppState::new(), Msg::DirectoryLoaded(names));
    state
}

fn roster_of(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Employee {i:02}")).collect()
}

fn visible(state: &AppState) -> Vec<String> {
    state
        .view()
        .search
        .suggestions
        .into_iter()
        .map(|s| s.name)
        .collect()
}

fn type_query(state: AppState, query: &str) -> AppState {
    let (state, _) = update(state, Msg::SearchFocused);
    let (state, _) = update(state, Msg::SearchChanged(query.to_string()));
    state
}

#[test]
fn filter_is_case_insensitive_substring() {
    init_logging();
    let state = with_directory(&["Alice Smith", "Bob Smithers", "Carol King", "smitty"]);
    let state = type_query(state, "SMIT");

    assert_eq!(visible(&state), vec!["Alice Smith", "Bob Smithers", "smitty"]);
}

#[test]
fn matches_are_capped_in_alphabetical_order() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DirectoryLoaded(roster_of(25)));
    let state = type_query(state, "employee");

    let expected: Vec<String> = roster_of(SUGGESTION_LIMIT);
    assert_eq!(visible(&state), expected);
}

#[test]
fn empty_query_lists_first_entries() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DirectoryLoaded(roster_of(12)));
    let (state, _) = update(state, Msg::SearchFocused);
    assert_eq!(visible(&state).len(), SUGGESTION_LIMIT);

    let small = with_directory(&["Zed", "amy"]);
    let (small, _) = update(small, Msg::SearchFocused);
    assert_eq!(visible(&small), vec!["amy", "Zed"]);
}

#[test]
fn no_matches_renders_nothing_while_open() {
    init_logging();
    let state = with_directory(&["Alice Smith"]);
    let state = type_query(state, "zzz");

    let view = state.view();
    assert!(view.search.open);
    assert!(view.search.suggestions.is_empty());
}

#[test]
fn closed_dropdown_shows_no_suggestions() {
    init_logging();
    let state = with_directory(&["Alice Smith"]);
    assert_eq!(state.selector().dropdown(), DropdownState::Closed);
    assert!(visible(&state).is_empty());
    assert_eq!(state.selector().suggestions(state.directory()), vec!["Alice Smith"]);
}

#[test]
fn blur_without_press_closes() {
    init_logging();
    let state = type_query(with_directory(&["Alice Smith"]), "ali");
    let (state, _) = update(state, Msg::SearchBlurred);

    assert_eq!(state.selector().dropdown(), DropdownState::Closed);
    assert_eq!(state.view().selected_employee, None);
}

#[test]
fn press_then_blur_then_release_commits_selection() {
    init_logging();
    let state = type_query(with_directory(&["Alice Smith", "Bob Jones"]), "bo");
    let (state, _) = update(state, Msg::SuggestionPressed("Bob Jones".into()));
    let (state, _) = update(state, Msg::SearchBlurred);

    assert_eq!(state.selector().dropdown(), DropdownState::Open);
    assert!(state.selector().selection_in_progress());

    let (state, _) = update(state, Msg::SuggestionReleased("Bob Jones".into()));
    let view = state.view();
    assert_eq!(view.selected_employee.as_deref(), Some("Bob Jones"));
    assert_eq!(view.search.query, "Bob Jones");
    assert!(!view.search.open);
}

#[test]
fn release_elsewhere_abandons_press() {
    init_logging();
    let state = type_query(with_directory(&["Alice Smith", "Bob Jones"]), "");
    let (state, _) = update(state, Msg::SuggestionPressed("Bob Jones".into()));
    let (state, _) = update(state, Msg::SearchBlurred);
    let (state, _) = update(state, Msg::SuggestionReleased("Alice Smith".into()));

    assert_eq!(state.view().selected_employee, None);
    assert_eq!(state.selector().dropdown(), DropdownState::Closed);
}

#[test]
fn selecting_twice_is_idempotent() {
    init_logging();
    let state = type_query(with_directory(&["Alice Smith"]), "ali");
    let (state, _) = update(state, Msg::SuggestionPressed("Alice Smith".into()));
    let (state, _) = update(state, Msg::SuggestionReleased("Alice Smith".into()));
    let first = state.view();

    let (state, _) = update(state, Msg::SuggestionPressed("Alice Smith".into()));
    let (state, _) = update(state, Msg::SuggestionReleased("Alice Smith".into()));
    let second = state.view();

    assert_eq!(first.selected_employee, second.selected_employee);
    assert!(!second.search.open);
}

#[test]
fn keyboard_navigation_wraps_and_enter_selects() {
    init_logging();
    let state = type_query(with_directory(&["Ann", "Bea", "Cat"]), "");
    let (state, _) = update(state, Msg::HighlightPrev);
    assert_eq!(state.selector().highlighted(), Some(2));

    let (state, _) = update(state, Msg::HighlightNext);
    assert_eq!(state.selector().highlighted(), Some(0));
    let (state, _) = update(state, Msg::HighlightNext);

    let highlighted: Vec<bool> = state
        .view()
        .search
        .suggestions
        .iter()
        .map(|s| s.highlighted)
        .collect();
    assert_eq!(highlighted, vec![false, true, false]);

    let (state, _) = update(state, Msg::HighlightConfirmed);
    assert_eq!(state.view().selected_employee.as_deref(), Some("Bea"));
    assert!(!state.view().search.open);
}

#[test]
fn enter_without_highlight_does_nothing() {
    init_logging();
    let state = type_query(with_directory(&["Ann"]), "an");
    let (state, _) = update(state, Msg::HighlightConfirmed);

    assert_eq!(state.view().selected_employee, None);
    assert!(state.view().search.open);
}

#[test]
fn typing_resets_highlight_and_escape_closes() {
    init_logging();
    let state = type_query(with_directory(&["Ann", "Anna"]), "an");
    let (state, _) = update(state, Msg::HighlightNext);
    let (state, _) = update(state, Msg::SearchChanged("ann".into()));
    assert_eq!(state.selector().highlighted(), None);

    let (state, _) = update(state, Msg::SearchEscaped);
    assert_eq!(state.selector().dropdown(), DropdownState::Closed);
    assert_eq!(state.view().selected_employee, None);
}

#[test]
fn unknown_names_cannot_be_selected() {
    init_logging();
    let state = type_query(with_directory(&["Ann"]), "");
    let (state, _) = update(state, Msg::SuggestionPressed("Mallory".into()));
    let (state, _) = update(state, Msg::SuggestionReleased("Mallory".into()));

    assert_eq!(state.view().selected_employee, None);
}

#[test]
fn explicit_clear_drops_selection() {
    init_logging();
    let state = type_query(with_directory(&["Ann"]), "");
    let (state, _) = update(state, Msg::SuggestionPressed("Ann".into()));
    let (state, _) = update(state, Msg::SuggestionReleased("Ann".into()));
    let (state, _) = update(state, Msg::SelectionCleared);

    let view = state.view();
    assert_eq!(view.selected_employee, None);
    assert_eq!(view.search.query, "");
}
