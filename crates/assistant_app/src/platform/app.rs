use std::io::BufRead;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use assistant_core::{update, AppState, AppViewModel, Effect, Msg};
use assistant_engine::ReqwestBackend;
use engine_logging::{engine_info, engine_warn};

use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;
use super::Args;

/// Everything the dispatcher loop reacts to.
pub enum AppInput {
    Msg(Msg),
    Line(String),
    Closed,
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    engine_logging::initialize(args.log_destination(), args.log_level());

    let settings = args.backend_settings()?;
    engine_info!("starting assistant client against {}", settings.base_url);
    let backend = ReqwestBackend::new(settings).context("building http client")?;

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let effects =
        EffectRunner::new(Arc::new(backend), input_tx.clone()).context("starting engine")?;
    spawn_stdin_reader(input_tx.clone());

    let mut app = App::new(effects);
    println!("{HELP}");
    app.show();
    input_tx
        .send(AppInput::Msg(Msg::Started))
        .context("queueing startup")?;

    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Msg(msg) => app.dispatch(vec![msg]),
            AppInput::Line(line) => match commands::parse(&line, &app.view()) {
                Command::Dispatch(msgs) => app.dispatch(msgs),
                Command::Show => app.show(),
                Command::Help => println!("{HELP}"),
                Command::Quit => break,
                Command::Invalid(reason) => println!("{reason}"),
            },
            AppInput::Closed => break,
        }
    }

    engine_info!("assistant client exiting");
    Ok(())
}

struct App {
    state: AppState,
    effects: EffectRunner,
}

impl App {
    fn new(effects: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Renders once per batch, after every message has been applied.
    fn dispatch(&mut self, msgs: Vec<Msg>) {
        let state = std::mem::take(&mut self.state);
        let (state, effects, was_dirty) = apply_batch(state, msgs);
        self.state = state;
        self.effects.enqueue(effects);
        if was_dirty {
            self.show();
        }
    }

    fn show(&self) {
        for line in render::render(&self.state.view()) {
            println!("{line}");
        }
    }
}

fn apply_batch(mut state: AppState, msgs: Vec<Msg>) -> (AppState, Vec<Effect>, bool) {
    let mut effects = Vec::new();
    let mut was_dirty = false;
    for msg in msgs {
        let (mut next, step_effects) = update(state, msg);
        was_dirty |= next.consume_dirty();
        effects.extend(step_effects);
        state = next;
    }
    (state, effects, was_dirty)
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("stdin read failed: {err}");
                    break;
                }
            };
            if input_tx.send(AppInput::Line(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(AppInput::Closed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_directory(names: &[&str]) -> AppState {
        let names = names.iter().map(|name| name.to_string()).collect();
        let (mut state, _) = update(AppState::new(), Msg::DirectoryLoaded(names));
        state.consume_dirty();
        state
    }

    #[test]
    fn batch_reports_dirty_once_and_keeps_final_state() {
        let find = vec![Msg::SearchFocused, Msg::SearchChanged("bo".to_string())];
        let (state, _, _) = apply_batch(with_directory(&["Alice Smith", "Bob Jones"]), find);
        let pick = vec![
            Msg::SuggestionPressed("Bob Jones".to_string()),
            Msg::SearchBlurred,
            Msg::SuggestionReleased("Bob Jones".to_string()),
        ];

        let (mut state, effects, was_dirty) = apply_batch(state, pick);

        assert!(was_dirty);
        assert!(effects.is_empty());
        assert!(!state.consume_dirty());
        assert_eq!(state.view().selected_employee.as_deref(), Some("Bob Jones"));
    }

    #[test]
    fn batch_collects_effects_in_order() {
        let (_, effects, was_dirty) =
            apply_batch(AppState::new(), vec![Msg::Started, Msg::SearchBlurred, Msg::Started]);

        assert!(was_dirty);
        assert_eq!(effects, vec![Effect::FetchEmployees, Effect::FetchEmployees]);
    }

    #[test]
    fn empty_batch_leaves_nothing_to_render() {
        let (_, effects, was_dirty) = apply_batch(with_directory(&["Alice Smith"]), Vec::new());

        assert!(!was_dirty);
        assert!(effects.is_empty());
    }
}
