//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keyboard input goes to exactly one region at a time:
//!
//! - **Drawer**: the screen menu on the left.
//! - **List**: the records of the current screen.
//! - **Form**: the create/update form, when visible.
//!
//! An open alert swallows the next key regardless of focus.
//!
//! ## Requests
//!
//! `update()` returns an `Effect`; fetches, saves and deletes run on tokio
//! tasks and report back over an mpsc channel as `Action`s, which are
//! applied at the top of the next loop iteration.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::execute;

use crate::backend::{Backend, RestBackend};
use crate::core::action::{Action, Effect, FormEdit, Operation, update};
use crate::core::config::ResolvedConfig;
use crate::core::form::FieldKind;
use crate::core::state::{App, Screen};
use crate::tui::component::EventHandler;
use crate::tui::components::{DrawerEvent, DrawerState, ListEvent, RecordListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which region receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Drawer,
    List,
    Form,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub drawer: DrawerState,
    pub record_list: RecordListState,
}

impl TuiState {
    pub fn new(active: Screen) -> Self {
        Self {
            focus: match active {
                Screen::Home => Focus::Drawer,
                Screen::Records(_) => Focus::List,
            },
            drawer: DrawerState::new(active),
            record_list: RecordListState::new(),
        }
    }

    /// Brings presentation state in line with the core state before input is handled.
    fn sync(&mut self, app: &App) {
        match app.current_resource() {
            Some(resource) => {
                let state = app.screen_state(resource);
                self.record_list
                    .sync(state.records.iter().map(|r| r.id()).collect());
                if self.focus == Focus::Form && !state.show_form {
                    self.focus = Focus::List;
                }
            }
            None => {
                self.record_list.sync(Vec::new());
                self.focus = Focus::Drawer;
            }
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            Show,                        // Cursor is shown while editing forms
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Hide);
    }
}

/// Build the REST backend from a resolved config.
pub fn build_backend(config: &ResolvedConfig) -> std::io::Result<Arc<dyn Backend>> {
    let backend = RestBackend::new(&config.base_url, config.timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    Ok(Arc::new(backend))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let backend = build_backend(&config)?;
    let mut app = App::new(backend);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_screen = config.start_screen.screen();
    let effect = update(&mut app, Action::Navigate(start_screen));
    spawn_effect(effect, &app, tx.clone());
    let mut tui = TuiState::new(start_screen);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app);

        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 8.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Short timeout while a request is in flight so the spinner moves
        let timeout = if animating {
            Duration::from_millis(120)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync(&app);
            match handle_event(&mut app, &mut tui, event) {
                Effect::Quit => break 'main,
                effect => spawn_effect(effect, &app, tx.clone()),
            }
        }

        // Handle background task actions (request results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                effect => spawn_effect(effect, &app, tx.clone()),
            }
        }
    }

    info!("Monitora shutting down");
    ratatui::restore();
    Ok(())
}

/// Routes one input event by focus and applies the resulting action.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    if matches!(event, TuiEvent::Resize) {
        return Effect::None;
    }

    // Ctrl+C always quits regardless of focus
    if matches!(event, TuiEvent::ForceQuit) {
        return update(app, Action::Quit);
    }

    if app.alert.is_some() {
        return update(app, Action::DismissAlert);
    }

    match tui.focus {
        Focus::Drawer => match tui.drawer.handle_event(&event) {
            Some(DrawerEvent::Open(screen)) => {
                if screen != app.screen {
                    tui.record_list.reset();
                }
                if let Screen::Records(_) = screen {
                    tui.focus = Focus::List;
                }
                update(app, Action::Navigate(screen))
            }
            Some(DrawerEvent::Quit) => update(app, Action::Quit),
            None => Effect::None,
        },

        Focus::List => match tui.record_list.handle_event(&event) {
            Some(ListEvent::Edit(id)) => {
                tui.focus = Focus::Form;
                update(app, Action::EditRecord(id))
            }
            Some(ListEvent::Delete(id)) => update(app, Action::DeleteRecord(id)),
            Some(ListEvent::ToggleForm) => {
                let effect = update(app, Action::ToggleForm);
                let shown = app
                    .current_resource()
                    .is_some_and(|r| app.screen_state(r).show_form);
                if shown {
                    tui.focus = Focus::Form;
                }
                effect
            }
            Some(ListEvent::Refresh) => update(app, Action::Refresh),
            Some(ListEvent::Back) => {
                tui.focus = Focus::Drawer;
                Effect::None
            }
            None => Effect::None,
        },

        Focus::Form => {
            let Some(resource) = app.current_resource() else {
                return Effect::None;
            };
            let kind = app.screen_state(resource).form.focused_spec().kind;
            let edit = match (event, kind) {
                (TuiEvent::Escape, _) => {
                    tui.focus = Focus::List;
                    return update(app, Action::ToggleForm);
                }
                (TuiEvent::Submit, _) => return update(app, Action::SubmitForm),
                (TuiEvent::NextField | TuiEvent::CursorDown, _) => FormEdit::NextField,
                (TuiEvent::PrevField | TuiEvent::CursorUp, _) => FormEdit::PrevField,
                (TuiEvent::CursorLeft, FieldKind::Choice(_)) => {
                    FormEdit::CycleChoice { forward: false }
                }
                (TuiEvent::CursorRight, FieldKind::Choice(_)) => {
                    FormEdit::CycleChoice { forward: true }
                }
                (TuiEvent::InputChar(c), _) => FormEdit::Input(c),
                (TuiEvent::Backspace, _) => FormEdit::Backspace,
                _ => return Effect::None,
            };
            update(app, Action::Form(edit))
        }
    }
}

/// Runs an effect's backend call on a tokio task, reporting back over `tx`.
fn spawn_effect(effect: Effect, app: &App, tx: mpsc::Sender<Action>) {
    let backend = app.backend.clone();
    match effect {
        Effect::None | Effect::Quit => {}
        Effect::Fetch(resource) => {
            info!("Spawning fetch: {}", resource);
            tokio::spawn(async move {
                let action = match backend.list(resource).await {
                    Ok(records) => Action::RecordsLoaded { resource, records },
                    Err(e) => Action::RequestFailed {
                        resource,
                        operation: Operation::Load,
                        message: e.to_string(),
                    },
                };
                send(&tx, action);
            });
        }
        Effect::Save { id, payload } => {
            let resource = payload.resource();
            info!("Spawning save: {} (id={:?})", resource, id);
            tokio::spawn(async move {
                let result = match id {
                    Some(id) => backend.update(id, &payload).await,
                    None => backend.create(&payload).await,
                };
                let action = match result {
                    Ok(()) => Action::Saved { resource },
                    Err(e) => Action::RequestFailed {
                        resource,
                        operation: Operation::Save,
                        message: e.to_string(),
                    },
                };
                send(&tx, action);
            });
        }
        Effect::Delete { resource, id } => {
            info!("Spawning delete: {} #{}", resource, id);
            tokio::spawn(async move {
                let action = match backend.delete(resource, id).await {
                    Ok(()) => Action::Deleted { resource, id },
                    Err(e) => Action::RequestFailed {
                        resource,
                        operation: Operation::Delete,
                        message: e.to_string(),
                    },
                };
                send(&tx, action);
            });
        }
    }
}

fn send(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to deliver request result: receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Location, LocationKind, Record, Resource};
    use crate::test_support::test_app;

    fn on_locations() -> (App, TuiState) {
        let mut app = test_app();
        let screen = Screen::Records(Resource::Location);
        update(&mut app, Action::Navigate(screen));
        update(
            &mut app,
            Action::RecordsLoaded {
                resource: Resource::Location,
                records: vec![Record::Location(Location {
                    id: 8,
                    address: "Rua A".to_string(),
                    kind: LocationKind::Casa,
                })],
            },
        );
        let mut tui = TuiState::new(screen);
        tui.sync(&app);
        (app, tui)
    }

    #[test]
    fn test_drawer_open_moves_focus_and_fetches() {
        let mut app = test_app();
        let mut tui = TuiState::new(Screen::Home);
        assert_eq!(tui.focus, Focus::Drawer);
        handle_event(&mut app, &mut tui, TuiEvent::CursorDown);
        let effect = handle_event(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(effect, Effect::Fetch(Resource::EquipmentClass));
        assert_eq!(tui.focus, Focus::List);
    }

    #[test]
    fn test_alert_swallows_next_key() {
        let (mut app, mut tui) = on_locations();
        update(
            &mut app,
            Action::RequestFailed {
                resource: Resource::Location,
                operation: Operation::Load,
                message: "boom".to_string(),
            },
        );
        let effect = handle_event(&mut app, &mut tui, TuiEvent::InputChar('d'));
        assert_eq!(effect, Effect::None);
        assert!(app.alert.is_none());
        assert!(!tui.record_list.confirm_delete);
    }

    #[test]
    fn test_edit_and_submit_through_keys() {
        let (mut app, mut tui) = on_locations();
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('e'));
        assert_eq!(tui.focus, Focus::Form);

        handle_event(&mut app, &mut tui, TuiEvent::InputChar('!'));
        handle_event(&mut app, &mut tui, TuiEvent::NextField);
        handle_event(&mut app, &mut tui, TuiEvent::CursorLeft);

        match handle_event(&mut app, &mut tui, TuiEvent::Submit) {
            Effect::Save { id, payload } => {
                assert_eq!(id, Some(8));
                assert_eq!(
                    serde_json::to_value(&payload).unwrap(),
                    serde_json::json!({"address": "Rua A!", "Location": "Outro"})
                );
            }
            other => panic!("expected save, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_closes_form_and_returns_to_list() {
        let (mut app, mut tui) = on_locations();
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('n'));
        assert_eq!(tui.focus, Focus::Form);
        handle_event(&mut app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::List);
        assert!(!app.screen_state(Resource::Location).show_form);
    }

    #[test]
    fn test_double_d_deletes_selected() {
        let (mut app, mut tui) = on_locations();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('d')),
            Effect::None
        );
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('d')),
            Effect::Delete {
                resource: Resource::Location,
                id: 8
            }
        );
    }

    #[test]
    fn test_force_quit_from_form() {
        let (mut app, mut tui) = on_locations();
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('n'));
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ForceQuit),
            Effect::Quit
        );
    }

    #[test]
    fn test_home_forces_drawer_focus() {
        let app = test_app();
        let mut tui = TuiState::new(Screen::Records(Resource::Client));
        tui.sync(&app);
        assert_eq!(tui.focus, Focus::Drawer);
    }
}
