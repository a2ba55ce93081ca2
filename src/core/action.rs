//! # Actions
//!
//! Everything that can happen in Monitora becomes an `Action`.
//! User opens the Clients screen? That's `Action::Navigate(..)`.
//! Server answers the list request? That's `Action::RecordsLoaded { .. }`.
//!
//! The `update()` function mutates state for an action and returns the
//! `Effect` the adapter must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::backend::{Payload, Record, Resource};
use crate::core::state::{Alert, App, Screen};

/// Which backend call a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

/// Edits applied to the visible form of the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEdit {
    Input(char),
    Backspace,
    NextField,
    PrevField,
    CycleChoice { forward: bool },
}

#[derive(Debug)]
pub enum Action {
    Quit,
    Navigate(Screen),
    Refresh,
    RecordsLoaded {
        resource: Resource,
        records: Vec<Record>,
    },
    ToggleForm,
    EditRecord(i64),
    Form(FormEdit),
    SubmitForm,
    Saved {
        resource: Resource,
    },
    DeleteRecord(i64),
    Deleted {
        resource: Resource,
        id: i64,
    },
    RequestFailed {
        resource: Resource,
        operation: Operation,
        message: String,
    },
    DismissAlert,
}

/// Side effects the adapter performs after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Resource),
    /// `id` present → update that record, absent → create.
    Save { id: Option<i64>, payload: Payload },
    Delete { resource: Resource, id: i64 },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,

        Action::Navigate(screen) => {
            app.screen = screen;
            match screen {
                Screen::Home => {
                    app.status_message = String::from("Welcome to Monitora!");
                    Effect::None
                }
                Screen::Records(resource) => fetch(app, resource),
            }
        }

        Action::Refresh => match app.current_resource() {
            Some(resource) => fetch(app, resource),
            None => Effect::None,
        },

        Action::RecordsLoaded { resource, records } => {
            info!("Loaded {} {}", records.len(), resource.plural());
            let count = records.len();
            let state = app.screen_state_mut(resource);
            state.records = records;
            state.is_loading = false;
            if app.current_resource() == Some(resource) {
                app.status_message = format!("{} {}", count, resource.plural());
            }
            Effect::None
        }

        Action::ToggleForm => {
            let Some(resource) = app.current_resource() else {
                return Effect::None;
            };
            let state = app.screen_state_mut(resource);
            if state.show_form {
                state.form.reset();
                state.show_form = false;
            } else {
                state.show_form = true;
            }
            Effect::None
        }

        Action::EditRecord(id) => {
            let Some(resource) = app.current_resource() else {
                return Effect::None;
            };
            let state = app.screen_state_mut(resource);
            match state.find(id).cloned() {
                Some(record) => {
                    state.form.load(&record);
                    state.show_form = true;
                    app.status_message = format!("Editing {} #{}", resource.singular(), id);
                }
                None => {
                    app.status_message = format!("{} #{} no longer exists", resource.singular(), id);
                }
            }
            Effect::None
        }

        Action::Form(edit) => {
            let Some(resource) = app.current_resource() else {
                return Effect::None;
            };
            let state = app.screen_state_mut(resource);
            if !state.show_form {
                return Effect::None;
            }
            let form = &mut state.form;
            match edit {
                FormEdit::Input(c) => form.insert_char(c),
                FormEdit::Backspace => form.backspace(),
                FormEdit::NextField => form.focus_next(),
                FormEdit::PrevField => form.focus_prev(),
                FormEdit::CycleChoice { forward } => form.cycle_choice(forward),
            }
            Effect::None
        }

        Action::SubmitForm => {
            let Some(resource) = app.current_resource() else {
                return Effect::None;
            };
            let state = app.screen_state_mut(resource);
            if !state.show_form {
                return Effect::None;
            }
            if state.is_saving {
                app.status_message =
                    format!("Still saving the {}, try again shortly", resource.singular());
                return Effect::None;
            }
            match state.form.to_payload() {
                Ok(payload) => {
                    let id = state.form.editing_id;
                    state.is_saving = true;
                    app.status_message = format!("Saving {}...", resource.singular());
                    Effect::Save { id, payload }
                }
                Err(e) => {
                    app.status_message = format!("Cannot save {}: {}", resource.singular(), e);
                    Effect::None
                }
            }
        }

        Action::Saved { resource } => {
            let state = app.screen_state_mut(resource);
            state.is_saving = false;
            state.form.reset();
            state.show_form = false;
            app.status_message = format!("Saved {}", resource.singular());
            fetch(app, resource)
        }

        Action::DeleteRecord(id) => match app.current_resource() {
            Some(resource) => {
                app.status_message = format!("Deleting {} #{}...", resource.singular(), id);
                Effect::Delete { resource, id }
            }
            None => Effect::None,
        },

        Action::Deleted { resource, id } => {
            let state = app.screen_state_mut(resource);
            state.records.retain(|r| r.id() != id);
            // A deleted record can't stay in the update form
            if state.form.editing_id == Some(id) {
                state.form.reset();
                state.show_form = false;
            }
            app.status_message = format!("Deleted {} #{}", resource.singular(), id);
            fetch(app, resource)
        }

        Action::RequestFailed {
            resource,
            operation,
            message,
        } => {
            warn!("{:?} {} failed: {}", operation, resource, message);
            let state = app.screen_state_mut(resource);
            match operation {
                Operation::Load => state.is_loading = false,
                Operation::Save => state.is_saving = false,
                Operation::Delete => {}
            }
            let summary = match operation {
                Operation::Load => format!("Could not load the {}.", resource.plural()),
                Operation::Save => format!("Could not save the {}.", resource.singular()),
                Operation::Delete => format!("Could not delete the {}.", resource.singular()),
            };
            app.status_message = summary.clone();
            app.alert = Some(Alert {
                title: String::from("Error"),
                message: format!("{}\n\n{}", summary, message),
            });
            Effect::None
        }

        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }
    }
}

fn fetch(app: &mut App, resource: Resource) -> Effect {
    app.screen_state_mut(resource).is_loading = true;
    Effect::Fetch(resource)
}
