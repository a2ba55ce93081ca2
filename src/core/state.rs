//! # Application State
//!
//! Core business state for Monitora. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn Backend>      // REST backend
//! ├── screen: Screen                 // what the drawer has selected
//! ├── screens: Vec<ScreenState>      // one per Resource, indexed by Resource::index()
//! ├── status_message: String         // status bar text
//! └── alert: Option<Alert>           // modal error, blocks input until dismissed
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::backend::{Backend, Record, Resource};
use crate::core::form::Form;

/// Entries of the drawer, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Records(Resource),
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Home,
        Screen::Records(Resource::EquipmentClass),
        Screen::Records(Resource::Equipment),
        Screen::Records(Resource::Monitoring),
        Screen::Records(Resource::Client),
        Screen::Records(Resource::Location),
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Records(resource) => resource.title(),
        }
    }

    pub fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Everything one resource screen owns. Records are whatever the last fetch returned.
#[derive(Debug, Clone)]
pub struct ScreenState {
    pub records: Vec<Record>,
    pub form: Form,
    pub show_form: bool,
    pub is_loading: bool,
    /// A create or update is in flight; further submits wait for it.
    pub is_saving: bool,
}

impl ScreenState {
    pub fn new(resource: Resource) -> Self {
        Self {
            records: Vec::new(),
            form: Form::new(resource),
            show_form: false,
            is_loading: false,
            is_saving: false,
        }
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub backend: Arc<dyn Backend>,
    pub screen: Screen,
    pub screens: Vec<ScreenState>,
    pub status_message: String,
    pub alert: Option<Alert>,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            screen: Screen::Home,
            screens: Resource::ALL.iter().map(|r| ScreenState::new(*r)).collect(),
            status_message: String::from("Welcome to Monitora!"),
            alert: None,
        }
    }

    pub fn current_resource(&self) -> Option<Resource> {
        match self.screen {
            Screen::Home => None,
            Screen::Records(resource) => Some(resource),
        }
    }

    pub fn screen_state(&self, resource: Resource) -> &ScreenState {
        &self.screens[resource.index()]
    }

    pub fn screen_state_mut(&mut self, resource: Resource) -> &mut ScreenState {
        &mut self.screens[resource.index()]
    }

    pub fn is_loading(&self) -> bool {
        self.current_resource()
            .is_some_and(|r| {
                let state = self.screen_state(r);
                state.is_loading || state.is_saving
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Monitora!");
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.screens.len(), Resource::ALL.len());
        assert!(app.alert.is_none());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_screen_states_are_indexed_by_resource() {
        let app = test_app();
        for resource in Resource::ALL {
            assert_eq!(app.screen_state(resource).form.resource, resource);
        }
    }

    #[test]
    fn test_find_record_by_id() {
        use crate::backend::{Location, LocationKind};
        let mut state = ScreenState::new(Resource::Location);
        state.records.push(Record::Location(Location {
            id: 4,
            address: "Rua B".to_string(),
            kind: LocationKind::Escola,
        }));
        assert_eq!(state.find(4).map(|r| r.title()), Some("Escola".to_string()));
        assert!(state.find(5).is_none());
    }

    #[test]
    fn test_drawer_order() {
        let titles: Vec<&str> = Screen::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(
            titles,
            vec!["Home", "Equipment Classes", "Equipment", "Monitoring", "Clients", "Locations"]
        );
        assert_eq!(Screen::Records(Resource::Client).position(), 4);
    }
}
