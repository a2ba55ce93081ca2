//! Monitora library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

use crate::backend::Resource;
use crate::core::state::Screen;

/// Screen shown when the app starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartScreen {
    #[default]
    Home,
    EquipmentClasses,
    Equipment,
    Monitoring,
    Clients,
    Locations,
}

impl StartScreen {
    pub fn screen(self) -> Screen {
        match self {
            StartScreen::Home => Screen::Home,
            StartScreen::EquipmentClasses => Screen::Records(Resource::EquipmentClass),
            StartScreen::Equipment => Screen::Records(Resource::Equipment),
            StartScreen::Monitoring => Screen::Records(Resource::Monitoring),
            StartScreen::Clients => Screen::Records(Resource::Client),
            StartScreen::Locations => Screen::Records(Resource::Location),
        }
    }
}
