//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: Top status bar showing backend, screen and status
//! - `LandingPage`: The Home screen
//! - `RecordForm`: Create/update form for one record
//! - `AlertDialog`: Modal error box
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose persistent state lives in `TuiState` and emits events:
//! - `Drawer`: Side menu selecting the screen
//! - `RecordList`: The records of the current screen
//!
//! Stateful components follow the persistent state + transient wrapper
//! pattern: `XState` is owned by `TuiState`, `X` is built each frame
//! borrowing it.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── drawer.rs        (Screen menu)
//! ├── record_list.rs   (Records of a screen)
//! ├── record_form.rs   (Create/update form)
//! ├── landing.rs       (Home screen)
//! └── alert.rs         (Error overlay)
//! ```

pub mod alert;
pub mod drawer;
pub mod landing;
pub mod record_form;
pub mod record_list;
mod title_bar;

pub use alert::AlertDialog;
pub use drawer::{Drawer, DrawerEvent, DrawerState};
pub use landing::LandingPage;
pub use record_form::RecordForm;
pub use record_list::{ListEvent, RecordList, RecordListState};
pub use title_bar::TitleBar;
