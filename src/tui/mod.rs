//! Terminal dashboard for the bakery records.
//!
//! One tab per entity, each a `TableScreen` over the shared table engine.
//! Keys are translated in `input`, service calls happen in `app`.

mod app;
mod event;
mod form;
mod input;
mod render;
mod screen;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use form::{FieldKind, FormField, RecordForm};
pub use screen::{Screen, ScreenCommand, TableScreen};
pub use state::{AppState, Tab};
