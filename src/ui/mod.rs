pub mod app;
pub mod charts;
pub mod dialogs;
pub mod input;
pub mod widgets;

pub use app::App;
pub use input::{DialogType, InputMode, InputState};
