//! Shell module - Interactive console and reports

mod menu;
mod report;
mod session;

pub use menu::{MenuChoice, MenuError, MENU_TEXT};
pub use report::{run_summary, write_summary};
pub use session::{Session, EXIT_NO_DATA, EXIT_OK};
