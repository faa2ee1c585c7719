//! Static site rendering
//!
//! Turns chart records into the repository's front page: a grid of chart
//! cards, each with an install dialog, plus distinct loading, empty and
//! error states. All record fields are escaped before they reach markup.

mod clipboard;
mod html;
mod install;
mod loader;
mod page;
mod presenter;

pub use clipboard::{ClipboardError, ClipboardService, MemoryClipboard, SystemClipboard};
pub use html::{escape_html, escape_js_string};
pub use install::{install_command, repo_add_command, InstallCommand};
pub use loader::load_charts;
pub use page::render_page;
pub use presenter::{GridState, HtmlPresenter, Presenter, EMPTY_MESSAGE, ERROR_MESSAGE};
