//! Link management commands
//!
//! This module provides CLI commands for managing short links.

mod add;
mod copy;
mod helpers;
mod list;
mod qr;
mod remove;
mod show;
mod update;

pub use add::create_link;
pub use copy::copy_text;
pub use list::list_links;
pub use qr::create_qr;
pub use remove::delete_link;
pub use show::show_link;
pub use update::update_link;
