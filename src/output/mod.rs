//! Output formatting for both tools.
//!
//! This module handles formatting of results:
//! - [`checklist`] - Allocation summary and reconfiguration steps
//! - [`report`] - Expired domain report
//! - [`terminal`] - Numbered lists and warning banners

mod checklist;
mod report;
mod terminal;

pub use checklist::{docker_steps, pfsense_steps, render_checklist, render_summary};
pub use report::render_expired_report;
pub use terminal::{format_steps, large_warning};
