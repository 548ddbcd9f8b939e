//! Line-oriented rendering of the control panel and merged entries.

use std::io::{self, Write};

use chrono::Local;
use entryflow_core::{EntryId, NewEntry, PanelViewModel, SessionState, StatusKind};
use entryflow_engine::Converter;

/// Clears the in-place status line before printing full lines.
const CLEAR_LINE: &str = "\r\x1b[2K";

pub(crate) fn print_banner(address: &str) {
    println!("entryflow — live thread monitor");
    println!("watching {address}");
    print_help();
}

pub(crate) fn print_help() {
    println!(
        "commands: toggle (t) | check (c) | interval <10-300> (i) | min (m) | help (?) | quit (q)"
    );
}

pub(crate) fn print_invalid(line: &str) {
    println!("{CLEAR_LINE}unrecognized command: {}", line.trim());
}

pub(crate) fn print_notification(text: &str) {
    println!("{CLEAR_LINE}» {text}");
}

pub(crate) fn render_entries(entries: &[NewEntry], converter: &dyn Converter) {
    let stamp = Local::now().format("%H:%M:%S");
    for entry in entries {
        let body = converter.to_markdown(&entry.html);
        println!("{CLEAR_LINE}--- entry {} · {stamp} ---", entry.id);
        println!("{}", body.trim());
    }
}

pub(crate) fn render_highlight(id: EntryId) {
    println!("{CLEAR_LINE}▶ newest entry: {id}");
}

/// Redraws the panel as a single in-place status line.
pub(crate) fn render_panel(view: &PanelViewModel) {
    let mode = match view.session {
        SessionState::Active => "▶ monitoring",
        SessionState::Paused => "⏸ paused",
    };

    if view.minimized {
        print!("{CLEAR_LINE}[{mode} | {} entries]", view.entry_count);
        let _ = io::stdout().flush();
        return;
    }

    let mut line = format!(
        "[{mode} | every {}s | {} entries | {} pages",
        view.interval_secs, view.entry_count, view.total_pages
    );
    if let Some(secs) = view.countdown_secs.filter(|secs| *secs > 0) {
        line.push_str(&format!(" | next check in {secs}s"));
    }
    if let Some(status) = &view.status {
        let marker = match status.kind {
            StatusKind::Checking => "…",
            StatusKind::Success => "✓",
            StatusKind::Error => "✗",
        };
        line.push_str(&format!(" | {marker} {}", status.text));
    }
    line.push(']');

    print!("{CLEAR_LINE}{line}");
    let _ = io::stdout().flush();
}
