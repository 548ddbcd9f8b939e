use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use entryflow_core::Msg;

use super::app::AppEvent;

/// Reads command lines from stdin and feeds them to the dispatch loop.
/// A runtime `interval` command goes through the same message as the panel
/// input, so both paths behave identically.
pub(crate) fn spawn_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if event_tx.send(parse_line(&line)).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn parse_line(line: &str) -> AppEvent {
    let mut words = line.split_whitespace();
    match words.next() {
        None => AppEvent::Core(Msg::NoOp),
        Some("toggle") | Some("t") => AppEvent::Core(Msg::ToggleMonitoring),
        Some("check") | Some("c") => AppEvent::Core(Msg::CheckNow),
        Some("interval") | Some("i") => match words.next().and_then(|word| word.parse().ok()) {
            Some(secs) => AppEvent::Core(Msg::IntervalSubmitted(secs)),
            None => AppEvent::Invalid(line.to_string()),
        },
        Some("min") | Some("m") => AppEvent::Core(Msg::MinimizeToggled),
        Some("help") | Some("h") | Some("?") => AppEvent::Help,
        Some("quit") | Some("q") => AppEvent::Quit,
        Some(_) => AppEvent::Invalid(line.to_string()),
    }
}
