use std::any::Any;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::path::Path;

use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use log::error;

/// Installs a hook that hands the terminal back before reporting a panic.
///
/// The panic and its location go to the log; stderr gets the `better_panic`
/// backtrace and a pointer to `log_file`.
pub fn initialize_panic_handler(log_file: &Path) {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .install();

    let log_file = log_file.to_path_buf();
    let report = panic::take_hook();
    panic::set_hook(Box::new(move |info: &PanicHookInfo<'_>| {
        restore_terminal();
        error!(
            "Panic at {}: {}",
            panic_location(info),
            payload_message(info.payload())
        );

        report(info);
        let _ = writeln!(
            io::stderr(),
            "pagenotes crashed; notes from this session were not saved. Details in {}",
            log_file.display()
        );

        std::process::exit(1);
    }));
}

fn panic_location(info: &PanicHookInfo<'_>) -> String {
    info.location()
        .map(|location| format!("{}:{}", location.file(), location.line()))
        .unwrap_or_else(|| "unknown location".to_string())
}

fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Leaves raw mode, the alternate screen and mouse capture, and shows the
/// cursor again.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show);
    let _ = writeln!(io::stderr());
}
