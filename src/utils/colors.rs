/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";

/// Running timepieces in green, stopped ones in grey.
pub fn color_for_state(running: bool) -> &'static str {
    if running { GREEN } else { GREY }
}

pub fn state_label(running: bool) -> String {
    let label = if running { "running" } else { "stopped" };
    if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return label.to_string();
    }
    format!("{}{}{}", color_for_state(running), label, RESET)
}
