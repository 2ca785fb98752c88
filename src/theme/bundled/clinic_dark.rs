//! Clinic Dark - the default theme
//! Calm slate with clear green/red status signals

pub const THEME: &str = r##"# Clinic Dark theme for health-decoded
# Calm slate background, findings read at a glance

[meta]
name = "Clinic Dark"
version = 1
author = "health-decoded"

[ui]
background = "#1d232a"
foreground = "#d8dee6"
border = "#3a4450"
border_focused = "#5aa9e6"
title = "#5aa9e6"
status_bar = "#9fb3c8"
selection_bg = "#2c3a4a"
selection_fg = "#f1f5f9"
muted = "#7b8794"
border_type = "rounded"

[findings]
normal = "#4fbf7f"
abnormal = "#e5676b"

[bill]
issue = "#e5676b"
savings = "#4fbf7f"
score = "#f2c14e"

[callouts]
reminder = "#a78bfa"
note = "#5aa9e6"
questions = "#d8dee6"
"##;
