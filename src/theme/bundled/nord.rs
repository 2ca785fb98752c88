//! Nord - Arctic, bluish color palette

pub const THEME: &str = r##"# Nord theme for health-decoded
# Arctic, bluish color palette

[meta]
name = "Nord"
version = 1
author = "health-decoded"

[ui]
background = "#2e3440"
foreground = "#d8dee9"
border = "#4c566a"
border_focused = "#88c0d0"
title = "#88c0d0"
status_bar = "#81a1c1"
selection_bg = "#434c5e"
selection_fg = "#eceff4"
muted = "#7b88a1"

[findings]
normal = "#a3be8c"
abnormal = "#bf616a"

[bill]
issue = "#bf616a"
savings = "#a3be8c"
score = "#ebcb8b"

[callouts]
reminder = "#b48ead"
note = "#81a1c1"
questions = "#e5e9f0"
"##;
