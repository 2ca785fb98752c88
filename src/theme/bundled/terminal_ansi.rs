//! Terminal ANSI - Uses your terminal's native ANSI colors

pub const THEME: &str = r##"# Terminal ANSI theme for health-decoded
# Uses your terminal's native ANSI colors, so it follows your terminal theme.
#
# This theme uses "ansi:X" syntax instead of hex colors:
# - ansi:0-7 = standard colors (black, red, green, yellow, blue, magenta, cyan, white)
# - ansi:8-15 = bright variants
# - ansi:fg = terminal's default foreground
# - ansi:bg = terminal's default background (transparent)

[meta]
name = "Terminal ANSI"
version = 1
author = "health-decoded"

[ui]
background = "ansi:bg"
foreground = "ansi:fg"
border = "ansi:fg"
border_focused = "ansi:6"
title = "ansi:6"
status_bar = "ansi:fg"
selection_bg = "ansi:8"
selection_fg = "ansi:fg"
muted = "ansi:8"

[findings]
normal = "ansi:2"
abnormal = "ansi:1"

[bill]
issue = "ansi:1"
savings = "ansi:2"
score = "ansi:3"

[callouts]
reminder = "ansi:5"
note = "ansi:4"
questions = "ansi:fg"
"##;
