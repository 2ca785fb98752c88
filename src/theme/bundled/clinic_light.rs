//! Clinic Light - bright paper background for well-lit rooms

pub const THEME: &str = r##"# Clinic Light theme for health-decoded

[meta]
name = "Clinic Light"
version = 1
author = "health-decoded"

[ui]
background = "#f8fafc"
foreground = "#1e293b"
border = "#cbd5e1"
border_focused = "#2563eb"
title = "#2563eb"
status_bar = "#475569"
selection_bg = "#dbeafe"
selection_fg = "#0f172a"
muted = "#64748b"
border_type = "rounded"

[findings]
normal = "#15803d"
abnormal = "#b91c1c"

[bill]
issue = "#b91c1c"
savings = "#15803d"
score = "#b45309"

[callouts]
reminder = "#4f46e5"
note = "#1d4ed8"
questions = "#334155"
"##;
