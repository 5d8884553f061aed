/// Page colors for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub const DARK: Theme = Theme {
    background: "#2E2E2E",
    foreground: "white",
};

pub const LIGHT: Theme = Theme {
    background: "white",
    foreground: "black",
};

pub const ERROR_TEXT: &str = "#ef4444";
pub const PROMPT_TEXT: &str = "#6b7280";

pub fn theme_for(dark_mode: bool) -> Theme {
    if dark_mode {
        DARK
    } else {
        LIGHT
    }
}
