//! HTML rendering for the summarization form.

use std::fmt::Write;

use crate::models::model_options;
use crate::pipeline::{format_word_count, MAX_LENGTH_RANGE, MIN_LENGTH_RANGE};

use super::form::{FormState, Notice};
use super::theme::{theme_for, ERROR_TEXT, PROMPT_TEXT};

/// Page title.
const TITLE: &str = "Enhanced Text Summarization App";

/// Credit line below the footer rule.
const FOOTER: &str = "Developed by Rohit Chand";

/// Render the full page for `state`.
pub fn render_page(state: &FormState) -> String {
    let theme = theme_for(state.dark_mode);
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>body{{background-color:{bg}; color:{fg}; font-family:sans-serif; margin:2rem;}}
.layout{{display:flex; gap:2rem;}} .sidebar{{min-width:16rem;}} textarea{{width:100%;}}
.error{{color:{error};}} .prompt{{color:{prompt};}}</style>
</head>
<body>
<h1>{title}</h1>
<p>Summarize text using different models and customize the output!</p>
"#,
        title = TITLE,
        bg = theme.background,
        fg = theme.foreground,
        error = ERROR_TEXT,
        prompt = PROMPT_TEXT,
    );

    render_theme_toggle(&mut html, state.dark_mode);
    render_form(&mut html, state);
    render_notice(&mut html, state.notice.as_ref());
    render_summary(&mut html, state.summary());

    let _ = write!(html, "<hr>\n<footer>{}</footer>\n</body>\n</html>\n", FOOTER);
    html
}

fn render_theme_toggle(html: &mut String, dark_mode: bool) {
    let label = if dark_mode { "Light Mode" } else { "Dark Mode" };
    let _ = writeln!(
        html,
        r#"<form method="post" action="/theme"><button type="submit">{}</button></form>"#,
        label
    );
}

fn render_form(html: &mut String, state: &FormState) {
    html.push_str(
        r#"<form method="post" action="/summarize" enctype="multipart/form-data" class="layout">
<div class="sidebar">
<label for="model">Select Summarization Model</label><br>
<select id="model" name="model">
"#,
    );

    for option in model_options() {
        let selected = if option == state.model { " selected" } else { "" };
        let _ = writeln!(
            html,
            r#"<option value="{label}"{selected}>{label}</option>"#,
            label = escape_html(option.label),
            selected = selected
        );
    }

    let _ = write!(
        html,
        r#"</select><br>
<label for="max_length">Maximum summary length: <output>{max}</output></label><br>
<input type="range" id="max_length" name="max_length" min="{max_lo}" max="{max_hi}" value="{max}" oninput="this.previousElementSibling.previousElementSibling.firstElementChild.value=this.value"><br>
<label for="min_length">Minimum summary length: <output>{min}</output></label><br>
<input type="range" id="min_length" name="min_length" min="{min_lo}" max="{min_hi}" value="{min}" oninput="this.previousElementSibling.previousElementSibling.firstElementChild.value=this.value"><br>
</div>
<div>
<label for="text">Enter text to summarize:</label><br>
<textarea id="text" name="text" rows="12">{input}</textarea><br>
<label for="file">Or upload a .txt file:</label>
<input type="file" id="file" name="file" accept=".txt,text/plain"><br>
"#,
        max = state.bounds.max_length,
        max_lo = MAX_LENGTH_RANGE.start(),
        max_hi = MAX_LENGTH_RANGE.end(),
        min = state.bounds.min_length,
        min_lo = MIN_LENGTH_RANGE.start(),
        min_hi = MIN_LENGTH_RANGE.end(),
        input = escape_html(&state.input),
    );

    if !state.input.is_empty() {
        let _ = writeln!(
            html,
            r#"<p class="count"><strong>Word Count (Input):</strong> {}</p>"#,
            format_word_count(&state.input)
        );
    }

    html.push_str("<button type=\"submit\">Summarize</button>\n</div>\n</form>\n");
}

fn render_notice(html: &mut String, notice: Option<&Notice>) {
    match notice {
        None => {}
        Some(Notice::Prompt(message)) => {
            let _ = writeln!(html, r#"<p class="prompt">{}</p>"#, escape_html(message));
        }
        Some(Notice::Error { kind, message }) => {
            let _ = writeln!(
                html,
                r#"<p class="error" data-kind="{}"><strong>Error:</strong> {}</p>"#,
                kind,
                escape_html(message)
            );
        }
    }
}

fn render_summary(html: &mut String, summary: Option<&str>) {
    let Some(summary) = summary else {
        return;
    };

    let _ = write!(
        html,
        r#"<h2>Summary:</h2>
<p class="summary">{}</p>
<p class="count"><strong>Word Count (Summary):</strong> {}</p>
<a href="/download" download="summary.txt">Click to download summary</a>
"#,
        escape_html(summary),
        format_word_count(summary)
    );
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
