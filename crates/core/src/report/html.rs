use std::collections::HashMap;

use super::DiffReport;
use crate::model::{DecompiledFunction, MatchRecord};

const STYLE: &str = r#"body { font-family: Arial, sans-serif; }
.meta { color: #555; }
.function-header { cursor: pointer; }
.codeblock-container { display: flex; }
.codeblock { background-color: #f0f0f0; padding: 10px; border-radius: 5px; flex: 1; margin: 5px; overflow-x: auto; }
.content { display: none; }"#;

const SCRIPT: &str = r#"function toggleCodeBlock(id) {
    var content = document.getElementById(id);
    content.style.display = content.style.display === "block" ? "none" : "block";
}"#;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render a standalone HTML page with one collapsible entry per source function,
/// showing both canonical bodies side by side.
pub fn render_html(
    report: &DiffReport,
    functions_one: &[DecompiledFunction],
    functions_two: &[DecompiledFunction],
) -> String {
    // Binary one resolves names last-wins like the mapping.
    let bodies_one: HashMap<&str, &str> = functions_one
        .iter()
        .map(|f| (f.function_name.as_str(), f.canonical_body()))
        .collect();

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Function Comparison Report</title>\n");
    html.push_str(&format!("<style>\n{STYLE}\n</style>\n"));
    html.push_str(&format!("<script>\n{SCRIPT}\n</script>\n"));
    html.push_str("</head>\n<body>\n<h1>Function Comparison Report</h1>\n");

    html.push_str(&format!(
        "<p class=\"meta\">{} &rarr; {} &middot; backend {} &middot; generated {}</p>\n",
        escape_html(&report.binary_one.name),
        escape_html(&report.binary_two.name),
        escape_html(&report.backend),
        escape_html(&report.generated_at)
    ));
    html.push_str(&format!(
        "<p class=\"meta\">Matched {}/{} functions, mean confidence {:.1}%</p>\n",
        report.matched_count(),
        report.matches.len(),
        report.mean_confidence()
    ));

    html.push_str("<ul>\n");
    for (idx, (name, record)) in report.matches.iter().enumerate() {
        let id = format!("fn-{idx}");
        let matched = if record.is_unmatched() {
            "(no match)"
        } else {
            record.matched_function_name.as_str()
        };
        let source_body = bodies_one.get(name.as_str()).copied().unwrap_or_default();
        let matched_body = matched_body(record, functions_two);

        html.push_str("<li>\n");
        html.push_str(&format!(
            "<h2 class=\"function-header\" onclick=\"toggleCodeBlock('{id}')\">{} &rarr; {}</h2>\n",
            escape_html(name),
            escape_html(matched)
        ));
        html.push_str(&format!("<div id=\"{id}\" class=\"content\">\n"));
        html.push_str(&format!("<p>Name: {}</p>\n", escape_html(&record.matched_function_name)));
        html.push_str(&format!("<p>Confidence: {}%</p>\n", record.confidence));
        html.push_str("<div class=\"codeblock-container\">\n");
        html.push_str(&format!(
            "<div class=\"codeblock\"><h3>{}</h3><pre>{}</pre></div>\n",
            escape_html(&report.binary_one.name),
            escape_html(source_body)
        ));
        html.push_str(&format!(
            "<div class=\"codeblock\"><h3>{}</h3><pre>{}</pre></div>\n",
            escape_html(&report.binary_two.name),
            escape_html(matched_body)
        ));
        html.push_str("</div>\n</div>\n</li>\n");
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// Body of the binary-two function `record` was matched to.
///
/// The recorded candidate position wins; a record without one (e.g. read back from
/// JSON) falls back to the first function carrying the matched name.
fn matched_body<'a>(record: &MatchRecord, functions_two: &'a [DecompiledFunction]) -> &'a str {
    if record.is_unmatched() {
        return "";
    }
    record
        .matched_index
        .and_then(|index| functions_two.get(index))
        .filter(|f| f.function_name == record.matched_function_name)
        .or_else(|| functions_two.iter().find(|f| f.function_name == record.matched_function_name))
        .map(DecompiledFunction::canonical_body)
        .unwrap_or_default()
}
