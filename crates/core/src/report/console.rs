use super::DiffReport;

/// Human-readable listing: one line per source function plus a summary.
pub fn render_console(report: &DiffReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} -> {}\n", report.binary_one.name, report.binary_two.name));
    if report.matches.is_empty() {
        out.push_str("  (no functions)\n");
    }
    for (name, record) in &report.matches {
        if record.is_unmatched() {
            out.push_str(&format!("  {name} -> (no match)\n"));
        } else {
            out.push_str(&format!(
                "  {name} -> {} ({}%)\n",
                record.matched_function_name, record.confidence
            ));
        }
    }
    out.push_str(&format!(
        "Matched {}/{} functions, mean confidence {:.1}%\n",
        report.matched_count(),
        report.matches.len(),
        report.mean_confidence()
    ));
    out
}
