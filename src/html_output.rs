//! HTML export format for profile reports
//!
//! Renders records as a self-contained HTML document with one styled table
//! per record. Source text is escaped so instrumented statements can never
//! produce malformed markup.

use crate::record::ProfileRecord;

/// Escape HTML special characters to prevent malformed markup
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Embedded CSS styles
fn styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .source {
            font-family: monospace;
            font-size: 0.9em;
            color: #555;
        }
        .duration {
            font-family: monospace;
            color: #666;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

/// Table for one line-level record
fn line_table(record: &ProfileRecord) -> String {
    let mut rows = String::new();
    for line in &record.lines {
        rows.push_str(&format!(
            "<tr><td>{}</td><td class=\"source\">{}</td><td class=\"duration\">{:.9}</td><td>{}</td></tr>\n",
            line.line_number,
            escape_html(&line.source_text),
            line.duration,
            line.hit_count
        ));
    }
    format!(
        "<table>\n<tr><th>Line</th><th>Source</th><th>Duration (s)</th><th>Hits</th></tr>\n{}</table>",
        rows
    )
}

/// Table for one whole-function record
fn function_table(record: &ProfileRecord) -> String {
    format!(
        "<table>\n<tr><th>Callable</th><th>Total Duration (s)</th></tr>\n<tr><td>{}</td><td class=\"duration\">{:.9}</td></tr>\n</table>",
        escape_html(&record.callable),
        record.total_duration
    )
}

/// Render records as a standalone HTML document
pub fn to_html(records: &[ProfileRecord]) -> String {
    let mut body = String::new();

    for record in records {
        body.push_str(&format!(
            "<h2>{} &mdash; {:.6}s</h2>\n",
            escape_html(&record.callable),
            record.total_duration
        ));
        if let Some(args) = &record.arguments {
            body.push_str(&format!("<p class=\"source\">{}</p>\n", escape_html(args)));
        }
        if record.is_line_profile() {
            body.push_str(&line_table(record));
        } else {
            body.push_str(&function_table(record));
        }
        body.push('\n');
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Profile Report</title>\n<style>{}</style>\n</head>\n<body>\n<h1>Profile Report</h1>\n{}<div class=\"footer\">Generated by funcprofiler</div>\n</body>\n</html>\n",
        styles(),
        body
    )
}
