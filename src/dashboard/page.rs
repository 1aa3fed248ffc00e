use std::io::{self, Write};

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::github::types::PullRequestSummary;
use crate::triage::classify;

/// The only failure a render can produce: the sink refused our bytes.
///
/// A failure mid-render leaves a partial document in the sink. The core
/// makes no attempt to roll back bytes already written; the caller must
/// treat the destination as contaminated.
#[derive(Debug, Error)]
#[error("failed to write dashboard to sink: {0}")]
pub struct RenderError(#[from] io::Error);

/// Render the dashboard as one complete HTML document, one row per pull
/// request, written incrementally to `sink`.
///
/// A single `now` is captured up front so every row in the batch is judged
/// against the same instant, even when writing takes measurable time. Rows
/// come out in input order exactly; sorting is the caller's responsibility.
/// An empty input still produces a complete document, with zero rows.
pub fn render<W: Write>(sink: &mut W, prs: &[PullRequestSummary]) -> Result<(), RenderError> {
    render_at(sink, Utc::now(), prs)
}

/// Render against an explicit `now`. Split out so tests can pin the clock.
fn render_at<W: Write>(
    sink: &mut W,
    now: DateTime<Utc>,
    prs: &[PullRequestSummary],
) -> Result<(), RenderError> {
    write_head(sink)?;
    write_header(sink, now, prs.len())?;

    if prs.is_empty() {
        writeln!(sink, r#"    <p class="empty">No open pull requests.</p>"#)?;
    } else {
        write_table_open(sink)?;
        for pr in prs {
            write_row(sink, now, pr)?;
        }
        write_table_close(sink)?;
    }

    write_foot(sink)?;
    Ok(())
}

fn write_head<W: Write>(sink: &mut W) -> io::Result<()> {
    write!(
        sink,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Open pull requests</title>
    <style>{css}</style>
</head>
<body>
<div class="container">
"#,
        css = inline_css(),
    )
}

fn write_header<W: Write>(sink: &mut W, now: DateTime<Utc>, count: usize) -> io::Result<()> {
    write!(
        sink,
        r#"    <header>
        <h1>Open pull requests</h1>
        <div class="meta">{count} open as of {timestamp}</div>
    </header>
"#,
        count = count,
        timestamp = now.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn write_table_open<W: Write>(sink: &mut W) -> io::Result<()> {
    write!(
        sink,
        r#"    <table>
        <thead>
            <tr>
                <th>Pull request</th>
                <th>Title</th>
                <th>Author</th>
                <th>Open for</th>
                <th>Zone</th>
            </tr>
        </thead>
        <tbody>
"#
    )
}

fn write_row<W: Write>(sink: &mut W, now: DateTime<Utc>, pr: &PullRequestSummary) -> io::Result<()> {
    let zone = classify(now, pr.opened_at);

    write!(
        sink,
        r#"            <tr class="{zone_class}">
                <td class="monospace"><a href="{url}">{short_ref}</a></td>
                <td>{title}</td>
                <td>{author}</td>
                <td>{age}</td>
                <td><span class="badge {zone_class}">{zone_label}</span></td>
            </tr>
"#,
        zone_class = zone.css_class(),
        url = html_escape(&pr.url()),
        short_ref = html_escape(&pr.short_ref()),
        title = html_escape(&pr.title),
        author = html_escape(&pr.author),
        age = format_age(now - pr.opened_at),
        zone_label = zone.label(),
    )
}

fn write_table_close<W: Write>(sink: &mut W) -> io::Result<()> {
    write!(
        sink,
        r#"        </tbody>
    </table>
"#
    )
}

fn write_foot<W: Write>(sink: &mut W) -> io::Result<()> {
    write!(
        sink,
        r#"    <footer>
        <p>Generated by pr-dash</p>
    </footer>
</div>
</body>
</html>
"#
    )
}

/// Format how long a pull request has been open: "2h", "3d", "2w".
/// Sub-minute and negative ages (clock skew) display as "now".
fn format_age(age: Duration) -> String {
    if age < Duration::zero() {
        return "now".to_string();
    }

    let hours = age.num_hours();
    let days = age.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = age.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    line-height: 1.6;
    color: #111827;
    background: #ffffff;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 2rem;
}

header {
    margin-bottom: 1.5rem;
    padding-bottom: 1rem;
    border-bottom: 2px solid #e5e7eb;
}

header h1 {
    font-size: 1.75rem;
    font-weight: 700;
}

header .meta {
    color: #6b7280;
    font-size: 0.875rem;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th {
    padding: 0.75rem;
    text-align: left;
    font-weight: 600;
    font-size: 0.875rem;
    color: #374151;
    border-bottom: 2px solid #e5e7eb;
}

td {
    padding: 0.75rem;
    border-bottom: 1px solid #e5e7eb;
    font-size: 0.875rem;
}

tr:last-child td {
    border-bottom: none;
}

a {
    color: #2563eb;
    text-decoration: none;
}

a:hover {
    text-decoration: underline;
}

.monospace {
    font-family: 'Monaco', 'Courier New', monospace;
    font-size: 0.8125rem;
}

.badge {
    display: inline-block;
    padding: 0.125rem 0.5rem;
    border-radius: 0.75rem;
    font-size: 0.75rem;
    font-weight: 600;
    text-transform: uppercase;
}

.badge.zone-fresh {
    background: #dcfce7;
    color: #15803d;
}

.badge.zone-aging {
    background: #fef9c3;
    color: #a16207;
}

.badge.zone-stale {
    background: #fee2e2;
    color: #b91c1c;
}

tr.zone-aging td {
    background: #fefce8;
}

tr.zone-stale td {
    background: #fef2f2;
}

.empty {
    padding: 2rem 0;
    color: #6b7280;
}

footer {
    margin-top: 2rem;
    padding-top: 1rem;
    border-top: 1px solid #e5e7eb;
    color: #6b7280;
    font-size: 0.875rem;
}
"#
}
