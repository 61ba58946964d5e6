//! Error rendering using ariadne
//!
//! Compile errors are shown against the formula text with the offending
//! token underlined.

use crate::{Diagnostic, Error};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use core::ops::Range;
use std::io::Write;

const SOURCE_ID: &str = "<formula>";

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use keycalc::{interpret, render_error};
///
/// if let Err(e) = interpret("2+*3") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs and UIs)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Compilation(err) => {
            render_diagnostic(&err.src, &err.to_diagnostic(), err.offset, writer, use_color)
        }
        Error::Api(msg) => {
            writeln!(writer, "API error: {}", msg)
        }
    }
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    offset: usize,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let span = label_span(diag.span.0.clone(), source.len());
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(format!("{} (offset {})", diag.message, offset))
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((SOURCE_ID, span))
            .with_message(&diag.message)
            .with_color(colors.next()),
    );

    for help_msg in &diag.help {
        report = report.with_help(help_msg);
    }

    report.finish().write((SOURCE_ID, Source::from(source)), &mut *writer)
}

/// Errors at end of input have an empty span; point at the last character
/// instead so the label has something to underline.
fn label_span(span: Range<usize>, len: usize) -> Range<usize> {
    if span.is_empty() && len > 0 {
        let end = span.end.min(len);
        end.saturating_sub(1)..end.max(1)
    } else {
        span
    }
}
