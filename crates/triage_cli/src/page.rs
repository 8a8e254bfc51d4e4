//! `triage page` — assemble one budgeted page of diagnostics.
//!
//! 1. Load `triage.toml` (explicit `--config`, else `./triage.toml`, else defaults)
//! 2. Validate the filter and cursor
//! 3. Open the JSON-lines diagnostics file and optional build-progress file
//! 4. Run the paging pipeline
//! 5. Print the page as JSON or text

use std::path::Path;
use std::time::{Duration, Instant};

use triage_config::{TriageConfig, CONFIG_FILE_NAME};
use triage_diagnostics::{BuildProgress, JsonLinesSource, TerminalRenderer};
use triage_pipeline::{Deadline, PageOptions, PageRequest, Pipeline, Response};

use crate::{GlobalArgs, PageArgs, ReportFormat};

/// Exit code for a request the pipeline rejected (bad filter or cursor).
const EXIT_INVALID_REQUEST: i32 = 2;

/// Runs the `triage page` command.
///
/// Returns exit code 0 on success and 2 when the filter or cursor is invalid.
/// Source, configuration, and internal failures are returned as errors.
pub fn run(args: &PageArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let pipeline = Pipeline::new(&config);
    let request = build_request(args);
    if let Err(e) = pipeline.check_request(&request) {
        eprintln!("error: {e}");
        return Ok(EXIT_INVALID_REQUEST);
    }

    let progress = args
        .progress
        .as_deref()
        .map(|p| load_progress(Path::new(p)))
        .transpose()?;
    let source = JsonLinesSource::open(Path::new(&args.input))?.with_progress(progress);

    let options = PageOptions {
        deadline: args
            .timeout_ms
            .map_or(Deadline::NONE, |ms| {
                Deadline::at(Instant::now() + Duration::from_millis(ms))
            }),
    };

    let response = pipeline.run_page(&request, source, &options)?;

    match args.format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        ReportFormat::Text => print!("{}", render_text(&response, global.color)),
    }
    Ok(0)
}

/// Maps CLI flags onto a [`PageRequest`].
fn build_request(args: &PageArgs) -> PageRequest {
    PageRequest {
        max_diagnostics: args.max_diagnostics,
        cursor: args.cursor.clone(),
        severity_filter: args.severity.clone(),
        file_pattern: args.file_pattern.clone(),
        token_limit: args.token_limit,
    }
}

/// Loads the configuration named by `--config`, falling back to
/// `./triage.toml` and then to built-in defaults.
fn resolve_config(global: &GlobalArgs) -> Result<TriageConfig, Box<dyn std::error::Error>> {
    if let Some(ref path) = global.config {
        return Ok(triage_config::load_config(Path::new(path))?);
    }
    let local = Path::new(CONFIG_FILE_NAME);
    if local.is_file() {
        log::debug!("using {}", local.display());
        return Ok(triage_config::load_config(local)?);
    }
    Ok(TriageConfig::default())
}

/// Reads a build-progress JSON file.
fn load_progress(path: &Path) -> Result<BuildProgress, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read build progress {}: {e}", path.display()))?;
    let progress = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse build progress {}: {e}", path.display()))?;
    Ok(progress)
}

/// Renders a page for the terminal: diagnostics, summary, and next cursor.
fn render_text(response: &Response, color: bool) -> String {
    let renderer = TerminalRenderer::new(color);
    let mut out = String::new();
    for diag in &response.diagnostics {
        out.push_str(&renderer.render(diag));
        out.push('\n');
    }
    let summary = &response.summary;
    out.push_str(&format!(
        "   Result: {} error(s), {} warning(s) shown of {} seen, {} tokens [{}]\n",
        summary.error_count,
        summary.warning_count,
        summary.total_diagnostics,
        response.token_count,
        response.status
    ));
    if let Some(reason) = response.truncation_reason {
        let label = match reason {
            triage_pipeline::TruncationReason::TokenLimit => "token limit",
            triage_pipeline::TruncationReason::MaxDiagnosticsLimit => "diagnostic limit",
        };
        out.push_str(&format!("   Truncated by {label}\n"));
    }
    if let Some(ref cursor) = response.next_cursor {
        out.push_str(&format!("   Next page: --cursor {cursor}\n"));
    }
    out
}
