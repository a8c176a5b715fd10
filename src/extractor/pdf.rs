// file: src/extractor/pdf.rs
// description: page-document metadata extraction via optional poppler tools
// reference: pdfinfo/pdftotext line-oriented output

use crate::config::ExtractionConfig;
use crate::models::MetadataDraft;
use crate::utils::Validator;
use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

const INFO_TOOL: &str = "pdfinfo";
const TEXT_TOOL: &str = "pdftotext";

pub fn extract(path: &Path, config: &ExtractionConfig) -> MetadataDraft {
    let mut draft = MetadataDraft::default();
    let timeout = Duration::from_secs(config.tool_timeout_secs);

    if tool_on_path(INFO_TOOL) {
        if let Some(output) = run_bounded(INFO_TOOL, &[path_arg(path)], timeout) {
            apply_info_output(&output, &mut draft);
        }
    } else {
        debug!("{} not available, skipping document summary", INFO_TOOL);
    }

    if tool_on_path(TEXT_TOOL) {
        let last_page = config.pdf_text_pages.to_string();
        let args = [
            "-f".to_string(),
            "1".to_string(),
            "-l".to_string(),
            last_page,
            "-q".to_string(),
            path_arg(path),
            "-".to_string(),
        ];
        if let Some(text) = run_bounded(TEXT_TOOL, &args, timeout) {
            draft.description =
                Validator::truncate_text(&leading_text(&text), config.description_max_chars);
        }
    } else {
        debug!("{} not available, skipping text extraction", TEXT_TOOL);
    }

    draft
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Availability probe: does the named tool exist on PATH? Consulted on
/// every extraction call; absence is a normal branch.
pub fn tool_on_path(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&paths).any(|dir| {
        let candidate: PathBuf = dir.join(name);
        candidate.is_file()
    })
}

/// Run an external tool, capturing stdout, with a hard deadline. A tool
/// that fails to spawn, exits non-zero, or outlives the deadline yields
/// None; the caller degrades silently.
fn run_bounded(tool: &str, args: &[String], timeout: Duration) -> Option<String> {
    let mut child = match Command::new(tool)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            debug!("Failed to spawn {}: {}", tool, e);
            return None;
        }
    };

    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    debug!("{} timed out after {:?}", tool, timeout);
                    return None;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                debug!("Failed to poll {}: {}", tool, e);
                return None;
            }
        }
    }

    let output = child.wait_with_output().ok()?;
    if !output.status.success() {
        debug!("{} exited with {}", tool, output.status);
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse pdfinfo's `Key: value` lines into the draft.
fn apply_info_output(output: &str, draft: &mut MetadataDraft) {
    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim().to_lowercase().as_str() {
            "title" => draft.title = Some(value.to_string()),
            "author" => draft.author = Some(value.to_string()),
            "pages" => draft.page_count = value.parse().unwrap_or(0),
            "keywords" => {
                draft.keywords = value
                    .split([',', ';'])
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            _ => {}
        }
    }
}

/// First paragraph of extracted text: leading non-empty lines joined
/// with spaces, stopping at the first blank line.
fn leading_text(text: &str) -> String {
    let mut lines = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        lines.push(trimmed);
    }

    lines.join(" ")
}
