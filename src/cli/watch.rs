//! Watch command - re-run local analysis whenever a file is saved
//!
//! Watches a single file, or every JavaScript/TypeScript source under a
//! directory, and prints the findings each save adds or resolves along with
//! the file's new score. The AI review is never run from here.

use crate::detectors;
use crate::models::{Finding, ScoreRating, Severity};
use crate::scoring::score_findings;
use anyhow::{Context, Result};
use console::style;
use notify::RecursiveMode;
use notify_debouncer_full::{new_debouncer, DebounceEventResult};
use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, warn};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Extensions picked up in directory mode
const WATCH_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// Directory names never descended into
const IGNORED_DIRS: &[&str] = &["node_modules", "dist", "build", "target", "coverage"];

/// What a watch session covers
#[derive(Debug)]
enum WatchScope {
    File(PathBuf),
    Dir(PathBuf),
}

impl WatchScope {
    fn new(target: PathBuf) -> Self {
        if target.is_dir() {
            WatchScope::Dir(target)
        } else {
            WatchScope::File(target)
        }
    }

    /// Single files are watched through their parent so editors that save
    /// by rename keep triggering events
    fn watch_root(&self) -> &Path {
        match self {
            WatchScope::File(file) => file.parent().unwrap_or(file),
            WatchScope::Dir(dir) => dir,
        }
    }

    fn mode(&self) -> RecursiveMode {
        match self {
            WatchScope::File(_) => RecursiveMode::NonRecursive,
            WatchScope::Dir(_) => RecursiveMode::Recursive,
        }
    }

    fn includes(&self, path: &Path) -> bool {
        match self {
            WatchScope::File(file) => path == file,
            WatchScope::Dir(dir) => has_watched_extension(path) && !is_ignored_path(path, dir),
        }
    }

    /// Path shown to the user for `file`
    fn display<'a>(&self, file: &'a Path) -> std::path::Display<'a> {
        match self {
            WatchScope::File(_) => file.file_name().map(Path::new).unwrap_or(file).display(),
            WatchScope::Dir(dir) => file.strip_prefix(dir).unwrap_or(file).display(),
        }
    }
}

/// Run the watch command until the watcher shuts down (Ctrl+C)
pub fn run(path: &Path) -> Result<()> {
    let target = std::fs::canonicalize(path)
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    let scope = WatchScope::new(target);

    println!(
        "\nWatching {} for changes...\n",
        style(scope.watch_root().display()).cyan()
    );
    println!("  {} Save a file to re-run analysis", style("→").dim());
    println!("  {} Press Ctrl+C to stop\n", style("→").dim());

    let mut previous: HashMap<PathBuf, Vec<Finding>> = HashMap::new();
    if let WatchScope::File(file) = &scope {
        if let Some(findings) = analyze_file(file) {
            print_update(&scope, file, &[], &findings);
            previous.insert(file.clone(), findings);
        }
    }

    let (tx, rx) = mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, None, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let _ = tx.send(events);
            }
            Err(errors) => {
                for e in errors {
                    warn!("Watch error: {}", e);
                }
            }
        }
    })?;
    debouncer.watch(scope.watch_root(), scope.mode())?;

    while let Ok(events) = rx.recv() {
        let changed: BTreeSet<PathBuf> = events
            .iter()
            .flat_map(|event| event.paths.iter())
            .filter(|p| scope.includes(p))
            .cloned()
            .collect();

        for file in changed {
            match analyze_file(&file) {
                Some(findings) => {
                    let prev = previous.get(&file).cloned().unwrap_or_default();
                    print_update(&scope, &file, &prev, &findings);
                    previous.insert(file, findings);
                }
                None => {
                    if previous.remove(&file).is_some() {
                        println!(
                            "{} {} removed",
                            timestamp(),
                            style(scope.display(&file)).dim()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// Local findings for `file`, or `None` when it can no longer be read
fn analyze_file(file: &Path) -> Option<Vec<Finding>> {
    match super::analyze::read_source(file) {
        Ok((_, code)) => Some(detectors::analyze_code(&code)),
        Err(e) => {
            debug!("Skipping {}: {:#}", file.display(), e);
            None
        }
    }
}

/// Findings that appeared and disappeared between two runs on one file
#[derive(Debug, PartialEq)]
struct FindingDiff<'a> {
    added: Vec<&'a Finding>,
    resolved: Vec<&'a Finding>,
}

fn diff_findings<'a>(previous: &'a [Finding], current: &'a [Finding]) -> FindingDiff<'a> {
    FindingDiff {
        added: current.iter().filter(|f| !previous.contains(f)).collect(),
        resolved: previous.iter().filter(|f| !current.contains(f)).collect(),
    }
}

fn print_update(scope: &WatchScope, file: &Path, previous: &[Finding], current: &[Finding]) {
    let score = score_findings(current);
    let rating = ScoreRating::from_score(score);
    let diff = diff_findings(previous, current);

    if diff.added.is_empty() && diff.resolved.is_empty() {
        println!(
            "{} {} score {}% ({} findings, no changes)",
            timestamp(),
            style(scope.display(file)).dim(),
            score,
            current.len()
        );
        return;
    }

    println!(
        "{} {} score {}% ({})",
        timestamp(),
        style(scope.display(file)).cyan().bold(),
        score,
        rating
    );
    for f in &diff.added {
        println!(
            "  {} {:>4}  {} {}",
            severity_tag(f.severity),
            f.line,
            f.message,
            style(&f.rule).dim()
        );
    }
    for f in &diff.resolved {
        println!(
            "  {} {:>4}  {} {}",
            style("FIX").green(),
            f.line,
            style(&f.message).strikethrough(),
            style(&f.rule).dim()
        );
    }
    println!();
}

fn timestamp() -> console::StyledObject<String> {
    style(format!("[{}]", chrono::Local::now().format("%H:%M:%S"))).dim()
}

fn severity_tag(severity: Severity) -> console::StyledObject<&'static str> {
    match severity {
        Severity::High => style("[H]").red(),
        Severity::Medium => style("[M]").yellow(),
        Severity::Low => style("[L]").blue(),
    }
}

fn has_watched_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WATCH_EXTENSIONS.contains(&ext))
}

/// Dependency, build and hidden directories under `root`
fn is_ignored_path(path: &Path, root: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components().any(|c| match c {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|n| n.starts_with('.') || IGNORED_DIRS.contains(&n)),
        _ => false,
    })
}
