#![forbid(unsafe_code)]

//! Golden resize sweeps.
//!
//! A [`ResizeScenario`] lays the same items out across a sequence of
//! container sizes, as a host would on every resize event. Each step's plan
//! text is hashed; the list of checksums is compared against a golden file
//! under `tests/golden/`.
//!
//! # JSONL Schema
//!
//! With `GRIDWRAP_GOLDEN_LOG=<path>` set, each run appends:
//!
//! ```json
//! {"event":"start","run_id":"...","case":"row_major_widen","env":{...},"timestamp":1700000000}
//! {"event":"step","run_id":"...","step":0,"width":350.0,"height":220.0,"metrics":{...},"checksum":"sha256:..."}
//! {"event":"complete","run_id":"...","outcome":"pass","checksums":["sha256:..."],"total_ms":1}
//! ```
//!
//! # Updating Golden Checksums
//!
//! ```sh
//! BLESS=1 cargo test -p gridwrap-harness golden_
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use gridwrap_layout::{Grid, GridMetrics, LayoutCache, Size};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{Result, plan_to_text};

/// SHA-256 checksum prefix for clarity in logs.
pub const CHECKSUM_PREFIX: &str = "sha256:";

/// Environment variable naming the JSONL log file.
pub const LOG_ENV: &str = "GRIDWRAP_GOLDEN_LOG";

// ============================================================================
// Checksum Computation
// ============================================================================

/// SHA-256 checksum of a text string, hex-encoded with a `sha256:` prefix.
pub fn compute_text_checksum(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{CHECKSUM_PREFIX}{digest:x}")
}

// ============================================================================
// Environment Capture
// ============================================================================

/// Capture relevant environment for reproducibility.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenEnv {
    pub os: String,
    pub arch: String,
    pub rust_version: String,
    pub git_commit: String,
}

impl GoldenEnv {
    /// Capture current environment.
    pub fn capture() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            rust_version: command_output("rustc", &["--version"]),
            git_commit: command_output("git", &["rev-parse", "HEAD"]),
        }
    }
}

fn command_output(program: &str, args: &[&str]) -> String {
    std::process::Command::new(program)
        .args(args)
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".into())
}

// ============================================================================
// JSONL Logger
// ============================================================================

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum GoldenEvent<'a> {
    Start {
        run_id: &'a str,
        case: &'a str,
        env: &'a GoldenEnv,
        timestamp: u64,
    },
    Step {
        run_id: &'a str,
        step: usize,
        width: f64,
        height: f64,
        metrics: &'a GridMetrics,
        checksum: &'a str,
    },
    Complete {
        run_id: &'a str,
        outcome: GoldenOutcome,
        checksums: &'a [String],
        total_ms: u64,
    },
    Error {
        run_id: &'a str,
        message: &'a str,
        timestamp: u64,
    },
}

/// JSONL event logger for golden runs.
pub struct GoldenLogger {
    writer: Option<BufWriter<File>>,
    run_id: String,
    start_time: Instant,
    checksums: Vec<String>,
}

impl GoldenLogger {
    /// Create a logger appending to `path`.
    pub fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            ..Self::noop()
        })
    }

    /// Create a no-op logger (for when logging is disabled).
    pub fn noop() -> Self {
        Self {
            writer: None,
            run_id: generate_run_id(),
            start_time: Instant::now(),
            checksums: Vec::new(),
        }
    }

    /// Logger configured from [`LOG_ENV`], or a no-op logger when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(LOG_ENV) {
            Some(path) => Self::new(Path::new(&path)),
            None => Ok(Self::noop()),
        }
    }

    /// Whether events are being written.
    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Log run start.
    pub fn log_start(&mut self, case: &str, env: &GoldenEnv) -> Result<()> {
        let event = GoldenEvent::Start {
            run_id: &self.run_id,
            case,
            env,
            timestamp: unix_seconds(),
        };
        let line = serde_json::to_string(&event)?;
        self.write_line(&line)
    }

    /// Log one resize step.
    pub fn log_step(&mut self, step: usize, metrics: &GridMetrics, checksum: &str) -> Result<()> {
        self.checksums.push(checksum.to_string());
        let event = GoldenEvent::Step {
            run_id: &self.run_id,
            step,
            width: metrics.container.width,
            height: metrics.container.height,
            metrics,
            checksum,
        };
        let line = serde_json::to_string(&event)?;
        self.write_line(&line)
    }

    /// Log run completion.
    pub fn log_complete(&mut self, outcome: GoldenOutcome) -> Result<()> {
        let event = GoldenEvent::Complete {
            run_id: &self.run_id,
            outcome,
            checksums: &self.checksums,
            total_ms: self.start_time.elapsed().as_millis() as u64,
        };
        let line = serde_json::to_string(&event)?;
        self.write_line(&line)
    }

    /// Log an error event.
    pub fn log_error(&mut self, message: &str) -> Result<()> {
        let event = GoldenEvent::Error {
            run_id: &self.run_id,
            message,
            timestamp: unix_seconds(),
        };
        let line = serde_json::to_string(&event)?;
        self.write_line(&line)
    }

    /// Checksums logged so far.
    pub fn checksums(&self) -> &[String] {
        &self.checksums
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{line}")?;
            writer.flush()?;
        }
        Ok(())
    }
}

/// Run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldenOutcome {
    Pass,
    Fail,
    Skip,
}

fn generate_run_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{nanos:x}")
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ============================================================================
// Scenarios
// ============================================================================

/// A sequence of container sizes for one grid configuration.
#[derive(Debug, Clone)]
pub struct ResizeScenario {
    /// Scenario name, also the golden file stem.
    pub name: String,
    /// Grid under test.
    pub grid: Grid,
    /// Items are `0..item_count`.
    pub item_count: usize,
    /// Container sizes, in order.
    pub sizes: Vec<Size>,
}

impl ResizeScenario {
    /// Create a scenario with no sizes.
    pub fn new(name: &str, grid: Grid, item_count: usize) -> Self {
        Self {
            name: name.to_string(),
            grid,
            item_count,
            sizes: Vec::new(),
        }
    }

    /// Append a container size.
    #[must_use]
    pub fn step(mut self, width: f64, height: f64) -> Self {
        self.sizes.push(Size::new(width, height));
        self
    }
}

/// Standard resize scenarios.
pub fn standard_resize_scenarios() -> Vec<ResizeScenario> {
    let min = Size::new(100.0, 100.0);
    vec![
        ResizeScenario::new("row_major_widen", Grid::row_major(min), 9)
            .step(100.0, 220.0)
            .step(250.0, 220.0)
            .step(350.0, 220.0)
            .step(500.0, 220.0)
            .step(1000.0, 220.0),
        ResizeScenario::new("row_major_seven", Grid::row_major(min), 7)
            .step(350.0, 220.0)
            .step(350.0, 500.0)
            .step(0.0, 0.0),
        ResizeScenario::new("column_major_grow", Grid::column_major(min), 9)
            .step(220.0, 350.0)
            .step(220.0, 100.0)
            .step(600.0, 300.0),
        ResizeScenario::new("degenerate_inputs", Grid::new(Size::new(0.0, -1.0)), 4)
            .step(3.0, 5.0)
            .step(-10.0, 2.5),
    ]
}

/// Checksums and plan texts for every step of a scenario.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRun {
    pub checksums: Vec<String>,
    pub texts: Vec<String>,
}

/// Lay the scenario out at every size, logging each step.
pub fn run_scenario(scenario: &ResizeScenario, logger: &mut GoldenLogger) -> Result<ScenarioRun> {
    let mut cache = LayoutCache::default();
    let mut run = ScenarioRun::default();

    for (step, size) in scenario.sizes.iter().enumerate() {
        let plan = cache.layout(&scenario.grid, *size, 0..scenario.item_count);
        let text = plan_to_text(&plan);
        let checksum = compute_text_checksum(&text);
        logger.log_step(step, plan.metrics(), &checksum)?;
        run.checksums.push(checksum);
        run.texts.push(text);
    }

    Ok(run)
}

// ============================================================================
// Golden File Management
// ============================================================================

/// Path to golden checksums file for a scenario.
pub fn golden_checksum_path(base_dir: &Path, scenario_name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("golden")
        .join(format!("{scenario_name}.checksums"))
}

/// Load expected checksums from a golden file (empty when missing).
pub fn load_golden_checksums(path: &Path) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Save checksums to a golden file.
pub fn save_golden_checksums(path: &Path, checksums: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format!(
        "# Golden checksums - regenerate with BLESS=1\n{}\n",
        checksums.join("\n")
    );
    fs::write(path, content)?;
    Ok(())
}

/// Check if we should update golden files (BLESS mode).
pub fn is_bless_mode() -> bool {
    crate::is_bless()
}

// ============================================================================
// Golden Test Runner
// ============================================================================

/// Result of a golden run.
#[derive(Debug)]
pub struct GoldenResult {
    pub scenario: String,
    pub outcome: GoldenOutcome,
    pub checksums: Vec<String>,
    pub expected_checksums: Vec<String>,
    pub mismatch_index: Option<usize>,
    pub texts: Vec<String>,
}

impl GoldenResult {
    /// Check if the result is a pass.
    pub fn is_pass(&self) -> bool {
        self.outcome == GoldenOutcome::Pass
    }

    /// Format as human-readable string.
    pub fn format(&self) -> String {
        match self.outcome {
            GoldenOutcome::Pass => format!("PASS: {}", self.scenario),
            GoldenOutcome::Fail => match self.mismatch_index {
                Some(idx) => format!(
                    "FAIL: {} - checksum mismatch at step {}\n  expected: {}\n  actual: {}\n  plan:\n{}",
                    self.scenario,
                    idx,
                    self.expected_checksums.get(idx).map_or("<none>", String::as_str),
                    self.checksums.get(idx).map_or("<none>", String::as_str),
                    self.texts.get(idx).map_or("<none>", String::as_str),
                ),
                None => format!("FAIL: {} - checksum count mismatch", self.scenario),
            },
            GoldenOutcome::Skip => format!("SKIP: {}", self.scenario),
        }
    }
}

/// Verify checksums against expected values.
///
/// An empty expectation passes; there is nothing recorded yet.
pub fn verify_checksums(actual: &[String], expected: &[String]) -> (GoldenOutcome, Option<usize>) {
    if expected.is_empty() {
        return (GoldenOutcome::Pass, None);
    }

    if actual.len() != expected.len() {
        return (GoldenOutcome::Fail, None);
    }

    match actual.iter().zip(expected).position(|(a, e)| a != e) {
        Some(i) => (GoldenOutcome::Fail, Some(i)),
        None => (GoldenOutcome::Pass, None),
    }
}

/// Run a scenario against its golden file under `base_dir`.
///
/// In BLESS mode the golden file is rewritten and the run passes.
pub fn run_golden(scenario: &ResizeScenario, base_dir: &Path) -> Result<GoldenResult> {
    let mut logger = GoldenLogger::from_env()?;
    logger.log_start(&scenario.name, &GoldenEnv::capture())?;

    let run = match run_scenario(scenario, &mut logger) {
        Ok(run) => run,
        Err(err) => {
            logger.log_error(&err.to_string())?;
            return Err(err);
        }
    };

    let path = golden_checksum_path(base_dir, &scenario.name);
    let (outcome, mismatch_index, expected) = if is_bless_mode() {
        save_golden_checksums(&path, &run.checksums)?;
        (GoldenOutcome::Pass, None, run.checksums.clone())
    } else {
        let expected = load_golden_checksums(&path)?;
        let (outcome, idx) = verify_checksums(&run.checksums, &expected);
        (outcome, idx, expected)
    };

    logger.log_complete(outcome)?;

    Ok(GoldenResult {
        scenario: scenario.name.clone(),
        outcome,
        checksums: run.checksums,
        expected_checksums: expected,
        mismatch_index,
        texts: run.texts,
    })
}
