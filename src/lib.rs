//! secanalyzer - pattern-based security analysis
//!
//! Scans source text with a fixed catalog of regex rules plus a few
//! multi-line detectors, and condenses the findings into a 0-100 score.
//! An optional adapter asks an OpenAI-compatible model for a second opinion.
//!
//! ```
//! let findings = secanalyzer::detectors::analyze_code("eval(userInput)");
//! assert_eq!(findings[0].rule, "no-eval");
//! assert_eq!(secanalyzer::scoring::score_findings(&findings), 85);
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod models;
pub mod reporters;
pub mod scoring;
