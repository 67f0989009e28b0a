//! Security detectors
//!
//! This module provides the detector framework and the built-in detectors
//! that turn source text into findings.
//!
//! # Architecture
//!
//! ```text
//! source text
//!     │
//!     ├──► LineScanner              (rule catalog, per line)
//!     ├──► SqlInjectionDetector     (whole text)
//!     ├──► InsecureCryptoDetector   (whole text)
//!     └──► ExpressSecurityDetector  (whole text)
//!                 │
//!                 ▼
//!     findings, concatenated in detector order
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use secanalyzer::detectors::analyze_code;
//!
//! let findings = analyze_code("eval(userInput)");
//! assert_eq!(findings[0].rule, "no-eval");
//! ```

mod base;
mod express_security;
mod insecure_crypto;
mod line_scanner;
pub mod rules;
mod sql_injection;

pub use base::{DetectionSummary, Detector, SourceText};
pub use express_security::ExpressSecurityDetector;
pub use insecure_crypto::InsecureCryptoDetector;
pub use line_scanner::LineScanner;
pub use sql_injection::SqlInjectionDetector;

use crate::models::Finding;
use tracing::debug;

/// Built-in detectors in reporting order
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(LineScanner::new()),
        Box::new(SqlInjectionDetector),
        Box::new(InsecureCryptoDetector),
        Box::new(ExpressSecurityDetector),
    ]
}

/// Run all built-in detectors over `code`.
///
/// Never fails; a clean input yields an empty list.
pub fn analyze_code(code: &str) -> Vec<Finding> {
    analyze_with_summary(code).0
}

/// Like [`analyze_code`], also returning per-detector counts
pub fn analyze_with_summary(code: &str) -> (Vec<Finding>, DetectionSummary) {
    let source = SourceText::new(code);
    let mut summary = DetectionSummary::default();
    let mut findings = Vec::new();

    for detector in default_detectors() {
        let found = detector.detect(&source);
        summary.add_result(detector.name(), &found);
        findings.extend(found);
    }

    debug!(
        "{} detectors produced {} findings",
        summary.detectors_run, summary.total_findings
    );
    (findings, summary)
}
