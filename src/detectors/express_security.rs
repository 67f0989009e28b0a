//! Express Security Detector
//!
//! Flags path-scoped `app.use` middleware written as an inline arrow
//! function when the registering line shows no sign of an auth check.
//! Only the first registration in the text is examined.

use crate::detectors::base::{Detector, SourceText};
use crate::models::{Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const RULE_ID: &str = "require-route-auth";

/// Any of these on the registering line counts as an auth check
const AUTH_MARKERS: &[&str] = &["auth", "authorize"];

static INLINE_MIDDLEWARE: OnceLock<Regex> = OnceLock::new();

fn inline_middleware() -> &'static Regex {
    INLINE_MIDDLEWARE.get_or_init(|| {
        Regex::new(
            r#"app\.use\s*\(\s*['"`][^'"`]+['"`]\s*,\s*\([^)]*\)\s*=>\s*\{[^}]*\}\s*\)"#,
        )
        .unwrap()
    })
}

pub struct ExpressSecurityDetector;

impl Detector for ExpressSecurityDetector {
    fn name(&self) -> &'static str {
        "express-security"
    }

    fn description(&self) -> &'static str {
        "Detects route middleware registered without an authorization check"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        vec![RULE_ID]
    }

    fn detect(&self, source: &SourceText<'_>) -> Vec<Finding> {
        if !inline_middleware().is_match(source.as_str()) {
            return vec![];
        }

        let line = source.first_line_matching(inline_middleware());
        let text = source.line(line).unwrap_or_default();
        if AUTH_MARKERS.iter().any(|marker| text.contains(marker)) {
            debug!("express-security: middleware on line {} has auth check", line);
            return vec![];
        }

        vec![Finding::new(
            "Route middleware missing authorization checks. Implement proper authentication.",
            line,
            Severity::High,
            RULE_ID,
        )]
    }
}
