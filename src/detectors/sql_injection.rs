//! Advanced SQL injection detector
//!
//! Whole-text check for query builders fed an interpolated literal:
//!
//! - `knex.raw(`...${id}...`)`
//! - `db.query("...${id}...")`
//! - `database.execute('...${id}...')`
//!
//! Each sub-pattern reports at most once, on the first line where it matches.
//!
//! CWE-89: SQL Injection

use crate::detectors::base::{Detector, SourceText};
use crate::models::{Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const RULE_ID: &str = "no-advanced-sql-injection";
const MESSAGE: &str = "Advanced SQL injection risk detected. Use parameterized queries or an ORM.";

static INTERPOLATED_SQL: OnceLock<[Regex; 3]> = OnceLock::new();

fn interpolated_sql() -> &'static [Regex; 3] {
    INTERPOLATED_SQL.get_or_init(|| {
        [
            Regex::new(r#"(?i)\.raw\s*\(\s*['"`][^'"`]*\$\{"#).unwrap(),
            Regex::new(r#"(?i)\.query\s*\(\s*['"`][^'"`]*\$\{"#).unwrap(),
            Regex::new(r#"(?i)database\.execute\s*\(\s*['"`][^'"`]*\$\{"#).unwrap(),
        ]
    })
}

pub struct SqlInjectionDetector;

impl Detector for SqlInjectionDetector {
    fn name(&self) -> &'static str {
        "advanced-sql-injection"
    }

    fn description(&self) -> &'static str {
        "Detects interpolated literals passed to raw/query/execute calls"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        vec![RULE_ID]
    }

    fn detect(&self, source: &SourceText<'_>) -> Vec<Finding> {
        let findings: Vec<Finding> = interpolated_sql()
            .iter()
            .filter(|pattern| pattern.is_match(source.as_str()))
            .map(|pattern| {
                Finding::new(
                    MESSAGE,
                    source.first_line_matching(pattern),
                    Severity::High,
                    RULE_ID,
                )
            })
            .collect();

        debug!("advanced-sql-injection: {} findings", findings.len());
        findings
    }
}
