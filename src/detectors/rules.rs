//! Built-in rule catalog
//!
//! A flat, ordered table of single-line rules. Order decides the order of
//! findings within a line and nothing else.
//!
//! Categories (by position, not by type):
//! - SQL injection
//! - Insecure data handling
//! - Authorization checks
//! - Code injection, credential and debug hygiene

use crate::models::Severity;
use regex::Regex;
use std::sync::OnceLock;

/// Capture group holding a route's handler arguments
const HANDLER_GROUP: &str = "handler";

/// Static definition of a rule, compiled into a [`Rule`] on first use
struct RuleSpec {
    id: &'static str,
    pattern: &'static str,
    message: &'static str,
    severity: Severity,
    /// Suppress a match whose `handler` capture contains this token
    unless_handler_contains: Option<&'static str>,
}

const RULE_SPECS: &[RuleSpec] = &[
    // SQL injection
    RuleSpec {
        id: "no-sql-injection",
        pattern: r#"(?i)\b(SELECT|INSERT|UPDATE|DELETE)\b.*(\+\s*['"`]|['"`]\s*\+)"#,
        message: "Potential SQL injection vulnerability. Use parameterized queries instead of string concatenation.",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-sql-template-injection",
        pattern: r#"(?i)execute\s*\(\s*['"`][^'"`]*\$\{"#,
        message: "Template literals in SQL queries can lead to SQL injection. Use parameterized queries.",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-direct-query-concat",
        pattern: r#"(?i)mysql\.query\s*\(\s*['"`][^'"`]*(['"`]\s*)?\+"#,
        message: "Direct query string concatenation detected. Use parameterized queries.",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    // Insecure data handling
    RuleSpec {
        id: "secure-file-permissions",
        pattern: r#"\.writeFileSync\s*\(\s*.*,\s*.*,\s*['"]utf8['"]\s*\)"#,
        message: "Use proper file permissions when writing files. Consider using restrictive file permissions.",
        severity: Severity::Medium,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "validate-json-input",
        pattern: r"JSON\.parse\s*\(\s*.*\s*\)",
        message: "Validate JSON data before parsing to prevent JSON injection attacks.",
        severity: Severity::Medium,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-sensitive-localstorage",
        pattern: r"localStorage\.(get|set)Item",
        message: "Sensitive data should not be stored in localStorage. Use secure storage methods.",
        severity: Severity::Medium,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "secure-cookie-flags",
        pattern: r"document\.cookie\s*=\s*",
        message: "Set secure and httpOnly flags when handling cookies.",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    // Authorization checks
    RuleSpec {
        id: "require-auth-middleware",
        pattern: r#"router\.(get|post|put|delete)\s*\(\s*['"`][^'"`]+['"`]\s*,(?P<handler>.*)\)"#,
        message: "Route handler missing authorization middleware. Add authentication checks.",
        severity: Severity::High,
        unless_handler_contains: Some("auth"),
    },
    RuleSpec {
        id: "secure-auth-check",
        pattern: r"req\.user\s*\?\s*req\.user\s*:\s*",
        message: "Unsafe user authentication check. Ensure proper authentication validation.",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-hardcoded-roles",
        pattern: r#"role\s*===\s*['"]admin['"]"#,
        message: "Hardcoded role check detected. Implement proper role-based access control (RBAC).",
        severity: Severity::Medium,
        unless_handler_contains: None,
    },
    // Code injection, credentials, debug output
    RuleSpec {
        id: "no-eval",
        pattern: r"eval\(",
        message: "Avoid using eval() as it can lead to code injection vulnerabilities",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-hardcoded-credentials",
        pattern: r#"(?i)password\s*=\s*['"][^'"]*['"]"#,
        message: "Hardcoded passwords detected",
        severity: Severity::High,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-console",
        pattern: r"console\.log",
        message: "Remove console.log statements in production code",
        severity: Severity::Low,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-inner-html",
        pattern: r"innerHTML",
        message: "innerHTML can lead to XSS vulnerabilities. Consider using textContent",
        severity: Severity::Medium,
        unless_handler_contains: None,
    },
    RuleSpec {
        id: "no-new-func",
        pattern: r"new\s+Function\(",
        message: "Avoid using new Function() as it can lead to code injection",
        severity: Severity::High,
        unless_handler_contains: None,
    },
];

/// A compiled single-line detection rule
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub message: &'static str,
    pub severity: Severity,
    pattern: Regex,
    unless_handler_contains: Option<&'static str>,
}

impl Rule {
    /// Whether this rule fires on a single line of text
    pub fn matches(&self, line: &str) -> bool {
        match self.unless_handler_contains {
            None => self.pattern.is_match(line),
            Some(token) => self.pattern.captures_iter(line).any(|caps| {
                caps.name(HANDLER_GROUP)
                    .map_or(true, |handler| !handler.as_str().contains(token))
            }),
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

static CATALOG: OnceLock<Vec<Rule>> = OnceLock::new();

/// The ordered rule catalog, compiled once per process
pub fn catalog() -> &'static [Rule] {
    CATALOG.get_or_init(|| {
        RULE_SPECS
            .iter()
            .map(|spec| Rule {
                id: spec.id,
                message: spec.message,
                severity: spec.severity,
                pattern: Regex::new(spec.pattern).expect("built-in rule pattern"),
                unless_handler_contains: spec.unless_handler_contains,
            })
            .collect()
    })
}

/// Look up a catalog rule by id
pub fn find_rule(id: &str) -> Option<&'static Rule> {
    catalog().iter().find(|r| r.id == id)
}
