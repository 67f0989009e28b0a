//! Model-backed security review
//!
//! The model is asked to answer one issue per line:
//!
//! ```text
//! VULNERABILITY: <description> | LINE: <n> | SEVERITY: <high|medium|low>
//! ```
//!
//! Parsing is best-effort. A line missing any of the three fields is
//! dropped, an unreadable line number becomes 1, and an unknown severity
//! becomes medium.

use crate::ai::client::{AiClient, Message};
use crate::ai::prompts::{build_user_prompt, SYSTEM_PROMPT};
use crate::ai::AiResult;
use crate::models::{Finding, Severity};
use tracing::{debug, info, warn};

/// Rule id attached to every model-reported finding
pub const AI_RULE_ID: &str = "ai-security-check";

const VULNERABILITY_PREFIX: &str = "VULNERABILITY:";
const LINE_PREFIX: &str = "LINE:";
const SEVERITY_PREFIX: &str = "SEVERITY:";

pub struct AiAnalyzer {
    client: AiClient,
}

impl AiAnalyzer {
    pub fn new(client: AiClient) -> Self {
        Self { client }
    }

    /// Review `code` with the model.
    ///
    /// Exactly one request is made. Any transport or service failure is
    /// returned as an error; findings are never partially returned.
    pub fn analyze_code(&self, code: &str) -> AiResult<Vec<Finding>> {
        info!(
            "Requesting AI security review ({} bytes, model {})",
            code.len(),
            self.client.model()
        );

        let messages = vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_user_prompt(code)),
        ];

        let response = self.client.generate(messages).map_err(|e| {
            warn!("AI analysis failed: {}", e);
            e
        })?;

        let findings = parse_response(&response);
        info!("AI review reported {} findings", findings.len());
        Ok(findings)
    }
}

/// Fields collected from one response line
#[derive(Default)]
struct Candidate {
    message: Option<String>,
    line: Option<u32>,
    severity: Option<Severity>,
}

impl Candidate {
    fn into_finding(self) -> Option<Finding> {
        let message = self.message.filter(|m| !m.is_empty())?;
        Some(Finding::new(message, self.line?, self.severity?, AI_RULE_ID))
    }
}

/// Parse a model response into findings, dropping malformed lines
pub fn parse_response(response: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for raw_line in response.split('\n') {
        if raw_line.trim().is_empty() {
            continue;
        }

        let mut candidate = Candidate::default();
        for part in raw_line.split('|').map(str::trim) {
            if let Some(rest) = part.strip_prefix(VULNERABILITY_PREFIX) {
                candidate.message = Some(rest.trim().to_string());
            } else if let Some(rest) = part.strip_prefix(LINE_PREFIX) {
                candidate.line = Some(parse_line_number(rest));
            } else if let Some(rest) = part.strip_prefix(SEVERITY_PREFIX) {
                candidate.severity = Some(Severity::from_label(rest));
            }
        }

        match candidate.into_finding() {
            Some(finding) => findings.push(finding),
            None => debug!("Dropping unparseable AI response line: {}", raw_line.trim()),
        }
    }

    findings
}

/// Leading decimal digits of `value`, after an optional `+`.
///
/// No digits, zero or a negative value becomes 1; values past `u32::MAX`
/// saturate.
fn parse_line_number(value: &str) -> u32 {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let digits = &value[..digits_end];

    if digits.is_empty() {
        return 1;
    }
    // Only overflow can fail here
    match digits.parse::<u32>().unwrap_or(u32::MAX) {
        0 => 1,
        n => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_line() {
        let findings = parse_response("VULNERABILITY: SQL injection risk | LINE: 3 | SEVERITY: high\n");
        assert_eq!(
            findings,
            vec![Finding::new(
                "SQL injection risk",
                3,
                Severity::High,
                "ai-security-check"
            )]
        );
    }

    #[test]
    fn test_missing_line_drops_candidate() {
        assert!(parse_response("VULNERABILITY: foo | SEVERITY: weird").is_empty());
    }

    #[test]
    fn test_missing_message_or_severity_drops_candidate() {
        assert!(parse_response("LINE: 2 | SEVERITY: high").is_empty());
        assert!(parse_response("VULNERABILITY: foo | LINE: 2").is_empty());
        assert!(parse_response("VULNERABILITY:  | LINE: 2 | SEVERITY: low").is_empty());
    }

    #[test]
    fn test_unknown_severity_becomes_medium() {
        let findings = parse_response("VULNERABILITY: foo | LINE: 1 | SEVERITY: Critical");
        assert_eq!(findings[0].severity, Severity::Medium);

        let findings = parse_response("VULNERABILITY: foo | LINE: 1 | SEVERITY: LOW");
        assert_eq!(findings[0].severity, Severity::Low);
    }

    #[test]
    fn test_bad_line_numbers_become_one() {
        let findings = parse_response(
            "VULNERABILITY: a | LINE: n/a | SEVERITY: high\n\
             VULNERABILITY: b | LINE: 0 | SEVERITY: high\n\
             VULNERABILITY: c | LINE: -4 | SEVERITY: high\n\
             VULNERABILITY: d | LINE: 12-14 | SEVERITY: high",
        );
        let lines: Vec<_> = findings.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 12]);
    }

    #[test]
    fn test_line_number_sign_and_overflow() {
        assert_eq!(parse_line_number("+3"), 3);
        assert_eq!(parse_line_number(" +42 "), 42);
        assert_eq!(parse_line_number("++3"), 1);
        assert_eq!(parse_line_number("99999999999999999999"), u32::MAX);
        assert_eq!(parse_line_number("4294967295"), u32::MAX);
        assert_eq!(parse_line_number("007"), 7);

        let findings = parse_response("VULNERABILITY: x | LINE: +8 | SEVERITY: high");
        assert_eq!(findings[0].line, 8);
    }

    #[test]
    fn test_blank_and_chatter_lines_are_skipped() {
        let response = "Here is my analysis:\n\n\
                        VULNERABILITY: eval on user input | LINE: 7 | SEVERITY: high\n\
                        \n\
                        VULNERABILITY: console output | LINE: 9 | SEVERITY: low\n\
                        Let me know if you need more detail.";
        let findings = parse_response(response);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].line, 7);
        assert_eq!(findings[1].message, "console output");
        assert!(findings.iter().all(|f| f.rule == AI_RULE_ID));
    }

    #[test]
    fn test_field_order_does_not_matter() {
        let findings = parse_response("SEVERITY: low | LINE: 5 | VULNERABILITY: xss");
        assert_eq!(findings, vec![Finding::new("xss", 5, Severity::Low, AI_RULE_ID)]);
    }

    #[test]
    fn test_prefixes_are_case_sensitive() {
        assert!(parse_response("vulnerability: foo | line: 2 | severity: high").is_empty());
    }

    #[test]
    fn test_empty_response() {
        assert!(parse_response("").is_empty());
        assert!(parse_response("\n \n").is_empty());
    }
}
