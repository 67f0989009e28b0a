//! Line scanner
//!
//! Applies every catalog rule to every line. One finding per (line, rule)
//! match, line-major, catalog order within a line. No state crosses lines.

use crate::detectors::base::{Detector, SourceText};
use crate::detectors::rules::{self, Rule};
use crate::models::Finding;
use tracing::debug;

pub struct LineScanner {
    rules: &'static [Rule],
}

impl LineScanner {
    pub fn new() -> Self {
        Self {
            rules: rules::catalog(),
        }
    }
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LineScanner {
    fn name(&self) -> &'static str {
        "line-scanner"
    }

    fn description(&self) -> &'static str {
        "Applies the single-line rule catalog to each line"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    fn detect(&self, source: &SourceText<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (line_no, line) in source.numbered_lines() {
            for rule in self.rules {
                if rule.matches(line) {
                    findings.push(Finding::new(rule.message, line_no, rule.severity, rule.id));
                }
            }
        }

        debug!(
            "line-scanner: {} findings over {} lines",
            findings.len(),
            source.line_count()
        );
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn scan(code: &str) -> Vec<Finding> {
        LineScanner::new().detect(&SourceText::new(code))
    }

    #[test]
    fn test_empty_input_has_no_findings() {
        assert!(scan("").is_empty());
        assert!(scan("const x = 1;\nlet y = x + 2;").is_empty());
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let findings = scan("\n\nconsole.log(x)");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[0].rule, "no-console");
        assert_eq!(findings[0].severity, Severity::Low);
    }

    #[test]
    fn test_multiple_rules_on_one_line_follow_catalog_order() {
        // no-eval precedes no-console in the catalog
        let findings = scan("console.log(eval(x))");
        let rules: Vec<_> = findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["no-eval", "no-console"]);
        assert!(findings.iter().all(|f| f.line == 1));
    }

    #[test]
    fn test_output_is_line_major() {
        let findings = scan("console.log(a)\neval(b)\nconsole.log(c)");
        let lines: Vec<_> = findings.iter().map(|f| (f.line, f.rule.as_str())).collect();
        assert_eq!(
            lines,
            vec![(1, "no-console"), (2, "no-eval"), (3, "no-console")]
        );
    }

    #[test]
    fn test_same_rule_on_several_lines_is_not_deduplicated() {
        let findings = scan("eval(a)\neval(b)");
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn test_findings_rematch_their_line() {
        let code = "const q = \"SELECT * FROM t WHERE id = \" + id;\n\
                    el.innerHTML = html;\n\
                    const password = 'hunter2';\n\
                    localStorage.setItem('token', t);\n\
                    if (user.role === 'admin') { eval(cmd); }";
        let source = SourceText::new(code);
        let findings = LineScanner::new().detect(&source);
        assert!(findings.len() >= 5);
        for f in &findings {
            let rule = rules::find_rule(&f.rule).expect("catalog rule");
            let line = source.line(f.line).expect("line in range");
            assert!(rule.matches(line), "{} should re-match line {}", f.rule, f.line);
        }
    }

    #[test]
    fn test_idempotent() {
        let code = "eval(x)\nconsole.log(y)\ndocument.cookie = c";
        assert_eq!(scan(code), scan(code));
    }
}
