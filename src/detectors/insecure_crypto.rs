//! Insecure Crypto Detector

use crate::detectors::base::{Detector, SourceText};
use crate::models::{Finding, Severity};
use regex::Regex;
use std::sync::OnceLock;

const RULE_ID: &str = "no-weak-crypto";

static WEAK_HASH: OnceLock<Regex> = OnceLock::new();

fn weak_hash() -> &'static Regex {
    WEAK_HASH.get_or_init(|| Regex::new(r#"crypto\.createHash\(['"]md5['"]\)"#).unwrap())
}

pub struct InsecureCryptoDetector;

impl Detector for InsecureCryptoDetector {
    fn name(&self) -> &'static str {
        "insecure-crypto"
    }

    fn description(&self) -> &'static str {
        "Detects MD5 hash construction"
    }

    fn rule_ids(&self) -> Vec<&'static str> {
        vec![RULE_ID]
    }

    fn detect(&self, source: &SourceText<'_>) -> Vec<Finding> {
        if !weak_hash().is_match(source.as_str()) {
            return vec![];
        }
        vec![Finding::new(
            "MD5 is cryptographically weak. Use stronger alternatives like SHA-256.",
            source.first_line_matching(weak_hash()),
            Severity::High,
            RULE_ID,
        )]
    }
}
