//! Fixed prompts for the security review request

/// System instruction; the response grammar depends on this exact wording
pub const SYSTEM_PROMPT: &str = "You are a security expert analyzing code for vulnerabilities. For each issue found, format the response as 'VULNERABILITY: description | LINE: line_number | SEVERITY: severity_level'. Severity should be high, medium, or low.";

pub const USER_PROMPT_PREFIX: &str = "Analyze this code for security vulnerabilities:\n\n";

/// User message carrying the code under review
pub fn build_user_prompt(code: &str) -> String {
    format!("{}{}", USER_PROMPT_PREFIX, code)
}
