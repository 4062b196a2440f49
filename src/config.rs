//! Rate limit rule model and JSON file loading.
//! Used by: registry, main.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

const DEFAULT_PATH: &str = "limits.json";

/// What a rule's key list refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Ip,
    Endpoint,
}

/// One rate limit rule. Expands to one limiter per listed key.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitRule {
    pub kind: RuleKind,
    pub limit: u32,
    pub window_secs: u64,
    #[serde(default)]
    pub ips: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl LimitRule {
    pub fn ip(limit: u32, window: Duration, ips: &[&str]) -> Self {
        Self {
            kind: RuleKind::Ip,
            limit,
            window_secs: window.as_secs(),
            ips: ips.iter().map(|s| s.to_string()).collect(),
            endpoints: Vec::new(),
        }
    }

    pub fn endpoint(limit: u32, window: Duration, endpoints: &[&str]) -> Self {
        Self {
            kind: RuleKind::Endpoint,
            limit,
            window_secs: window.as_secs(),
            ips: Vec::new(),
            endpoints: endpoints.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The key list selected by `kind`; the other list is ignored.
    pub fn keys(&self) -> &[String] {
        match self.kind {
            RuleKind::Ip => &self.ips,
            RuleKind::Endpoint => &self.endpoints,
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Ordered rule list. Later rules win on routing-key collisions.
#[derive(Debug, Clone, Default)]
pub struct Rules(Vec<LimitRule>);

impl Rules {
    pub fn new(rules: Vec<LimitRule>) -> Self {
        Self(rules)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rules: Vec<LimitRule> = serde_json::from_str(&content)?;
        Ok(Self(rules))
    }

    pub fn from_default_file() -> Self {
        Self::from_file(DEFAULT_PATH).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[LimitRule] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rule_list_from_json() -> Result<()> {
        let raw = r#"[
            {"kind": "ip", "limit": 5, "window_secs": 10, "ips": ["127.0.0.1"]},
            {"kind": "endpoint", "limit": 10, "window_secs": 10, "endpoints": ["/"]}
        ]"#;
        let rules: Vec<LimitRule> = serde_json::from_str(raw)?;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].kind, RuleKind::Ip);
        assert_eq!(rules[0].keys(), ["127.0.0.1"]);
        assert_eq!(rules[1].kind, RuleKind::Endpoint);
        assert_eq!(rules[1].keys(), ["/"]);
        Ok(())
    }

    #[test]
    fn missing_key_lists_default_to_empty() -> Result<()> {
        let raw = r#"[{"kind": "ip", "limit": 5, "window_secs": 10}]"#;
        let rules: Vec<LimitRule> = serde_json::from_str(raw)?;
        assert!(rules[0].keys().is_empty());
        Ok(())
    }

    #[test]
    fn keys_follow_rule_kind() {
        let rule = LimitRule::endpoint(10, Duration::from_secs(10), &["/", "/api"]);
        assert_eq!(rule.keys(), ["/", "/api"]);
        assert_eq!(rule.window(), Duration::from_secs(10));
    }

    #[test]
    fn missing_file_falls_back_to_empty() {
        let rules = Rules::from_file("no-such-limits.json");
        assert!(rules.is_err());
        assert!(Rules::default().is_empty());
    }
}
