use holdem_core::*;
use std::time::Duration;

/// Stakes and pacing for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Small blind unit; the big blind is twice this.
    pub small_blind: Chips,
    /// How long a seat may take before the timer resolves its turn.
    pub decision: Duration,
    /// Largest stack a seat may bring in.
    pub max_bring_in: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: SMALL_BLIND,
            decision: Duration::from_secs(DECISION_TIMEOUT),
            max_bring_in: MAX_BRING_IN,
        }
    }
}

impl TableConfig {
    pub fn big_blind(&self) -> Chips {
        self.small_blind * 2
    }
    /// Defaults overridden by `HOLDEM_SMALL_BLIND`, `HOLDEM_DECISION_TIMEOUT`
    /// and `HOLDEM_MAX_BRING_IN` where set.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            small_blind: match lookup("HOLDEM_SMALL_BLIND") {
                Some(s) => s.trim().parse()?,
                None => default.small_blind,
            },
            decision: match lookup("HOLDEM_DECISION_TIMEOUT") {
                Some(s) => parse_duration(&s)?,
                None => default.decision,
            },
            max_bring_in: match lookup("HOLDEM_MAX_BRING_IN") {
                Some(s) => s.trim().parse()?,
                None => default.max_bring_in,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = TableConfig::default();
        assert_eq!(config.small_blind, 10);
        assert_eq!(config.big_blind(), 20);
        assert_eq!(config.decision, Duration::from_secs(10));
        assert_eq!(config.max_bring_in, 2000);
    }

    #[test]
    fn lookup_overrides() {
        let vars = HashMap::from([
            ("HOLDEM_SMALL_BLIND", "25"),
            ("HOLDEM_DECISION_TIMEOUT", "30s"),
        ]);
        let config = TableConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.small_blind, 25);
        assert_eq!(config.decision, Duration::from_secs(30));
        assert_eq!(config.max_bring_in, MAX_BRING_IN);
    }

    #[test]
    fn lookup_rejects_garbage() {
        assert!(TableConfig::from_lookup(|k| (k == "HOLDEM_MAX_BRING_IN").then(|| "lots".into())).is_err());
        assert!(TableConfig::from_lookup(|k| (k == "HOLDEM_DECISION_TIMEOUT").then(|| "10y".into())).is_err());
    }
}
