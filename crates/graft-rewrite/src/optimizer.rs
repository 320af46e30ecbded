//! Pass context handed to every rule application.

use std::collections::BTreeSet;

/// Tunables read by [`RuleSet`](crate::RuleSet) while driving rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Upper bound on rewrites applied to one root by `RuleSet::simplify`.
    pub max_iterations: usize,
    /// Rule names that are skipped.
    pub disabled_rules: BTreeSet<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            disabled_rules: BTreeSet::new(),
        }
    }
}

/// Shared state of the pass that is currently running.
///
/// Rules receive it read-only. It is opaque to the matching machinery; only
/// the rule set consults the configuration.
#[derive(Clone, Debug)]
pub struct Optimizer {
    name: String,
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, OptimizerConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: OptimizerConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    /// Set the maximum number of rewrites applied to a single root.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Skip the rule with the given name.
    pub fn disable_rule(mut self, rule: impl Into<String>) -> Self {
        self.config.disabled_rules.insert(rule.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn is_enabled(&self, rule: &str) -> bool {
        !self.config.disabled_rules.contains(rule)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new("opt")
    }
}
