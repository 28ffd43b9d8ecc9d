use crate::model::Config;

/// Context handed to an advisor for one detection.
#[derive(Debug, Clone)]
pub struct AdvisoryContext {
    pub project_name: String,
    pub rule_based_config: Config,
}

/// Optional advisory layer. The rule-based detection engine never depends
/// on this trait being wired in — [`NullAdvisor`] is the default and makes
/// the engine run unchanged when no advisor is present.
///
/// Everything about how an advisor arrives at its recommendation (model
/// choice, memory, tool use) is outside this crate's concern; only the
/// shape of the handoff is specified.
pub trait Advisor: Send + Sync {
    /// Propose a Config for this detection. Returns the (possibly
    /// unchanged) Config, an opaque decision id, and a confidence in 0..=1.
    fn advise(&self, context: &AdvisoryContext) -> (Config, String, f32);

    /// Report back whether the advised Config led to a successful
    /// deployment, so the advisor can learn from the outcome.
    fn verify_outcome(&self, decision_id: &str, success: bool, note: &str);
}

/// Default advisor: always returns the rule-based Config unchanged with
/// zero confidence, and discards outcome reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAdvisor;

impl Advisor for NullAdvisor {
    fn advise(&self, context: &AdvisoryContext) -> (Config, String, f32) {
        (context.rule_based_config.clone(), String::new(), 0.0)
    }

    fn verify_outcome(&self, _decision_id: &str, _success: bool, _note: &str) {}
}
