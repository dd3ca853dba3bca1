use std::time::Duration;

const DEFAULT_PLAN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROCESS_TIMEOUT_SECS: u64 = 300;

/// How submissions for a video that already has an edit running are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InFlightPolicy {
    /// Any number of requests may run against the same video.
    #[default]
    Allow,
    /// A second submission is rejected until the running one finishes.
    ExclusivePerVideo,
}

impl InFlightPolicy {
    /// Parse the `EDIT_PER_VIDEO_POLICY` value (`allow` or `exclusive`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(Self::Allow),
            "exclusive" => Some(Self::ExclusivePerVideo),
            _ => None,
        }
    }
}

/// Timeouts and concurrency rules for [`EditWorkflow`](crate::EditWorkflow).
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Upper bound on the plan request, including transport retries.
    pub plan_timeout: Duration,
    /// Upper bound on the processing request.
    pub process_timeout: Duration,
    pub policy: InFlightPolicy,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            plan_timeout: Duration::from_secs(DEFAULT_PLAN_TIMEOUT_SECS),
            process_timeout: Duration::from_secs(DEFAULT_PROCESS_TIMEOUT_SECS),
            policy: InFlightPolicy::Allow,
        }
    }
}

impl WorkflowConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `EDIT_PLAN_TIMEOUT_SECS`    | `30`    |
    /// | `EDIT_PROCESS_TIMEOUT_SECS` | `300`   |
    /// | `EDIT_PER_VIDEO_POLICY`     | `allow` |
    pub fn from_env() -> Self {
        let plan_timeout_secs: u64 = std::env::var("EDIT_PLAN_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PLAN_TIMEOUT_SECS.to_string())
            .parse()
            .expect("EDIT_PLAN_TIMEOUT_SECS must be a valid u64");

        let process_timeout_secs: u64 = std::env::var("EDIT_PROCESS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_PROCESS_TIMEOUT_SECS.to_string())
            .parse()
            .expect("EDIT_PROCESS_TIMEOUT_SECS must be a valid u64");

        let policy = std::env::var("EDIT_PER_VIDEO_POLICY")
            .map(|v| InFlightPolicy::parse(&v).expect("EDIT_PER_VIDEO_POLICY must be 'allow' or 'exclusive'"))
            .unwrap_or_default();

        Self {
            plan_timeout: Duration::from_secs(plan_timeout_secs),
            process_timeout: Duration::from_secs(process_timeout_secs),
            policy,
        }
    }
}
