//! Step domain types

use serde::{Deserialize, Serialize};

/// One external command in a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Short identity used in log markers (e.g. `image-build`)
    pub name: String,
    /// Shell command line run in the project directory
    pub command: String,
}

impl Step {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// Outcome of running a single step's command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub command: String,
    pub success: bool,
    /// Combined stdout/stderr, or the fault text when the command never ran
    pub output: String,
    /// `None` when the process could not be launched or was killed by a signal
    pub exit_code: Option<i32>,
}

impl StepResult {
    /// A step that failed before producing an exit status
    pub fn fault(command: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success: false,
            output: error.into(),
            exit_code: None,
        }
    }
}

/// Ordered list of steps making up one deployment pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

impl Pipeline {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Builds a pipeline from bare commands, naming each step after its position
    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = commands
            .into_iter()
            .enumerate()
            .map(|(idx, command)| Step::new(format!("step-{}", idx + 1), command))
            .collect();

        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for Pipeline {
    /// The local development deployment flow
    fn default() -> Self {
        Self::new(vec![
            Step::new("setup", "make setup"),
            Step::new("environment-deploy", "make dev-minikube-deploy"),
            Step::new("infra-provision", "make dev-terraform-deploy"),
            Step::new("registry-deploy", "make dev-harbor-deploy"),
            Step::new("image-build", "make dev-images-build"),
            Step::new("delivery-deploy", "make dev-argocd-push-and-deploy"),
            Step::new("gateway-start", "make dev-gateway-start"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_order() {
        let names: Vec<_> = Pipeline::default()
            .steps
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "setup",
                "environment-deploy",
                "infra-provision",
                "registry-deploy",
                "image-build",
                "delivery-deploy",
                "gateway-start",
            ]
        );
    }

    #[test]
    fn test_from_commands_names_steps() {
        let pipeline = Pipeline::from_commands(["true", "false"]);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.steps[0], Step::new("step-1", "true"));
        assert_eq!(pipeline.steps[1], Step::new("step-2", "false"));
    }

    #[test]
    fn test_fault_has_no_exit_code() {
        let result = StepResult::fault("make setup", "No such file or directory");
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert_eq!(result.output, "No such file or directory");
    }
}
