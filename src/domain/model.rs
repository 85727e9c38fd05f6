use serde::{Deserialize, Serialize};

/// Lifecycle phase reported by the custom-resource framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    pub fn is_create(&self) -> bool {
        matches!(self, RequestType::Create)
    }
}

/// Raw resource properties as they arrive in the lifecycle event. List-typed
/// parameters are comma-separated strings on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    pub aws_account_id: String,
    pub project: String,
    pub environments: String,
    pub stacks: String,
    pub initial_environments: String,
    pub initial_stacks: String,
    pub approver_email: String,
}

/// The subset of the custom-resource event this hook cares about. Extra
/// fields (ResponseURL, StackId, RequestId, ...) are ignored on purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestType,
    #[serde(default)]
    pub resource_properties: Option<ResourceProperties>,
}

/// Parsed project parameters, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectParams {
    pub aws_account_id: String,
    pub project: String,
    pub environments: Vec<String>,
    pub stacks: Vec<String>,
    pub initial_environments: Vec<String>,
    pub initial_stacks: Vec<String>,
    pub approver_email: String,
}

impl ProjectParams {
    pub fn from_properties(props: &ResourceProperties) -> Self {
        Self {
            aws_account_id: props.aws_account_id.trim().to_string(),
            project: props.project.trim().to_string(),
            environments: split_list(&props.environments),
            stacks: split_list(&props.stacks),
            initial_environments: split_list(&props.initial_environments),
            initial_stacks: split_list(&props.initial_stacks),
            approver_email: props.approver_email.trim().to_string(),
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Credential handed out by the secret store. Redacted in debug output so it
/// never leaks into logs.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn reveal(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
