use courier_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the workflow GraphQL client.
///
/// These are converted into [`ProviderError`] at the public API boundary.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The response body was not valid GraphQL JSON.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response carried a GraphQL `errors` array.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response had neither data nor errors.
    #[error("response carried no data")]
    MissingData,

    /// The mutation ran but reported `success: false`.
    #[error("mutation reported failure")]
    Unsuccessful,
}

impl From<WorkflowError> for ProviderError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Malformed(msg) => ProviderError::Serialization(msg),
            WorkflowError::MissingData => ProviderError::InvalidResponse(err.to_string()),
            WorkflowError::GraphQl(_) | WorkflowError::Unsuccessful => {
                ProviderError::Rejected(err.to_string())
            }
        }
    }
}
