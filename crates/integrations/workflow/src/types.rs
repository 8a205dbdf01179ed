use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

pub const FIND_RECORDS_QUERY: &str = r"
query FindContactRecords($tableId: ID!, $fieldId: String!, $fieldValue: String!) {
  findRecords(tableId: $tableId, search: { fieldId: $fieldId, fieldValue: $fieldValue }) {
    edges { node { fields { field { id } value } } }
  }
}";

pub const UPDATE_CARD_FIELD_MUTATION: &str = r"
mutation UpdateCardField($cardId: ID!, $fieldId: ID!, $value: [UndefinedInput]) {
  updateCardField(input: { card_id: $cardId, field_id: $fieldId, new_value: $value }) {
    success
  }
}";

/// A GraphQL request body.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRecordsVariables<'a> {
    pub table_id: &'a str,
    pub field_id: &'a str,
    pub field_value: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardFieldVariables<'a> {
    pub card_id: &'a str,
    pub field_id: &'a str,
    pub value: &'a str,
}

/// A GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap the data, turning a GraphQL `errors` array into an error.
    pub fn into_data(self) -> Result<T, WorkflowError> {
        if !self.errors.is_empty() {
            return Err(WorkflowError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        self.data.ok_or(WorkflowError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindRecordsData {
    pub find_records: Option<RecordConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordConnection {
    #[serde(default)]
    pub edges: Vec<RecordEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RecordEdge {
    pub node: RecordNode,
}

#[derive(Debug, Deserialize)]
pub struct RecordNode {
    #[serde(default)]
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Deserialize)]
pub struct RecordField {
    pub field: FieldRef,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct FieldRef {
    pub id: String,
}

impl FindRecordsData {
    /// Every string value of `field_id` across all matched records, in order.
    pub fn values_of(&self, field_id: &str) -> Vec<String> {
        self.find_records
            .iter()
            .flat_map(|connection| &connection.edges)
            .flat_map(|edge| &edge.node.fields)
            .filter(|field| field.field.id == field_id)
            .filter_map(|field| field.value.as_str().map(str::to_owned))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardFieldData {
    pub update_card_field: Option<UpdateResult>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateResult {
    #[serde(default)]
    pub success: bool,
}
