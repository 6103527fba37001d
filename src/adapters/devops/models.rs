//! Azure DevOps work item API models
//!
//! The create endpoint takes a JSON Patch document: an ordered array of
//! `{op, path, value}` entries, one per field plus one per relation. Responses are
//! decoded loosely (every field optional) and checked explicitly, since a success
//! status does not guarantee a usable body.

use crate::domain::{DevOpsError, WorkItemId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content type required by the work item create endpoint
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// Field reference paths used in patch documents
pub mod fields {
    pub const TITLE: &str = "/fields/System.Title";
    pub const DESCRIPTION: &str = "/fields/System.Description";
    pub const ASSIGNED_TO: &str = "/fields/System.AssignedTo";
    pub const PRIORITY: &str = "/fields/Microsoft.VSTS.Common.Priority";
    pub const STATE: &str = "/fields/System.State";
    pub const TAGS: &str = "/fields/System.Tags";
    pub const AREA_PATH: &str = "/fields/System.AreaPath";
    pub const ITERATION_PATH: &str = "/fields/System.IterationPath";
    /// Appends to the relations collection
    pub const RELATIONS: &str = "/relations/-";
}

/// Link type pointing from a child to its parent
pub const HIERARCHY_REVERSE: &str = "System.LinkTypes.Hierarchy-Reverse";

/// JSON Patch operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// Value carried by a patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
    Text(String),
    Number(i64),
    Relation(WorkItemRelation),
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        PatchValue::Text(value.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        PatchValue::Text(value)
    }
}

impl From<i32> for PatchValue {
    fn from(value: i32) -> Self {
        PatchValue::Number(i64::from(value))
    }
}

/// A relation entry (`{rel, url, attributes}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRelation {
    /// Link type reference name
    pub rel: String,

    /// API URL of the target work item
    pub url: String,

    /// Link attributes
    pub attributes: RelationAttributes,
}

/// Attributes attached to a relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationAttributes {
    /// Comment shown on the link
    pub comment: String,
}

/// One entry of a JSON Patch document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub value: PatchValue,
}

impl PatchOperation {
    /// Creates an `add` operation for a field path
    pub fn add(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self {
            op: PatchOp::Add,
            path: path.into(),
            value: value.into(),
        }
    }

    /// Creates an `add` operation appending a relation
    pub fn add_relation(relation: WorkItemRelation) -> Self {
        Self {
            op: PatchOp::Add,
            path: fields::RELATIONS.to_string(),
            value: PatchValue::Relation(relation),
        }
    }

    /// Text value of the operation, if it carries one
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            PatchValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Relation carried by the operation, if any
    pub fn relation(&self) -> Option<&WorkItemRelation> {
        match &self.value {
            PatchValue::Relation(r) => Some(r),
            _ => None,
        }
    }
}

/// Body returned by a successful create call
///
/// Only `id` is read; the rest of the work item is ignored.
#[derive(Debug, Deserialize)]
pub struct CreatedWorkItem {
    #[serde(default)]
    pub id: Option<Value>,
}

impl CreatedWorkItem {
    /// Extracts the work item id
    ///
    /// # Errors
    ///
    /// [`DevOpsError::MissingId`] when the field is absent or null,
    /// [`DevOpsError::InvalidId`] when it is not a positive integer.
    pub fn work_item_id(&self) -> Result<WorkItemId, DevOpsError> {
        let value = match &self.id {
            None | Some(Value::Null) => return Err(DevOpsError::MissingId),
            Some(v) => v,
        };

        let raw = match value {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f > 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            }),
            _ => None,
        };

        raw.and_then(|id| WorkItemId::new(id).ok())
            .ok_or_else(|| DevOpsError::InvalidId(value.to_string()))
    }
}

/// Body returned by the service on failure
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ErrorBody {
    /// The `message` field when it is a string
    pub fn message(&self) -> Option<String> {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
