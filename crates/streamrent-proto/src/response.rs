//! Execution responses reported by the wallet provider.
//!
//! Field names follow the ledger's JSON-RPC transaction block response
//! (`digest`, `objectChanges`, `effects.status`). Object ids inside the change
//! list are kept as raw strings: whether a reported id is usable is decided by
//! the reconciler, not by the decoder.

use serde::{Deserialize, Serialize};

use crate::{errors::ResponseError, ids::TransactionDigest};

/// Kind of change a transaction made to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectChangeKind {
    /// New object.
    Created,
    /// Existing object modified.
    Mutated,
    /// Object removed.
    Deleted,
    /// Object wrapped into another object.
    Wrapped,
    /// Object moved to a new owner.
    Transferred,
    /// Package published.
    Published,
    /// Any kind this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One entry of the resource change list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    /// What happened to the object.
    #[serde(rename = "type")]
    pub kind: ObjectChangeKind,
    /// Affected object, absent for package publications.
    #[serde(default)]
    pub object_id: Option<String>,
}

impl ObjectChange {
    /// Change entry for a newly created object.
    pub fn created(object_id: impl Into<String>) -> Self {
        Self { kind: ObjectChangeKind::Created, object_id: Some(object_id.into()) }
    }
}

/// On-chain execution status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionStatus {
    /// Transaction applied.
    Success,
    /// Transaction aborted; effects were rolled back.
    Failure {
        /// Abort reason reported by the ledger.
        #[serde(default)]
        error: String,
    },
}

/// Transaction effects (only the parts the front-end reads).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    /// Execution status.
    pub status: ExecutionStatus,
}

/// Successful submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    /// Digest of the executed transaction.
    pub digest: TransactionDigest,
    /// Objects created, mutated or deleted, when requested.
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
    /// Execution effects, when requested.
    #[serde(default)]
    pub effects: Option<Effects>,
}

impl ExecutionResponse {
    /// Response carrying only a digest.
    pub fn new(digest: TransactionDigest) -> Self {
        Self { digest, object_changes: None, effects: None }
    }

    /// Attach a change list.
    #[must_use]
    pub fn with_object_changes(mut self, changes: Vec<ObjectChange>) -> Self {
        self.object_changes = Some(changes);
        self
    }

    /// Abort reason if the effects report a failed execution.
    pub fn failure(&self) -> Option<&str> {
        match self.effects.as_ref().map(|effects| &effects.status) {
            Some(ExecutionStatus::Failure { error }) => Some(error),
            _ => None,
        }
    }

    /// Decode the JSON object starting on the first line that opens with
    /// `{`.
    ///
    /// CLI tools may print warnings before the JSON body and a trailing
    /// newline after it; both are skipped, even when a warning itself
    /// contains braces.
    pub fn from_json_output(output: &str) -> Result<Self, ResponseError> {
        let start = json_start(output).ok_or(ResponseError::MissingJson)?;
        let mut stream = serde_json::Deserializer::from_str(&output[start..]).into_iter::<Self>();
        match stream.next() {
            Some(result) => Ok(result?),
            None => Err(ResponseError::MissingJson),
        }
    }
}

/// Byte offset of the `{` opening the first line that starts with one.
fn json_start(output: &str) -> Option<usize> {
    let mut offset = 0;
    for line in output.split_inclusive('\n') {
        let body = line.trim_start();
        if body.starts_with('{') {
            return Some(offset + line.len() - body.len());
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_RESPONSE: &str = r#"{
        "digest": "9XkqHx3dnQfJ5Yp",
        "effects": { "status": { "status": "success" } },
        "objectChanges": [
            { "type": "mutated", "objectId": "0x11", "version": "3" },
            { "type": "created", "objectId": "0xabc", "objectType": "0x75::rental::Device" },
            { "type": "published", "packageId": "0x99" }
        ]
    }"#;

    #[test]
    fn decodes_change_list() {
        let response = ExecutionResponse::from_json_output(CREATE_RESPONSE).unwrap();

        assert_eq!(response.digest.as_str(), "9XkqHx3dnQfJ5Yp");
        let changes = response.object_changes.unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[1], ObjectChange::created("0xabc"));
        assert_eq!(changes[2].kind, ObjectChangeKind::Published);
        assert_eq!(changes[2].object_id, None);
    }

    #[test]
    fn skips_leading_warnings() {
        let output = format!("[warning] Client/Server api version mismatch\n{CREATE_RESPONSE}\n");
        assert!(ExecutionResponse::from_json_output(&output).is_ok());
    }

    #[test]
    fn braces_in_warnings_are_skipped() {
        let output = format!("[warning] unknown field {{gasPrice}} in config\n{CREATE_RESPONSE}");
        let response = ExecutionResponse::from_json_output(&output).unwrap();
        assert_eq!(response.digest.as_str(), "9XkqHx3dnQfJ5Yp");
    }

    #[test]
    fn unknown_change_kinds_are_tolerated() {
        let response = ExecutionResponse::from_json_output(
            r#"{"digest":"D1","objectChanges":[{"type":"frozen","objectId":"0x1"}]}"#,
        )
        .unwrap();
        assert_eq!(response.object_changes.unwrap()[0].kind, ObjectChangeKind::Unknown);
    }

    #[test]
    fn reports_failed_effects() {
        let response = ExecutionResponse::from_json_output(
            r#"{"digest":"D2","effects":{"status":{"status":"failure","error":"MoveAbort(2)"}}}"#,
        )
        .unwrap();
        assert_eq!(response.failure(), Some("MoveAbort(2)"));
    }

    #[test]
    fn output_without_json_is_rejected() {
        assert!(matches!(
            ExecutionResponse::from_json_output("error: no active address"),
            Err(ResponseError::MissingJson)
        ));
        assert!(matches!(
            ExecutionResponse::from_json_output("{\"nodigest\": true}"),
            Err(ResponseError::Json(_))
        ));
    }
}
