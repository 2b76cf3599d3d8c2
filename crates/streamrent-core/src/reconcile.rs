//! Provider result to operation status.

use streamrent_proto::{ExecutionResponse, ObjectChangeKind, ObjectId};
use tracing::{error, info};

use crate::{builder::Operation, error::ProviderError, status::OperationStatus};

/// Banner text for a successful rent.
pub const RENT_SUCCESS: &str = "✅ Rent successful! (Billing started)";
/// Banner text for a successful return.
pub const RETURN_SUCCESS: &str = "✅ Return successful! (Deposit refunded)";
/// Banner text for a create whose new device id could not be identified.
pub const CREATE_SUCCESS_WITHOUT_ID: &str = "✅ Device created! Copy the device ID from the explorer.";

/// Normalize a submission result into a terminal status.
///
/// A response whose effects report an on-chain abort is treated as a
/// failure, the same as a provider error.
pub fn reconcile(
    operation: &Operation,
    result: &Result<ExecutionResponse, ProviderError>,
) -> OperationStatus {
    let response = match result {
        Ok(response) => response,
        Err(err) => return OperationStatus::error(format!("Error: {err}")),
    };

    if let Some(abort) = response.failure() {
        return OperationStatus::error(format!("Error: {abort}"));
    }

    let digest = response.digest.clone();
    match operation {
        Operation::CreateDevice(draft) => match created_object(response) {
            Some(id) => {
                info!(device_id = %id, digest = %digest, "new device created");
                OperationStatus::success(
                    format!("✅ Device \"{}\" created successfully!", draft.name),
                    digest,
                    Some(id),
                )
            },
            None => {
                error!(
                    digest = %digest,
                    "create succeeded but the new device id was not found in the change list"
                );
                OperationStatus::success(CREATE_SUCCESS_WITHOUT_ID, digest, None)
            },
        },
        Operation::RentDevice { .. } => OperationStatus::success(RENT_SUCCESS, digest, None),
        Operation::ReturnDevice { .. } => OperationStatus::success(RETURN_SUCCESS, digest, None),
    }
}

/// First `created` entry of the change list, if its id is well formed.
///
/// Only the first created entry is considered; a malformed id there is not
/// papered over by a later entry.
fn created_object(response: &ExecutionResponse) -> Option<ObjectId> {
    let changes = response.object_changes.as_deref()?;
    let change = changes.iter().find(|change| change.kind == ObjectChangeKind::Created)?;
    change.object_id.as_deref()?.parse().ok()
}
