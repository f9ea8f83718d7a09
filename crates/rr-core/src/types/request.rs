use crate::types::enums::{HelperType, RequestStatus};
use crate::types::ids::RequestId;
use serde::{Deserialize, Serialize};

/// One roadside-assistance case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelpRequest {
    pub id: RequestId,
    pub driver_name: String,
    pub vehicle: String,
    pub issue: String,
    pub location: String,
    /// Miles from the helper.
    pub distance: f64,
    /// Display string, e.g. "5 mins ago".
    pub timestamp: String,
    pub helper_type: HelperType,
    pub status: RequestStatus,
}
