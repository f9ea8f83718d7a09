use crate::error::RequestError;
use crate::types::{CreateHelpRequestInput, HelpRequest, RequestFilter, RequestId, RequestStatus};

pub trait RequestRepository {
    fn create(&self, input: CreateHelpRequestInput) -> Result<HelpRequest, RequestError>;
    fn get(&self, id: &RequestId) -> Result<Option<HelpRequest>, RequestError>;
    /// Insertion order.
    fn list(&self, filter: &RequestFilter) -> Result<Vec<HelpRequest>, RequestError>;
    /// Writes `status` only. Transition rules are enforced by the caller.
    fn set_status(&self, id: &RequestId, status: RequestStatus)
    -> Result<HelpRequest, RequestError>;
}
