use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every boolean toggle endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

pub(crate) fn default_active() -> bool {
    true
}
