use serde::Serialize;

use crate::api::links::Links;

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub agent_bootstrap: &'static str,
    #[serde(rename = "_links")]
    pub links: Links,
}
