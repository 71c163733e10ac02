//! The common profile shape every strategy produces.

use serde::{Deserialize, Serialize};

/// Structured name of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileName {
    pub family_name: String,
    pub given_name: String,
}

impl ProfileName {
    pub fn new(family_name: impl Into<String>, given_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            given_name: given_name.into(),
        }
    }
}

/// Provider-independent user profile.
///
/// `raw` keeps the body exactly as received and `json` its parsed form, so
/// callers can reach provider fields the normalized shape does not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
    pub provider: String,
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub name: ProfileName,
    #[serde(rename = "_raw")]
    pub raw: String,
    #[serde(rename = "_json")]
    pub json: serde_json::Value,
}
