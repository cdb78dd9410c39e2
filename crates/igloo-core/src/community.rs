//! Community and user group routes

use serde_json::Value;

use igloo_session::ApiVersion;

use crate::igloo::{Igloo, DICTIONARY, RESPONSE};
use crate::Result;

impl Igloo {
    /// Fetch a regular page (not an API route) with the session cookie.
    ///
    /// `fragment` is relative to the endpoint, e.g. `"wiki/home"`.
    pub fn web_page(&self, fragment: &str) -> Result<String> {
        Ok(self.client().get_text(fragment)?)
    }

    /// v1 `community/view`
    pub fn community_view(&self) -> Result<Value> {
        self.v1_get(&["community", "view"], &[], RESPONSE)
    }

    /// v2 `community/info`. The reply is returned whole.
    pub fn community_info(&self) -> Result<Value> {
        let url = self.url(ApiVersion::V2, &["community", "info"])?;
        self.post(url, &[])
    }

    /// Group ids for each of `user_ids`
    pub fn view_usergroups(&self, user_ids: &[&str]) -> Result<Value> {
        let query: Vec<(&str, String)> = user_ids
            .iter()
            .map(|id| ("userIds", id.to_string()))
            .collect();

        self.v1_post(&["apisync", "view_usergroups"], &query, DICTIONARY)
    }

    pub fn usergroup_view(&self, usergroup_id: &str) -> Result<Value> {
        self.v1_get(
            &["community", "usergroups", usergroup_id, "view"],
            &[],
            RESPONSE,
        )
    }
}
