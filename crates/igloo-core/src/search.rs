//! Content search (v2)

use serde_json::Value;
use url::Url;

use igloo_session::{unwrap_field, ApiVersion};

use crate::igloo::{Igloo, RESPONSE};
use crate::Result;

impl Igloo {
    /// Full-text search over documents. The query is sent as a quoted
    /// phrase.
    pub fn search(&self, offset: u32, limit: u32, query: &str) -> Result<Value> {
        let params = [
            ("query", format!("\"{query}\"")),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
            ("applications", "Document".to_string()),
        ];

        let body = self.get(self.search_url()?, &params)?;
        Ok(unwrap_field(body, RESPONSE)?)
    }

    /// Objects carrying the label named `label`
    pub fn search_by_label(&self, label: &str) -> Result<Value> {
        let params = [
            ("query", label.to_string()),
            ("objectSearchType", "Labels".to_string()),
        ];

        let body = self.get(self.search_url()?, &params)?;
        Ok(unwrap_field(body, RESPONSE)?)
    }

    fn search_url(&self) -> Result<Url> {
        self.url(
            ApiVersion::V2,
            &["communities", self.community_key(), "search", "content"],
        )
    }
}
