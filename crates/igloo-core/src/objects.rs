//! Object routes

use serde_json::Value;

use crate::igloo::{Igloo, RESPONSE};
use crate::Result;

impl Igloo {
    /// Resolve a URL fragment to the object behind it.
    ///
    /// `domain` is only sent when given.
    pub fn objects_by_path(&self, path: &str, domain: Option<&str>) -> Result<Value> {
        let mut query = vec![("path", path.to_string())];
        if let Some(domain) = domain {
            query.push(("domain", domain.to_string()));
        }

        self.v1_get(&["objects", "byPath"], &query, RESPONSE)
    }

    pub fn folder_children(&self, folder_id: &str) -> Result<Value> {
        self.v1_get(&["folders", folder_id, "children", "view"], &[], RESPONSE)
    }

    /// Move an object under `destination`. The destination channel must be
    /// of the same type as the object.
    pub fn move_object(&self, object_id: &str, destination: &str) -> Result<Value> {
        let query = [
            ("destination", destination.to_string()),
            ("parentId", destination.to_string()),
        ];

        tracing::info!(object_id = %object_id, destination = %destination, "Moving object");
        self.v1_post(&["objects", object_id, "move"], &query, RESPONSE)
    }
}
