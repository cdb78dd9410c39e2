//! Label (category) and label group (category class) routes

use serde_json::Value;

use crate::igloo::{Igloo, RESPONSE};
use crate::Result;

impl Igloo {
    pub fn create_label_group(&self, name: &str) -> Result<Value> {
        self.v1_post(
            &["categories", "classes", "add"],
            &[("name", name.to_string())],
            RESPONSE,
        )
    }

    /// Delete a label group. With `keep_labels` its labels survive on
    /// their own.
    pub fn delete_label_group(&self, group_id: &str, keep_labels: bool) -> Result<Value> {
        self.v1_post(
            &["categories", "classes", group_id, "delete"],
            &[("keepCategories", keep_labels.to_string())],
            RESPONSE,
        )
    }

    /// Create a label, inside `group` when given.
    pub fn create_label(&self, name: &str, group: Option<&str>) -> Result<Value> {
        let mut query = vec![("name", name.to_string())];
        if let Some(group) = group {
            query.push(("categoryClassId", group.to_string()));
        }

        self.v1_post(&["categories", "add"], &query, RESPONSE)
    }

    pub fn delete_label(&self, label_id: &str) -> Result<Value> {
        self.v1_post(&["categories", label_id, "delete"], &[], RESPONSE)
    }

    pub fn labels_in_group(&self, group_id: &str) -> Result<Value> {
        self.v1_get(
            &["categories", "classes", group_id, "viewCategories"],
            &[],
            RESPONSE,
        )
    }

    pub fn add_label_to_object(&self, object_id: &str, label_id: &str) -> Result<Value> {
        self.v1_post(
            &["objects", object_id, "add_categories"],
            &[("categories", label_id.to_string())],
            RESPONSE,
        )
    }

    pub fn remove_label_from_object(&self, object_id: &str, label_id: &str) -> Result<Value> {
        self.v1_post(
            &["objects", object_id, "remove_categories"],
            &[("categories", label_id.to_string())],
            RESPONSE,
        )
    }
}
