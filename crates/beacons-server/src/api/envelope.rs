//! JSON:API-style response envelope: `{ "data": { "id", "type", "attributes" } }`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Wrapper<T> {
    pub data: Resource<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Resource<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub attributes: T,
}

impl<T> Wrapper<T> {
    pub fn new(id: Uuid, kind: &str, attributes: T) -> Self {
        Self {
            data: Resource {
                id: Some(id),
                kind: kind.to_string(),
                attributes,
            },
        }
    }

    pub fn into_attributes(self) -> T {
        self.data.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_envelope_needs_only_attributes() {
        let body = json!({ "data": { "attributes": { "name": "x" } } });
        let wrapper: Wrapper<serde_json::Value> = serde_json::from_value(body).unwrap();
        assert!(wrapper.data.id.is_none());
        assert_eq!(wrapper.into_attributes()["name"], "x");
    }

    #[test]
    fn response_envelope_shape() {
        let id = Uuid::new_v4();
        let value = serde_json::to_value(Wrapper::new(id, "accountHolder", json!({}))).unwrap();
        assert_eq!(value["data"]["id"], id.to_string());
        assert_eq!(value["data"]["type"], "accountHolder");
        assert!(value["data"]["attributes"].is_object());
    }
}
