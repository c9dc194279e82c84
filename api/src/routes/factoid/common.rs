use db::models::factoid::Model as FactoidModel;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `PUT /api/factoid/{name}`.
#[derive(Debug, Deserialize, Validate)]
pub struct FactoidRequest {
    #[validate(length(min = 1, message = "Factoid content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FactoidResponse {
    pub id: i64,
    pub name: String,
    pub content: String,
    pub updated_at: String,
}

impl From<FactoidModel> for FactoidResponse {
    fn from(f: FactoidModel) -> Self {
        Self {
            id: f.id,
            name: f.name,
            content: f.content,
            updated_at: f.updated_at.to_rfc3339(),
        }
    }
}
