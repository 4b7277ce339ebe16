use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{trim_optional, EntityKind};
use crate::services::schema::{FieldSpec, Schema};

/// A visitor asking the team to get in touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ConnectionRequest {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 120, message = "must be at most 120 characters"))]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 120, message = "must be at most 120 characters"))]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub message: Option<String>,
}

impl Schema for ConnectionRequest {
    const ENTITY: EntityKind = EntityKind::ConnectionRequest;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name"),
        FieldSpec::required("email"),
        FieldSpec::optional("company"),
        FieldSpec::optional("topic"),
        FieldSpec::optional("message"),
    ];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        trim_optional(&mut self.company);
        trim_optional(&mut self.topic);
        trim_optional(&mut self.message);
    }
}
