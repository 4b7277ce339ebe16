use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{trim_optional, EntityKind};
use crate::services::schema::{FieldSpec, Schema};

/// A prospective contact captured from the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Lead {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 32, message = "must be between 5 and 32 characters"))]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    pub source: Option<String>,
}

impl Schema for Lead {
    const ENTITY: EntityKind = EntityKind::Lead;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name"),
        FieldSpec::required("email"),
        FieldSpec::optional("phone"),
        FieldSpec::optional("message"),
        FieldSpec::optional("source"),
    ];

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        trim_optional(&mut self.phone);
        trim_optional(&mut self.message);
        trim_optional(&mut self.source);
    }
}
