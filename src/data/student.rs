use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
}

///the content fields of a student, used both to add and to replace
///
///anything missing from the request stays `None` - nothing is validated
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roll_no: Option<String>,
}

impl StudentRecord {
    pub fn from_fields(id: Uuid, fields: StudentFields) -> Self {
        let StudentFields {
            name,
            email,
            roll_no,
        } = fields;

        Self {
            id,
            name,
            email,
            roll_no,
        }
    }

    pub fn name_or_blank(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn email_or_blank(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn roll_no_or_blank(&self) -> &str {
        self.roll_no.as_deref().unwrap_or_default()
    }
}
