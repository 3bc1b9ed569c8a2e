use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Field names follow the backing-file JSON; `isDeleted` is the only one
// that differs from its Rust spelling.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub dob: String,
    pub country: String,
    pub avatar: String,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
}

impl Employee {
    pub fn new(
        fname: String,
        lname: String,
        email: String,
        dob: String,
        country: String,
        avatar: String,
    ) -> Self {
        Employee {
            id: Uuid::new_v4().to_string(),
            fname,
            lname,
            email,
            dob,
            country,
            avatar,
            is_deleted: false,
        }
    }
}

// Editable fields applied by the update handler. `avatar` is `None` when no
// new file was uploaded, in which case the stored path is kept.
#[derive(Debug)]
pub struct EmployeeChanges {
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub dob: String,
    pub country: String,
    pub avatar: Option<String>,
}
