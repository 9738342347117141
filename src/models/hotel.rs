use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hotel {
    pub id: i64,
    pub title: String,
    pub name: String,
}

/// Full-replace body: every mutable field is required.
#[derive(Debug, Deserialize)]
pub struct HotelPut {
    pub title: String,
    pub name: String,
}

/// Merge-update body: only the supplied fields change.
#[derive(Debug, Deserialize)]
pub struct HotelPatch {
    pub title: Option<String>,
    pub name: Option<String>,
}

impl HotelPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.name.is_none()
    }
}
