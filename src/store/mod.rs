use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use parking_lot::Mutex;
use thiserror::Error;

use crate::models::hotel::{Hotel, HotelPatch, HotelPut};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no hotel with id {0}")]
    IdNotFound(i64),
    #[error("no hotel titled {0:?}")]
    TitleNotFound(String),
    #[error("no fields provided for update")]
    EmptyUpdate,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::IdNotFound(_) | StoreError::TitleNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::EmptyUpdate => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// In-memory hotel database. Every operation takes the one lock, so
/// read-modify-write in `replace`/`merge_update` is a single critical
/// section even under actix's multi-worker runtime.
pub struct HotelStore {
    hotels: Mutex<BTreeMap<i64, Hotel>>,
}

impl HotelStore {
    pub fn new() -> Self {
        Self {
            hotels: Mutex::new(BTreeMap::new()),
        }
    }

    /// Store preloaded with the fixed demo data set.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut hotels = store.hotels.lock();
            for (id, title, name) in [
                (1, "Old Hotel Title", "Old Hotel Name"),
                (2, "Another Hotel Title", "Another Hotel Name"),
                (3, "Yet Another Hotel Title", "Yet Another Hotel Name"),
                (4, "Poor Imagination Hotel Title", "Poor Imagination Hotel Title"),
                (5, "Hotel Title 1", "Hotel Title 1"),
                (6, "Hotel Title 2", "Hotel Title 2"),
                (7, "Hotel Title 3", "Hotel Title 3"),
                (8, "Hotel Title 4", "Hotel Title 4"),
            ] {
                hotels.insert(
                    id,
                    Hotel {
                        id,
                        title: title.to_string(),
                        name: name.to_string(),
                    },
                );
            }
        }
        store
    }

    pub fn get_by_id(&self, id: i64) -> Result<Hotel, StoreError> {
        self.hotels
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::IdNotFound(id))
    }

    /// Case-insensitive exact title match, first hit in ascending-id order.
    pub fn get_by_title(&self, title: &str) -> Result<Hotel, StoreError> {
        let wanted = title.to_lowercase();
        self.hotels
            .lock()
            .values()
            .find(|hotel| hotel.title.to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| StoreError::TitleNotFound(title.to_string()))
    }

    /// One page of records in ascending-id order. The window end clamps
    /// to the total record count; an out-of-range or degenerate window
    /// (`page` or `per_page` below 1) is an empty page, not an error.
    pub fn list_page(&self, page: i64, per_page: i64) -> Vec<Hotel> {
        if page < 1 || per_page < 1 {
            return Vec::new();
        }
        let start = usize::try_from((page - 1).saturating_mul(per_page)).unwrap_or(usize::MAX);
        self.hotels
            .lock()
            .values()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect()
    }

    /// Overwrites every mutable field of an existing record. The id is
    /// the map key and never changes.
    pub fn replace(&self, id: i64, fields: HotelPut) -> Result<Hotel, StoreError> {
        let mut hotels = self.hotels.lock();
        let hotel = hotels.get_mut(&id).ok_or(StoreError::IdNotFound(id))?;
        hotel.title = fields.title;
        hotel.name = fields.name;
        Ok(hotel.clone())
    }

    /// Applies only the fields present in the patch. Unknown id reports
    /// NotFound before the empty-patch check.
    pub fn merge_update(&self, id: i64, patch: HotelPatch) -> Result<Hotel, StoreError> {
        let mut hotels = self.hotels.lock();
        let hotel = hotels.get_mut(&id).ok_or(StoreError::IdNotFound(id))?;
        if patch.is_empty() {
            return Err(StoreError::EmptyUpdate);
        }
        if let Some(title) = patch.title {
            hotel.title = title;
        }
        if let Some(name) = patch.name {
            hotel.name = name;
        }
        Ok(hotel.clone())
    }
}
