use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::hotel::{HotelPatch, HotelPut};
use crate::store::{HotelStore, StoreError};

#[derive(Deserialize)]
pub struct HotelQuery {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// `GET /hotels`: a single record when `id` or `title` is given,
/// otherwise one page of records.
pub async fn get_hotels(
    store: web::Data<HotelStore>,
    params: web::Query<HotelQuery>,
) -> Result<HttpResponse, StoreError> {
    if let Some(id) = params.id {
        return Ok(HttpResponse::Ok().json(store.get_by_id(id)?));
    }

    if let Some(title) = &params.title {
        return Ok(HttpResponse::Ok().json(store.get_by_title(title)?));
    }

    let page = params.page.unwrap_or(1);
    let per_page = params.per_page.unwrap_or(3);
    Ok(HttpResponse::Ok().json(store.list_page(page, per_page)))
}

/// `PUT /hotels/{id}`: full replace.
pub async fn replace_hotel(
    store: web::Data<HotelStore>,
    path: web::Path<i64>,
    body: web::Json<HotelPut>,
) -> Result<HttpResponse, StoreError> {
    let id = path.into_inner();
    let hotel = store.replace(id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(hotel))
}

/// `PATCH /hotels/{id}`: merge update of the supplied fields only.
pub async fn merge_hotel(
    store: web::Data<HotelStore>,
    path: web::Path<i64>,
    body: web::Json<HotelPatch>,
) -> Result<HttpResponse, StoreError> {
    let id = path.into_inner();
    let hotel = store.merge_update(id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(hotel))
}

const DEMO_DELAY: Duration = Duration::from_secs(2);

/// Blocking delay demo: `std::thread::sleep` holds the worker thread
/// for the full duration, starving every other request on it.
pub async fn sync_delay(path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    log::info!("sync delay {}: started", id);
    std::thread::sleep(DEMO_DELAY);
    log::info!("sync delay {}: finished", id);
    HttpResponse::Ok().json(serde_json::json!({ "id": id, "mode": "sync" }))
}

/// Non-blocking delay demo: the await point yields the worker back to
/// the runtime while the timer runs.
pub async fn async_delay(path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    log::info!("async delay {}: started", id);
    tokio::time::sleep(DEMO_DELAY).await;
    log::info!("async delay {}: finished", id);
    HttpResponse::Ok().json(serde_json::json!({ "id": id, "mode": "async" }))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::models::hotel::Hotel;

    macro_rules! service {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(HotelStore::seeded()))
                    .service(
                        web::scope("/hotels")
                            .route("", web::get().to(get_hotels))
                            .route("/{id}", web::put().to(replace_hotel))
                            .route("/{id}", web::patch().to(merge_hotel)),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn get_by_id_returns_record() {
        let app = service!();
        let req = test::TestRequest::get().uri("/hotels?id=1").to_request();
        let hotel: Hotel = test::call_and_read_body_json(&app, req).await;
        assert_eq!(hotel.id, 1);
        assert_eq!(hotel.title, "Old Hotel Title");
    }

    #[actix_web::test]
    async fn get_unknown_id_is_404() {
        let app = service!();
        let req = test::TestRequest::get().uri("/hotels?id=99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_by_title_ignores_case() {
        let app = service!();
        let req = test::TestRequest::get()
            .uri("/hotels?title=old%20hotel%20title")
            .to_request();
        let hotel: Hotel = test::call_and_read_body_json(&app, req).await;
        assert_eq!(hotel.id, 1);
    }

    #[actix_web::test]
    async fn get_without_filters_pages_with_defaults() {
        let app = service!();
        let req = test::TestRequest::get().uri("/hotels").to_request();
        let page: Vec<Hotel> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.iter().map(|h| h.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn get_last_page_is_clamped() {
        let app = service!();
        let req = test::TestRequest::get()
            .uri("/hotels?page=3&per_page=3")
            .to_request();
        let page: Vec<Hotel> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page.iter().map(|h| h.id).collect::<Vec<_>>(), vec![7, 8]);
    }

    #[actix_web::test]
    async fn put_replaces_record() {
        let app = service!();
        let req = test::TestRequest::put()
            .uri("/hotels/2")
            .set_json(json!({"title": "X", "name": "Y"}))
            .to_request();
        let hotel: Hotel = test::call_and_read_body_json(&app, req).await;
        assert_eq!(hotel.id, 2);
        assert_eq!(hotel.title, "X");
        assert_eq!(hotel.name, "Y");
    }

    #[actix_web::test]
    async fn put_unknown_id_is_404() {
        let app = service!();
        let req = test::TestRequest::put()
            .uri("/hotels/99")
            .set_json(json!({"title": "X", "name": "Y"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn patch_merges_supplied_fields_only() {
        let app = service!();
        let req = test::TestRequest::patch()
            .uri("/hotels/1")
            .set_json(json!({"title": "X"}))
            .to_request();
        let hotel: Hotel = test::call_and_read_body_json(&app, req).await;
        assert_eq!(hotel.title, "X");
        assert_eq!(hotel.name, "Old Hotel Name");
    }

    #[actix_web::test]
    async fn patch_with_empty_body_is_400() {
        let app = service!();
        let req = test::TestRequest::patch()
            .uri("/hotels/1")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "no fields provided for update");
    }
}
