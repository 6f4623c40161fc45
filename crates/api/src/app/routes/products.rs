use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use catalog_core::DomainError;
use catalog_infra::{ListQuery, RepositoryError};
use catalog_products::{NewProduct, ProductPatch, ProductView};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };

    match services.with_products(move |p| p.list(&query)).await {
        Ok(Ok(products)) => {
            (StatusCode::OK, Json(dto::ProductListResponse::new(&products))).into_response()
        }
        Ok(Err(e)) => errors::repository_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.with_products(move |p| p.get(id)).await {
        Ok(Ok(p)) => (StatusCode::OK, Json(ProductView::from(&p))).into_response(),
        Ok(Err(e)) => errors::repository_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.with_products(move |p| p.create(body)).await {
        Ok(Ok(p)) => (StatusCode::CREATED, Json(ProductView::from(&p))).into_response(),
        Ok(Err(e)) => errors::repository_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<ProductPatch>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(patch) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.with_products(move |p| p.update(id, patch)).await {
        Ok(Ok(p)) => (StatusCode::OK, Json(ProductView::from(&p))).into_response(),
        Ok(Err(e)) => errors::repository_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.with_products(move |p| p.delete(id)).await {
        Ok(Ok(p)) => (
            StatusCode::OK,
            Json(dto::DeleteProductResponse {
                message: "product deleted",
                data: ProductView::from(&p),
            }),
        )
            .into_response(),
        // Deleting an unknown id is reported as a bad request, not a 404.
        Ok(Err(RepositoryError::Domain(DomainError::NotFound(msg)))) => {
            errors::json_error(StatusCode::BAD_REQUEST, "not_found", msg)
        }
        Ok(Err(e)) => errors::repository_error_to_response(e),
        Err(e) => errors::join_error_to_response(e),
    }
}
