use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductCatalog;

/// Looks products up on the product service with `GET {base_url}/products/{id}`.
///
/// `200` confirms the product, `404` rejects it. Any other status, a
/// transport error, or a timeout is reported as the service being
/// unavailable. Requests are made once, without retries.
#[derive(Clone)]
pub struct HttpProductCatalog {
    client: Client,
    base_url: String,
}

impl HttpProductCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, product_id: i32) -> String {
        format!("{}/products/{}", self.base_url, product_id)
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn ensure_exists(&self, product_id: i32) -> Result<(), DomainError> {
        let url = self.product_url(product_id);
        log::debug!("Checking product {} at {}", product_id, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::warn!("Product service request to {} failed: {}", url, e);
            DomainError::ProductServiceUnavailable(e.to_string())
        })?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(DomainError::ProductNotFound(product_id)),
            status => {
                log::warn!("Product service answered {} for {}", status, url);
                Err(DomainError::ProductServiceUnavailable(format!(
                    "unexpected status {status}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use actix_web::{web, App, HttpResponse, HttpServer};

    use super::*;

    async fn product(path: web::Path<i32>) -> HttpResponse {
        match path.into_inner() {
            1 => HttpResponse::Ok().json(serde_json::json!({ "product_id": 1, "name": "Widget" })),
            13 => HttpResponse::InternalServerError().finish(),
            _ => HttpResponse::NotFound()
                .json(serde_json::json!({ "detail": "Product not found" })),
        }
    }

    /// Serves a tiny product service on an ephemeral port and returns its base URL.
    fn spawn_product_service() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
        let port = listener.local_addr().expect("addr failed").port();
        let server = HttpServer::new(|| App::new().route("/products/{id}", web::get().to(product)))
            .workers(1)
            .listen(listener)
            .expect("listen failed")
            .run();
        actix_web::rt::spawn(server);
        format!("http://127.0.0.1:{port}/")
    }

    #[actix_web::test]
    async fn existing_product_is_confirmed() {
        let catalog = HttpProductCatalog::new(&spawn_product_service(), Duration::from_secs(5))
            .expect("client");

        catalog.ensure_exists(1).await.expect("product 1 exists");
    }

    #[actix_web::test]
    async fn missing_product_is_not_found() {
        let catalog = HttpProductCatalog::new(&spawn_product_service(), Duration::from_secs(5))
            .expect("client");

        let err = catalog.ensure_exists(2).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(2)));
    }

    #[actix_web::test]
    async fn server_error_is_unavailable() {
        let catalog = HttpProductCatalog::new(&spawn_product_service(), Duration::from_secs(5))
            .expect("client");

        let err = catalog.ensure_exists(13).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductServiceUnavailable(_)));
    }

    #[actix_web::test]
    async fn unreachable_service_is_unavailable() {
        // Bind then drop so nothing is listening on the port.
        let port = TcpListener::bind("127.0.0.1:0")
            .expect("bind failed")
            .local_addr()
            .expect("addr failed")
            .port();
        let catalog = HttpProductCatalog::new(
            &format!("http://127.0.0.1:{port}"),
            Duration::from_secs(2),
        )
        .expect("client");

        let err = catalog.ensure_exists(1).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductServiceUnavailable(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let catalog =
            HttpProductCatalog::new("http://products.internal/", Duration::from_secs(1))
                .expect("client");
        assert_eq!(
            catalog.product_url(7),
            "http://products.internal/products/7"
        );
    }
}
