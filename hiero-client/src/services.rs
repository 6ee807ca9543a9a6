use hiero_protocol::{
    ApiResponse, AuthToken, Authorization, Service, ServiceList, ServiceSearchParams,
    ServiceUpdate,
};
use reqwest::Method;

use crate::client::{with_query, HieroClient};

const SERVICES_PATH: &str = "/api/v1/services";

impl HieroClient {
    pub async fn create_service(&self, service: &Service) -> ApiResponse<Service> {
        self.request(Method::POST, SERVICES_PATH, Some(service))
            .await
    }

    pub async fn get_service(&self, service_id: &str) -> ApiResponse<Service> {
        self.request_without_body(Method::GET, &service_path(service_id))
            .await
    }

    pub async fn update_service(
        &self,
        service_id: &str,
        update: &ServiceUpdate,
    ) -> ApiResponse<Service> {
        self.request(Method::PUT, &service_path(service_id), Some(update))
            .await
    }

    pub async fn search_services(
        &self,
        params: Option<&ServiceSearchParams>,
    ) -> ApiResponse<ServiceList> {
        let path = with_query(SERVICES_PATH, params);
        self.request_without_body(Method::GET, &path).await
    }

    /// Exchange a caller-built authorization for a service access token.
    pub async fn authorize_service(
        &self,
        service_id: &str,
        authorization: &Authorization,
    ) -> ApiResponse<AuthToken> {
        self.request(
            Method::POST,
            &format!("{}/authorize", service_path(service_id)),
            Some(authorization),
        )
        .await
    }
}

fn service_path(service_id: &str) -> String {
    format!("{}/{}", SERVICES_PATH, service_id)
}
