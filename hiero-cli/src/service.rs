use anyhow::Result;
use hiero_client::HieroClient;
use hiero_protocol::{Authorization, Service, ServiceSearchParams, ServiceUpdate};
use tracing::info;

use crate::output::{print_response, read_json_file};
use crate::ServiceAction;

pub async fn handle_service_command(client: &HieroClient, action: ServiceAction) -> Result<()> {
    match action {
        ServiceAction::Create { file } => {
            let service: Service = read_json_file(&file).await?;
            info!("Creating service '{}'", service.name);
            print_response(client.create_service(&service).await)
        }
        ServiceAction::Get { id } => print_response(client.get_service(&id).await),
        ServiceAction::Update { id, file } => {
            let update: ServiceUpdate = read_json_file(&file).await?;
            print_response(client.update_service(&id, &update).await)
        }
        ServiceAction::Search { q, max_price, page } => {
            let params = ServiceSearchParams {
                pagination: page.into(),
                q,
                max_price,
            };
            print_response(client.search_services(Some(&params)).await)
        }
        ServiceAction::Authorize { id, signature } => {
            let authorization = Authorization {
                service_id: id.clone(),
                signature,
            };
            print_response(client.authorize_service(&id, &authorization).await)
        }
    }
}
