use anyhow::Result;
use hiero_client::HieroClient;
use hiero_protocol::{Agent, AgentUpdate, ApiResponse, PaginationParams};
use tracing::info;

use crate::output::{print_response, read_json_file};
use crate::AgentAction;

pub async fn handle_agent_command(client: &HieroClient, action: AgentAction) -> Result<()> {
    match action {
        AgentAction::Create { file } => {
            let agent: Agent = read_json_file(&file).await?;
            info!("Creating agent '{}'", agent.name);
            print_response(client.create_agent(&agent).await)
        }
        AgentAction::Get { id } => print_response(client.get_agent(&id).await),
        AgentAction::Update { id, file } => {
            let update: AgentUpdate = read_json_file(&file).await?;
            print_response(client.update_agent(&id, &update).await)
        }
        AgentAction::Delete { id } => match client.delete_agent(&id).await {
            ApiResponse::Data(()) => {
                println!("Deleted agent {}", id);
                Ok(())
            }
            failed => print_response(failed),
        },
        AgentAction::List { page } => {
            let params: PaginationParams = page.into();
            print_response(client.list_my_agents(Some(&params)).await)
        }
        AgentAction::Generate { specification } => {
            print_response(client.generate_agent_config(&specification).await)
        }
        AgentAction::Infer {
            id,
            input,
            thread_id,
        } => print_response(client.infer_agent(&id, &input, &thread_id).await),
    }
}
