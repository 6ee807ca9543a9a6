use hiero_protocol::{
    Agent, AgentInferenceResponse, AgentList, AgentUpdate, ApiResponse, GenerateAgentRequest,
    GeneratedAgentConfig, InferAgentRequest, PaginationParams,
};
use reqwest::Method;

use crate::client::{with_query, HieroClient};

const AGENTS_PATH: &str = "/api/v1/agents";

impl HieroClient {
    pub async fn create_agent(&self, agent: &Agent) -> ApiResponse<Agent> {
        self.request(Method::POST, AGENTS_PATH, Some(agent)).await
    }

    pub async fn get_agent(&self, agent_id: &str) -> ApiResponse<Agent> {
        self.request_without_body(Method::GET, &agent_path(agent_id))
            .await
    }

    pub async fn update_agent(&self, agent_id: &str, update: &AgentUpdate) -> ApiResponse<Agent> {
        self.request(Method::PUT, &agent_path(agent_id), Some(update))
            .await
    }

    pub async fn delete_agent(&self, agent_id: &str) -> ApiResponse<()> {
        self.request_without_body(Method::DELETE, &agent_path(agent_id))
            .await
    }

    /// Agents owned by the signing wallet.
    pub async fn list_my_agents(&self, params: Option<&PaginationParams>) -> ApiResponse<AgentList> {
        let path = with_query(&format!("{}/me", AGENTS_PATH), params);
        self.request_without_body(Method::GET, &path).await
    }

    /// Ask the server to draft an agent configuration from a natural
    /// language specification.
    pub async fn generate_agent_config(
        &self,
        specification: &str,
    ) -> ApiResponse<GeneratedAgentConfig> {
        let body = GenerateAgentRequest {
            specification: specification.to_string(),
        };
        self.request(
            Method::POST,
            &format!("{}/generate", AGENTS_PATH),
            Some(&body),
        )
        .await
    }

    pub async fn infer_agent(
        &self,
        agent_id: &str,
        input: &str,
        thread_id: &str,
    ) -> ApiResponse<AgentInferenceResponse> {
        let body = InferAgentRequest {
            input: input.to_string(),
            thread_id: thread_id.to_string(),
        };
        self.request(
            Method::POST,
            &format!("{}/infer", agent_path(agent_id)),
            Some(&body),
        )
        .await
    }
}

fn agent_path(agent_id: &str) -> String {
    format!("{}/{}", AGENTS_PATH, agent_id)
}
