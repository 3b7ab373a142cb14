//! Startup wiring: builds the shared store, registry and client once.

use std::sync::Arc;

use log::info;

use crate::chat::ChatOrchestrator;
use crate::config::Config;
use crate::error::Result;
use crate::llm::{AnthropicClient, AnthropicConfig, LlmClient, ResilientClient};
use crate::server::AppState;
use crate::store::{CustomerStore, InMemoryCustomerStore};
use crate::tools::ToolRegistry;

/// Anthropic client with the key read from the environment
pub fn anthropic_client(config: &Config) -> Result<Arc<dyn LlmClient>> {
    let client = AnthropicClient::from_env(AnthropicConfig::from(&config.llm))?;
    info!("Using model {}", client.model());
    Ok(Arc::new(client))
}

/// Built-in customers plus any listed in the config
pub fn customer_store(config: &Config) -> InMemoryCustomerStore {
    let mut store = InMemoryCustomerStore::seeded();
    store.extend(config.customers.iter().cloned());
    store
}

/// Orchestrator over `llm`, with the configured timeout/retry policy applied
pub fn orchestrator(config: &Config, llm: Arc<dyn LlmClient>) -> Result<ChatOrchestrator> {
    let customers: Arc<dyn CustomerStore> = Arc::new(customer_store(config));
    let tools = ToolRegistry::standard(customers)?;
    info!("Registered tools: {}", tools.tool_names().join(", "));

    let llm: Arc<dyn LlmClient> = Arc::new(ResilientClient::from_config(llm, &config.llm));
    Ok(ChatOrchestrator::new(llm, Arc::new(tools)))
}

/// Server state over `llm`
pub fn app_state(config: &Config, llm: Arc<dyn LlmClient>) -> Result<AppState> {
    Ok(AppState::new(Arc::new(orchestrator(config, llm)?)))
}
