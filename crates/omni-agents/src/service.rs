//! Default-agent service abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AgentId, AgentRecord, AgentStats, DefaultConfig, InstallSummary, SyncSummary, UpdateSummary,
};

/// Service owning default-agent configuration, installation, sync and statistics.
///
/// Implement this trait to back the default agent with a new store or transport.
#[async_trait]
pub trait DefaultAgentService: Send + Sync {
    /// Get the default agent configuration.
    async fn get_omni_default_config(&self) -> Result<DefaultConfig>;

    /// Sync every installed default agent with the current configuration.
    async fn sync_all_omni_agents(&self) -> Result<SyncSummary>;

    /// Update every installed default agent.
    ///
    /// `None` leaves the choice of version to the service.
    async fn update_all_omni_agents(&self, target_version: Option<&str>) -> Result<UpdateSummary>;

    /// Install the default agent for every user that lacks one.
    async fn install_for_all_users(&self) -> Result<InstallSummary>;

    /// Install the default agent for one account.
    ///
    /// Returns the installed agent's id, or `None` if nothing was installed.
    async fn install_omni_agent_for_user(
        &self,
        account_id: &str,
        replace_existing: bool,
    ) -> Result<Option<AgentId>>;

    /// Get the default agent of one account, if it has one.
    async fn get_omni_agent_for_user(&self, account_id: &str) -> Result<Option<AgentRecord>>;

    /// Get statistics about installed default agents.
    async fn get_omni_agent_stats(&self) -> Result<AgentStats>;
}

macro_rules! forward_default_agent_service {
    ($wrapper:ident) => {
        #[async_trait]
        impl<T: DefaultAgentService + ?Sized> DefaultAgentService for $wrapper<T> {
            async fn get_omni_default_config(&self) -> Result<DefaultConfig> {
                (**self).get_omni_default_config().await
            }

            async fn sync_all_omni_agents(&self) -> Result<SyncSummary> {
                (**self).sync_all_omni_agents().await
            }

            async fn update_all_omni_agents(
                &self,
                target_version: Option<&str>,
            ) -> Result<UpdateSummary> {
                (**self).update_all_omni_agents(target_version).await
            }

            async fn install_for_all_users(&self) -> Result<InstallSummary> {
                (**self).install_for_all_users().await
            }

            async fn install_omni_agent_for_user(
                &self,
                account_id: &str,
                replace_existing: bool,
            ) -> Result<Option<AgentId>> {
                (**self)
                    .install_omni_agent_for_user(account_id, replace_existing)
                    .await
            }

            async fn get_omni_agent_for_user(
                &self,
                account_id: &str,
            ) -> Result<Option<AgentRecord>> {
                (**self).get_omni_agent_for_user(account_id).await
            }

            async fn get_omni_agent_stats(&self) -> Result<AgentStats> {
                (**self).get_omni_agent_stats().await
            }
        }
    };
}

forward_default_agent_service!(Box);
forward_default_agent_service!(Arc);
