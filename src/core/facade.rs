//! Legacy Suna names for the Omni default-agent service.
//!
//! Every method forwards to the matching [`DefaultAgentService`] operation and
//! returns its result untouched, errors included.

use omni_agents::{
    AgentId, AgentRecord, AgentStats, DefaultAgentService, DefaultConfig, InstallSummary,
    Result, SyncSummary, UpdateSummary,
};

use super::diagnostics::{Diagnostics, TracingDiagnostics};

/// Suna-named facade over an Omni default-agent service.
///
/// The facade owns its delegate exclusively and holds no other state.
#[derive(Debug)]
pub struct SunaDefaultAgentService<S, D = TracingDiagnostics> {
    omni: S,
    diagnostics: D,
}

impl<S: DefaultAgentService> SunaDefaultAgentService<S> {
    /// Wrap `omni`, reporting diagnostics through `tracing`.
    #[must_use]
    pub const fn new(omni: S) -> Self {
        Self {
            omni,
            diagnostics: TracingDiagnostics,
        }
    }
}

impl<S: DefaultAgentService, D: Diagnostics> SunaDefaultAgentService<S, D> {
    /// Wrap `omni`, reporting diagnostics through `diagnostics`.
    #[must_use]
    pub const fn with_diagnostics(omni: S, diagnostics: D) -> Self {
        Self { omni, diagnostics }
    }

    /// The wrapped Omni service.
    #[must_use]
    pub const fn delegate(&self) -> &S {
        &self.omni
    }

    /// The diagnostics port.
    #[must_use]
    pub const fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Legacy name for [`DefaultAgentService::get_omni_default_config`].
    pub async fn get_suna_default_config(&self) -> Result<DefaultConfig> {
        self.omni.get_omni_default_config().await
    }

    /// Legacy name for [`DefaultAgentService::sync_all_omni_agents`].
    pub async fn sync_all_suna_agents(&self) -> Result<SyncSummary> {
        self.diagnostics
            .info("Syncing all Suna agents through the Omni default-agent service");
        self.omni.sync_all_omni_agents().await
    }

    /// Legacy name for [`DefaultAgentService::update_all_omni_agents`].
    pub async fn update_all_suna_agents(
        &self,
        target_version: Option<&str>,
    ) -> Result<UpdateSummary> {
        self.diagnostics
            .info("Updating all Suna agents through the Omni default-agent service");
        self.omni.update_all_omni_agents(target_version).await
    }

    /// Legacy name for [`DefaultAgentService::install_for_all_users`].
    pub async fn install_for_all_users(&self) -> Result<InstallSummary> {
        self.diagnostics
            .info("Installing Suna agents for all users through the Omni default-agent service");
        self.omni.install_for_all_users().await
    }

    /// Install the Suna agent for `account_id`, keeping any existing agent.
    pub async fn install_suna_agent_for_user(&self, account_id: &str) -> Result<Option<AgentId>> {
        self.install_suna_agent_for_user_with(account_id, false)
            .await
    }

    /// Legacy name for [`DefaultAgentService::install_omni_agent_for_user`].
    pub async fn install_suna_agent_for_user_with(
        &self,
        account_id: &str,
        replace_existing: bool,
    ) -> Result<Option<AgentId>> {
        self.diagnostics.info(&format!(
            "Installing Suna agent for account {account_id} through the Omni default-agent service"
        ));
        self.omni
            .install_omni_agent_for_user(account_id, replace_existing)
            .await
    }

    /// Legacy name for [`DefaultAgentService::get_omni_agent_for_user`].
    pub async fn get_suna_agent_for_user(&self, account_id: &str) -> Result<Option<AgentRecord>> {
        self.omni.get_omni_agent_for_user(account_id).await
    }

    /// Legacy name for [`DefaultAgentService::get_omni_agent_stats`].
    pub async fn get_suna_agent_stats(&self) -> Result<AgentStats> {
        self.omni.get_omni_agent_stats().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use omni_agents::AgentError;
    use parking_lot::Mutex;
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::core::diagnostics::{NoopDiagnostics, RecordingDiagnostics};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        DefaultConfig,
        Sync,
        Update(Option<String>),
        InstallAll,
        Install(String, bool),
        GetAgent(String),
        Stats,
    }

    #[derive(Default)]
    struct MockOmni {
        calls: Mutex<Vec<Call>>,
        agents: HashMap<String, AgentRecord>,
        unavailable: bool,
    }

    impl MockOmni {
        fn with_agent(account_id: &str, record: Value) -> Self {
            let mut agents = HashMap::new();
            agents.insert(account_id.to_string(), object(record));
            Self {
                agents,
                ..Self::default()
            }
        }

        fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn record(&self, call: Call) -> Result<()> {
            self.calls.lock().push(call);
            if self.unavailable {
                return Err(AgentError::Api {
                    status: 503,
                    message: "omni unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[async_trait]
    impl DefaultAgentService for MockOmni {
        async fn get_omni_default_config(&self) -> Result<DefaultConfig> {
            self.record(Call::DefaultConfig)?;
            Ok(object(json!({"name": "Omni", "model": "claude-sonnet-4"})))
        }

        async fn sync_all_omni_agents(&self) -> Result<SyncSummary> {
            self.record(Call::Sync)?;
            Ok(object(json!({"synced": 4, "failed": 1})))
        }

        async fn update_all_omni_agents(
            &self,
            target_version: Option<&str>,
        ) -> Result<UpdateSummary> {
            self.record(Call::Update(target_version.map(str::to_string)))?;
            Ok(object(json!({"updated": 4, "version": target_version})))
        }

        async fn install_for_all_users(&self) -> Result<InstallSummary> {
            self.record(Call::InstallAll)?;
            Ok(object(json!({"installed": 12, "skipped": 3})))
        }

        async fn install_omni_agent_for_user(
            &self,
            account_id: &str,
            replace_existing: bool,
        ) -> Result<Option<AgentId>> {
            self.record(Call::Install(account_id.to_string(), replace_existing))?;
            if self.agents.contains_key(account_id) && !replace_existing {
                return Ok(None);
            }
            Ok(Some(format!("agent-{account_id}")))
        }

        async fn get_omni_agent_for_user(&self, account_id: &str) -> Result<Option<AgentRecord>> {
            self.record(Call::GetAgent(account_id.to_string()))?;
            Ok(self.agents.get(account_id).cloned())
        }

        async fn get_omni_agent_stats(&self) -> Result<AgentStats> {
            self.record(Call::Stats)?;
            Ok(object(json!({"total_agents": 15, "outdated": 2})))
        }
    }

    fn facade(omni: MockOmni) -> SunaDefaultAgentService<MockOmni, RecordingDiagnostics> {
        SunaDefaultAgentService::with_diagnostics(omni, RecordingDiagnostics::new())
    }

    fn assert_unavailable(err: AgentError) {
        match err {
            AgentError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "omni unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn default_config_is_forwarded_unchanged() {
        let suna = facade(MockOmni::default());

        let config = suna.get_suna_default_config().await.unwrap();

        assert_eq!(
            config,
            object(json!({"name": "Omni", "model": "claude-sonnet-4"}))
        );
        assert_eq!(suna.delegate().calls(), vec![Call::DefaultConfig]);
        assert!(suna.diagnostics().messages().is_empty());
    }

    #[tokio::test]
    async fn sync_logs_once_then_forwards() {
        let suna = facade(MockOmni::default());

        let summary = suna.sync_all_suna_agents().await.unwrap();

        assert_eq!(summary, object(json!({"synced": 4, "failed": 1})));
        assert_eq!(suna.delegate().calls(), vec![Call::Sync]);
        assert_eq!(suna.diagnostics().messages().len(), 1);
    }

    #[tokio::test]
    async fn update_forwards_target_version() {
        let suna = facade(MockOmni::default());

        let summary = suna.update_all_suna_agents(Some("1.4.0")).await.unwrap();

        assert_eq!(summary.get("version"), Some(&json!("1.4.0")));
        assert_eq!(
            suna.delegate().calls(),
            vec![Call::Update(Some("1.4.0".to_string()))]
        );
        assert_eq!(suna.diagnostics().messages().len(), 1);
    }

    #[tokio::test]
    async fn update_without_version_forwards_none() {
        let suna = facade(MockOmni::default());

        let summary = suna.update_all_suna_agents(None).await.unwrap();

        assert_eq!(summary.get("version"), Some(&Value::Null));
        assert_eq!(suna.delegate().calls(), vec![Call::Update(None)]);
    }

    #[tokio::test]
    async fn install_for_all_users_logs_once_then_forwards() {
        let suna = facade(MockOmni::default());

        let summary = suna.install_for_all_users().await.unwrap();

        assert_eq!(summary, object(json!({"installed": 12, "skipped": 3})));
        assert_eq!(suna.delegate().calls(), vec![Call::InstallAll]);
        assert_eq!(suna.diagnostics().messages().len(), 1);
    }

    #[tokio::test]
    async fn install_defaults_to_keeping_existing_agent() {
        let suna = facade(MockOmni::default());

        let agent_id = suna.install_suna_agent_for_user("acct-9").await.unwrap();

        assert_eq!(agent_id.as_deref(), Some("agent-acct-9"));
        assert_eq!(
            suna.delegate().calls(),
            vec![Call::Install("acct-9".to_string(), false)]
        );
    }

    #[tokio::test]
    async fn install_forwards_replace_flag() {
        let suna = facade(MockOmni::with_agent("acct-1", json!({"agent_id": "old"})));

        let kept = suna.install_suna_agent_for_user("acct-1").await.unwrap();
        let replaced = suna
            .install_suna_agent_for_user_with("acct-1", true)
            .await
            .unwrap();

        assert!(kept.is_none());
        assert_eq!(replaced.as_deref(), Some("agent-acct-1"));
        assert_eq!(
            suna.delegate().calls(),
            vec![
                Call::Install("acct-1".to_string(), false),
                Call::Install("acct-1".to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn install_message_names_the_account() {
        let suna = facade(MockOmni::default());

        suna.install_suna_agent_for_user("acct-42").await.unwrap();

        let messages = suna.diagnostics().messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("acct-42"));
    }

    #[tokio::test]
    async fn missing_agent_is_none() {
        let suna = facade(MockOmni::default());

        let agent = suna.get_suna_agent_for_user("acct-123").await.unwrap();

        assert!(agent.is_none());
        assert_eq!(
            suna.delegate().calls(),
            vec![Call::GetAgent("acct-123".to_string())]
        );
        assert!(suna.diagnostics().messages().is_empty());
    }

    #[tokio::test]
    async fn existing_agent_is_returned_unchanged() {
        let record = json!({"agent_id": "agent-7", "version": "1.2.0", "tools": ["web"]});
        let suna = facade(MockOmni::with_agent("acct-123", record.clone()));

        let agent = suna.get_suna_agent_for_user("acct-123").await.unwrap();

        assert_eq!(agent, Some(object(record)));
    }

    #[tokio::test]
    async fn stats_are_forwarded_unchanged() {
        let suna = facade(MockOmni::default());

        let stats = suna.get_suna_agent_stats().await.unwrap();

        assert_eq!(stats, object(json!({"total_agents": 15, "outdated": 2})));
        assert_eq!(suna.delegate().calls(), vec![Call::Stats]);
        assert!(suna.diagnostics().messages().is_empty());
    }

    #[tokio::test]
    async fn delegate_errors_propagate_unchanged() {
        let suna = facade(MockOmni::unavailable());

        assert_unavailable(suna.get_suna_default_config().await.unwrap_err());
        assert_unavailable(suna.sync_all_suna_agents().await.unwrap_err());
        assert_unavailable(suna.update_all_suna_agents(None).await.unwrap_err());
        assert_unavailable(suna.install_for_all_users().await.unwrap_err());
        assert_unavailable(suna.install_suna_agent_for_user("a").await.unwrap_err());
        assert_unavailable(suna.get_suna_agent_for_user("a").await.unwrap_err());
        assert_unavailable(suna.get_suna_agent_stats().await.unwrap_err());

        // Each operation reached the delegate exactly once
        assert_eq!(suna.delegate().calls().len(), 7);
        // Diagnostics are emitted before delegating, so failures still log
        assert_eq!(suna.diagnostics().messages().len(), 4);
    }

    #[tokio::test]
    async fn diagnostics_sink_does_not_change_results() {
        let recorded = facade(MockOmni::default());
        let silent =
            SunaDefaultAgentService::with_diagnostics(MockOmni::default(), NoopDiagnostics);

        assert_eq!(
            recorded.sync_all_suna_agents().await.unwrap(),
            silent.sync_all_suna_agents().await.unwrap()
        );
        assert_eq!(
            recorded.update_all_suna_agents(Some("2.0")).await.unwrap(),
            silent.update_all_suna_agents(Some("2.0")).await.unwrap()
        );
        assert_eq!(
            recorded.install_for_all_users().await.unwrap(),
            silent.install_for_all_users().await.unwrap()
        );
        assert_eq!(
            recorded.install_suna_agent_for_user("acct-5").await.unwrap(),
            silent.install_suna_agent_for_user("acct-5").await.unwrap()
        );
        assert_eq!(recorded.delegate().calls(), silent.delegate().calls());
    }

    #[tokio::test]
    async fn default_constructor_uses_tracing() {
        let suna = SunaDefaultAgentService::new(MockOmni::default());

        let summary = suna.sync_all_suna_agents().await.unwrap();

        assert_eq!(summary.get("synced"), Some(&json!(4)));
    }

    #[tokio::test]
    async fn boxed_delegate_is_accepted() {
        let omni: Box<dyn DefaultAgentService> = Box::new(MockOmni::default());
        let suna = SunaDefaultAgentService::with_diagnostics(omni, NoopDiagnostics);

        let stats = suna.get_suna_agent_stats().await.unwrap();

        assert_eq!(stats.get("total_agents"), Some(&json!(15)));
    }
}
