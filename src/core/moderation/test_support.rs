// Test doubles for the moderation ports.

use super::escalation::{WarningStore, WarningStoreError};
use super::gateway::{GatewayError, ModerationGateway};
use super::moderation_models::{AuditRecord, ViolationKind, WarningRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Delete {
        channel_id: u64,
        message_id: u64,
    },
    EnsureMutedRole {
        guild_id: u64,
    },
    AddRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: String,
    },
    RemoveRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    Ban {
        guild_id: u64,
        user_id: u64,
        reason: String,
    },
    SendAudit {
        channel_id: u64,
        record: AuditRecord,
    },
}

/// Gateway that records every call and fails on demand.
#[derive(Default)]
pub struct MockGateway {
    calls: Mutex<Vec<GatewayCall>>,
    delete_error: Mutex<Option<GatewayError>>,
    add_role_error: Mutex<Option<GatewayError>>,
    ban_error: Mutex<Option<GatewayError>>,
    send_error: Mutex<Option<GatewayError>>,
}

impl MockGateway {
    pub const MUTED_ROLE_ID: u64 = 777;

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent_audits(&self) -> Vec<(u64, AuditRecord)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::SendAudit { channel_id, record } => Some((channel_id, record)),
                _ => None,
            })
            .collect()
    }

    pub fn fail_delete(&self, error: GatewayError) {
        *self.delete_error.lock().unwrap() = Some(error);
    }

    pub fn fail_add_role(&self, error: GatewayError) {
        *self.add_role_error.lock().unwrap() = Some(error);
    }

    pub fn fail_ban(&self, error: GatewayError) {
        *self.ban_error.lock().unwrap() = Some(error);
    }

    pub fn fail_send(&self, error: GatewayError) {
        *self.send_error.lock().unwrap() = Some(error);
    }

    fn record(
        &self,
        call: GatewayCall,
        error: &Mutex<Option<GatewayError>>,
    ) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        match error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ModerationGateway for MockGateway {
    async fn delete_message(&self, channel_id: u64, message_id: u64) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::Delete {
                channel_id,
                message_id,
            },
            &self.delete_error,
        )
    }

    async fn ensure_muted_role(
        &self,
        guild_id: u64,
        _role_name: &str,
    ) -> Result<u64, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::EnsureMutedRole { guild_id });
        Ok(Self::MUTED_ROLE_ID)
    }

    async fn add_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::AddRole {
                guild_id,
                user_id,
                role_id,
                reason: reason.to_string(),
            },
            &self.add_role_error,
        )
    }

    async fn remove_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        _reason: &str,
    ) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(GatewayCall::RemoveRole {
            guild_id,
            user_id,
            role_id,
        });
        Ok(())
    }

    async fn ban_member(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
    ) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::Ban {
                guild_id,
                user_id,
                reason: reason.to_string(),
            },
            &self.ban_error,
        )
    }

    async fn send_audit(&self, channel_id: u64, record: &AuditRecord) -> Result<(), GatewayError> {
        self.record(
            GatewayCall::SendAudit {
                channel_id,
                record: record.clone(),
            },
            &self.send_error,
        )
    }
}

/// In-memory warning store keyed by (user, guild).
#[derive(Default)]
pub struct MemoryWarningStore {
    records: DashMap<(u64, u64), WarningRecord>,
    failing: bool,
}

impl MemoryWarningStore {
    pub fn failing() -> Self {
        Self {
            records: DashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl WarningStore for MemoryWarningStore {
    async fn add_warning(
        &self,
        user_id: u64,
        guild_id: u64,
        violation: ViolationKind,
        at: DateTime<Utc>,
    ) -> Result<WarningRecord, WarningStoreError> {
        if self.failing {
            return Err(WarningStoreError::StorageError("database is locked".to_string()));
        }

        let mut entry = self
            .records
            .entry((user_id, guild_id))
            .or_insert_with(|| WarningRecord {
                user_id,
                guild_id,
                warnings: 0,
                last_warning: at,
                last_violation: violation,
            });
        entry.warnings += 1;
        entry.last_warning = at;
        entry.last_violation = violation;
        Ok(entry.clone())
    }

    async fn get_warning(
        &self,
        user_id: u64,
        guild_id: u64,
    ) -> Result<Option<WarningRecord>, WarningStoreError> {
        if self.failing {
            return Err(WarningStoreError::StorageError("database is locked".to_string()));
        }
        Ok(self.records.get(&(user_id, guild_id)).map(|r| r.clone()))
    }
}
