//! Session store - persisted auth session and user preferences
//!
//! A JSON file read wholesale at construction and rewritten on every
//! mutation. A data-version stamp governs a one-time wipe on upgrade:
//! stored version older than current destroys all persisted keys, with no
//! partial migration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Bump to destroy all persisted state on next startup.
const CURRENT_DATA_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Card density for inventory views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl CardSize {
    /// Parse the persisted name; anything unrecognized becomes `Medium`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "SMALL" => CardSize::Small,
            "LARGE" => CardSize::Large,
            _ => CardSize::Medium,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CardSize::Small => "SMALL",
            CardSize::Medium => "MEDIUM",
            CardSize::Large => "LARGE",
        }
    }
}

/// Persisted store file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    data_version: u32,
    access_token: Option<String>,
    user_id: Option<i64>,
    user_role: Option<String>,
    user_name: Option<String>,
    company_name: Option<String>,
    default_local_id: Option<i64>,
    #[serde(default)]
    permissions: BTreeSet<String>,
    card_size: Option<String>,
    notif_push: Option<bool>,
    notif_stock: Option<bool>,
    saved_email: Option<String>,
    saved_pass: Option<String>,
}

/// Process-wide session store, shared as `Arc<SessionStore>`.
///
/// Writes replace a cohesive group of fields and rewrite the whole file,
/// so readers never observe a partially written auth session.
pub struct SessionStore {
    /// Store file path: `{dir}/session.json`
    file_path: PathBuf,
    data: RwLock<SessionData>,
}

impl SessionStore {
    /// Load the store from `dir/session.json`, applying the wipe-on-upgrade
    /// version check. A missing or stale file yields a freshly stamped
    /// empty store.
    pub fn load(dir: &Path) -> Result<Self, SessionError> {
        let file_path = dir.join("session.json");

        let data: SessionData = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path)?;
            serde_json::from_str(&content)?
        } else {
            SessionData::default()
        };

        let store = Self {
            file_path,
            data: RwLock::new(data),
        };

        let saved_version = store.read().data_version;
        if saved_version < CURRENT_DATA_VERSION {
            tracing::warn!(
                saved = saved_version,
                current = CURRENT_DATA_VERSION,
                "Stale session data version, wiping persisted state"
            );
            store.clear_all()?;
        }

        Ok(store)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionData> {
        self.data.read().expect("session store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionData> {
        self.data.write().expect("session store lock poisoned")
    }

    fn persist(&self) -> Result<(), SessionError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&*self.read())?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    // ============ Auth session ============

    /// Full overwrite of the auth group. A `None` default local clears the
    /// persisted one.
    pub fn save_auth_session(
        &self,
        token: &str,
        user_id: i64,
        role: &str,
        name: Option<&str>,
        company_name: Option<&str>,
        default_local_id: Option<i64>,
    ) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            data.access_token = Some(token.to_string());
            data.user_id = Some(user_id);
            data.user_role = Some(role.to_string());
            data.user_name = name.map(str::to_string);
            data.company_name = company_name.map(str::to_string);
            data.default_local_id = default_local_id;
        }
        tracing::debug!(user_id, "Auth session saved");
        self.persist()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.read().user_id
    }

    pub fn user_role(&self) -> Option<String> {
        self.read().user_role.clone()
    }

    pub fn user_name(&self) -> Option<String> {
        self.read().user_name.clone()
    }

    pub fn company_name(&self) -> Option<String> {
        self.read().company_name.clone()
    }

    /// Strict validity: token present and non-empty, user id positive, role
    /// non-blank. Anything less counts as logged out.
    pub fn is_logged_in(&self) -> bool {
        let data = self.read();
        let token_ok = data.access_token.as_deref().is_some_and(|t| !t.is_empty());
        let user_ok = data.user_id.is_some_and(|id| id > 0);
        let role_ok = data
            .user_role
            .as_deref()
            .is_some_and(|r| !r.trim().is_empty());
        token_ok && user_ok && role_ok
    }

    // ============ Permissions ============

    pub fn save_permissions<I>(&self, permissions: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = String>,
    {
        self.write().permissions = permissions.into_iter().collect();
        self.persist()
    }

    pub fn permissions(&self) -> BTreeSet<String> {
        self.read().permissions.clone()
    }

    // ============ Default local ============

    /// Persisted independently of the auth session; survives
    /// `clear_auth_only`.
    pub fn save_default_local_id(&self, local_id: Option<i64>) -> Result<(), SessionError> {
        self.write().default_local_id = local_id;
        self.persist()
    }

    pub fn default_local_id(&self) -> Option<i64> {
        self.read().default_local_id
    }

    // ============ Lifecycle ============

    /// Logout: drop token, user id, role, name, and permissions while
    /// preserving preferences, the default local, and saved credentials.
    pub fn clear_auth_only(&self) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            data.access_token = None;
            data.user_id = None;
            data.user_role = None;
            data.user_name = None;
            data.permissions.clear();
        }
        tracing::debug!("Auth session cleared, preferences kept");
        self.persist()
    }

    /// Wipe everything and re-stamp the current data version.
    pub fn clear_all(&self) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            *data = SessionData {
                data_version: CURRENT_DATA_VERSION,
                ..SessionData::default()
            };
        }
        self.persist()
    }

    // ============ Preferences ============

    pub fn card_size(&self) -> CardSize {
        self.read()
            .card_size
            .as_deref()
            .map(CardSize::from_name)
            .unwrap_or_default()
    }

    pub fn save_card_size(&self, size: CardSize) -> Result<(), SessionError> {
        self.write().card_size = Some(size.name().to_string());
        self.persist()
    }

    /// `(push_enabled, low_stock_alert_enabled)`, both defaulting to true.
    pub fn notification_settings(&self) -> (bool, bool) {
        let data = self.read();
        (
            data.notif_push.unwrap_or(true),
            data.notif_stock.unwrap_or(true),
        )
    }

    pub fn save_notification_settings(&self, push: bool, stock: bool) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            data.notif_push = Some(push);
            data.notif_stock = Some(stock);
        }
        self.persist()
    }

    // ============ Biometric credentials ============

    pub fn save_credentials(&self, email: &str, pass: &str) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            data.saved_email = Some(email.to_string());
            data.saved_pass = Some(pass.to_string());
        }
        self.persist()
    }

    pub fn saved_credentials(&self) -> Option<(String, String)> {
        let data = self.read();
        match (&data.saved_email, &data.saved_pass) {
            (Some(email), Some(pass)) => Some((email.clone(), pass.clone())),
            _ => None,
        }
    }

    pub fn clear_credentials(&self) -> Result<(), SessionError> {
        {
            let mut data = self.write();
            data.saved_email = None;
            data.saved_pass = None;
        }
        self.persist()
    }

    /// Biometric re-login is available iff both saved fields are non-blank.
    pub fn is_biometric_enabled(&self) -> bool {
        let data = self.read();
        let email_ok = data.saved_email.as_deref().is_some_and(|e| !e.is_empty());
        let pass_ok = data.saved_pass.as_deref().is_some_and(|p| !p.is_empty());
        email_ok && pass_ok
    }
}
