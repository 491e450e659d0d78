//! Configuration types and default values.
//!
//! One struct per configuration domain, one field per recognized option.
//! Serde renames keep the JSON key names that operators already use in
//! `iamus.json` override files, so an override file written for the
//! original server overlays this tree unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root configuration tree for the domain-server process.
///
/// Constructed once near process start via [`Config::from_env`], then
/// resolved by [`crate::config::ConfigResolver`]. The resolver returns the
/// finished tree by value; nothing here is global state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Metaverse identity.
    pub metaverse: MetaverseConfig,
    /// Server network parameters.
    pub server: ServerConfig,
    /// Authorization token parameters.
    pub auth: AuthConfig,
    /// Control of the metaverse operations.
    #[serde(rename = "metaverse-server")]
    pub metaverse_server: MetaverseServerConfig,
    /// SMTP transport for outbound email. Shaped to match a conventional
    /// SMTP transport configuration object.
    #[serde(rename = "nodemailer-transport-config")]
    pub mail_transport: MailTransportConfig,
    /// Value monitoring.
    pub monitoring: MonitoringConfig,
    /// MongoDB access.
    pub database: DatabaseConfig,
    /// Database backup account for the backup script.
    pub backup: BackupConfig,
    /// Logging and debug-detail switches.
    pub debug: DebugConfig,
}

/// The metaverse identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetaverseConfig {
    pub metaverse_name: String,
    pub metaverse_nick_name: String,
    /// External URL of this metaverse-server. If empty, derived from the
    /// self-detected address at resolution time.
    pub metaverse_server_url: String,
    /// If empty, set to the self-detected address at resolution time.
    pub default_ice_server_url: String,
    pub dashboard_url: String,
}

impl Default for MetaverseConfig {
    fn default() -> Self {
        Self {
            metaverse_name: "Overte noobie".to_string(),
            metaverse_nick_name: "Noobie".to_string(),
            metaverse_server_url: String::new(),
            default_ice_server_url: String::new(),
            dashboard_url: "https://dashboard.vircadia.com".to_string(),
        }
    }
}

/// Server network parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServerConfig {
    pub listen_host: String,
    pub listen_port: u16,
    /// TLS key file. If both key-file and cert-file are supplied, the
    /// server serves HTTPS instead of HTTP.
    pub key_file: String,
    pub cert_file: String,
    /// Maximum body size for input JSON bodies.
    pub max_body_size: u64,
    /// Base of the static data URL.
    pub static_base: String,
    /// Startup configuration override file (path or http/https URL).
    pub user_config_file: String,
    /// Replaced wholesale from `VERSION.json` at resolution time.
    pub server_version: ServerVersion,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_host: "0.0.0.0".to_string(),
            listen_port: 9400,
            key_file: String::new(),
            cert_file: String::new(),
            max_body_size: 300_000,
            static_base: "/static".to_string(),
            user_config_file: "./iamus.json".to_string(),
            server_version: ServerVersion::default(),
        }
    }
}

/// Build version metadata.
///
/// `VERSION.json` is written by the build and may carry fields beyond the
/// tag (build date, commit), so unknown keys are kept rather than dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerVersion {
    #[serde(rename = "version-tag")]
    pub version_tag: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ServerVersion {
    fn default() -> Self {
        Self {
            version_tag: "1.1.1-20200101-abcdefg".to_string(),
            extra: Map::new(),
        }
    }
}

impl ServerVersion {
    /// Sentinel used when no `VERSION.json` can be found.
    pub fn unknown() -> Self {
        Self {
            version_tag: "unknown".to_string(),
            extra: Map::new(),
        }
    }
}

/// Authorization token parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthConfig {
    pub domain_token_expire_hours: u32,
    pub owner_token_expire_hours: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            domain_token_expire_hours: 24 * 365,
            owner_token_expire_hours: 24 * 7,
        }
    }
}

/// Control of the metaverse operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MetaverseServerConfig {
    /// Whether to include the error header on failure responses.
    pub http_error_on_failure: bool,
    pub error_header: String,

    pub metaverse_info_addition_file: String,
    /// Max characters in a domain, place, account, ... name.
    pub max_name_length: u32,

    pub session_timeout_minutes: u32,
    /// Seconds until a non-heartbeating user is considered offline.
    pub heartbeat_seconds_until_offline: u32,
    /// Seconds until a non-heartbeating domain is considered offline.
    pub domain_seconds_until_offline: u32,
    /// How often to check whether a domain is online.
    pub domain_seconds_check_if_online: u32,
    pub handshake_request_expiration_minutes: u32,
    pub connection_request_expiration_minutes: u32,
    pub friend_request_expiration_minutes: u32,

    /// Minutes until current place info is stale.
    pub place_current_timeout_minutes: u32,
    /// Minutes until a place is considered inactive.
    pub place_inactive_timeout_minutes: u32,
    /// Seconds between checks for place last-activity updates.
    pub place_check_last_activity_seconds: u32,

    /// Redirection URL used for initial domain token generation.
    /// `METAVERSE_SERVER_URL` and `DASHBOARD_URL` are placeholder tokens
    /// expanded by [`crate::template::expand`].
    #[serde(rename = "tokengen_url")]
    pub tokengen_url: String,

    /// When an account of this name is created, the admin role is added
    /// to it. Empty by default so random people cannot create an admin
    /// account; the named account must be controlled by the operator.
    pub base_admin_account: String,

    /// Assume a domain network_address when one is not set.
    pub fix_domain_network_address: bool,
    pub allow_temp_domain_creation: bool,

    pub enable_account_email_verification: bool,
    pub email_verification_timeout_minutes: u32,
    /// File holding the verification email body. `VERIFICATION_URL`,
    /// `METAVERSE_NAME` and `SHORT_METAVERSE_NAME` are placeholder tokens.
    pub email_verification_email_body: String,
    pub email_verification_from: String,
    /// Redirect targets after following the verification URL.
    /// `METAVERSE_SERVER_URL`, `DASHBOARD_URL`, `ACCOUNT_ID` and
    /// `FAILURE_REASON` (url-encoded) are placeholder tokens.
    pub email_verification_success_redirect: String,
    pub email_verification_failure_redirect: String,
}

impl Default for MetaverseServerConfig {
    fn default() -> Self {
        Self {
            http_error_on_failure: true,
            error_header: "x-vircadia-error-handle".to_string(),
            metaverse_info_addition_file: "./metaverse_info.json".to_string(),
            max_name_length: 32,
            session_timeout_minutes: 5,
            heartbeat_seconds_until_offline: 5 * 60,
            domain_seconds_until_offline: 10 * 60,
            domain_seconds_check_if_online: 2 * 60,
            handshake_request_expiration_minutes: 1,
            connection_request_expiration_minutes: 60 * 24 * 4,
            friend_request_expiration_minutes: 60 * 24 * 4,
            place_current_timeout_minutes: 5,
            place_inactive_timeout_minutes: 60,
            place_check_last_activity_seconds: (3 * 60) - 5,
            tokengen_url: "METAVERSE_SERVER_URL/static/DomainTokenLogin.html".to_string(),
            base_admin_account: String::new(),
            fix_domain_network_address: true,
            allow_temp_domain_creation: false,
            enable_account_email_verification: false,
            email_verification_timeout_minutes: 1440,
            email_verification_email_body: "dist/static/verificationEmail.html".to_string(),
            email_verification_from: String::new(),
            email_verification_success_redirect:
                "METAVERSE_SERVER_URL/static/verificationEmailSuccess.html".to_string(),
            email_verification_failure_redirect:
                "METAVERSE_SERVER_URL/static/verificationEmailFailure.html?r=FAILURE_REASON"
                    .to_string(),
        }
    }
}

/// SMTP transport parameters for outbound email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailTransportConfig {
    pub host: String,
    /// 587 if secure=false.
    pub port: u16,
    pub secure: bool,
    pub auth: MailAuthConfig,
}

impl Default for MailTransportConfig {
    fn default() -> Self {
        Self {
            host: "SMTP-HOSTNAME".to_string(),
            port: 465,
            secure: true,
            auth: MailAuthConfig::default(),
        }
    }
}

/// SMTP credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailAuthConfig {
    pub user: String,
    pub pass: String,
}

impl Default for MailAuthConfig {
    fn default() -> Self {
        Self {
            user: "SMTP-USER".to_string(),
            pass: "SMTP-PASSWORD".to_string(),
        }
    }
}

/// Value monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Enable value monitoring.
    pub enable: bool,
    /// Whether to keep value history.
    pub history: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable: true,
            history: true,
        }
    }
}

/// MongoDB access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub db_host: String,
    pub db_port: u16,
    pub db: String,
    pub db_user: String,
    pub db_pw: String,
    pub db_authdb: String,
    /// Full connection string. Supersedes the discrete fields when
    /// non-empty.
    pub db_connection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_port: 27017,
            db: "tester".to_string(),
            db_user: "metaverse".to_string(),
            db_pw: "nooneknowsit".to_string(),
            db_authdb: "admin".to_string(),
            db_connection: String::new(),
        }
    }
}

/// Database backup account for the backup script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackupConfig {
    pub backup_user: String,
    pub backup_pw: String,
    pub backup_dir: String,
    #[serde(rename = "authenticationDatabase")]
    pub authentication_database: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            backup_user: "backuper".to_string(),
            backup_pw: "nooneknowsit".to_string(),
            backup_dir: "directoryName".to_string(),
            authentication_database: "databaseName".to_string(),
        }
    }
}

/// Logging and debug-detail switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DebugConfig {
    pub loglevel: String,

    pub log_to_files: bool,
    pub log_filename: String,
    pub log_directory: String,
    pub log_max_size_megabytes: u32,
    pub log_max_files: u32,
    /// Always output to the main named log file.
    pub log_tailable: bool,
    /// Compress rotated log files.
    pub log_compress: bool,

    pub log_to_console: bool,

    pub devel: bool,

    /// Output received request info when received.
    pub request_detail: bool,
    /// Output the received request body when received.
    pub request_body: bool,
    /// Output the response sent back from MetaverseAPI requests.
    pub metaverseapi_response_detail: bool,
    /// Output details when selecting query parameters.
    pub query_detail: bool,
    /// Output details about DB queries.
    pub db_query_detail: bool,
    /// Details of entity field getting and setting.
    pub field_setting: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            log_to_files: true,
            log_filename: "iamus.log".to_string(),
            log_directory: "./logs".to_string(),
            log_max_size_megabytes: 100,
            log_max_files: 10,
            log_tailable: true,
            log_compress: false,
            log_to_console: false,
            devel: false,
            request_detail: false,
            request_body: false,
            metaverseapi_response_detail: false,
            query_detail: false,
            db_query_detail: false,
            field_setting: false,
        }
    }
}
