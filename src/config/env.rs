//! Environment variable overlay.
//!
//! Every configuration leaf has one dedicated environment variable,
//! consulted once when the tree is constructed. Variables set after
//! process start have no effect. String leaves take the raw value
//! verbatim; numeric and boolean leaves are parsed at this boundary and
//! keep their default (with a warning) when the value does not parse.

use super::types::Config;
use tracing::warn;

impl Config {
    /// Build the default configuration tree with environment overrides
    /// applied, the way the process constructs it at startup.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_env_overrides(&mut config);
        config
    }
}

/// Overlay every leaf from its dedicated environment variable.
pub fn apply_env_overrides(config: &mut Config) {
    let m = &mut config.metaverse;
    env_string("METAVERSE_NAME", &mut m.metaverse_name);
    env_string("METAVERSE_NICK_NAME", &mut m.metaverse_nick_name);
    env_string("METAVERSE_SERVER_URL", &mut m.metaverse_server_url);
    env_string("DEFAULT_ICE_SERVER_URL", &mut m.default_ice_server_url);
    env_string("DASHBOARD_URL", &mut m.dashboard_url);

    let s = &mut config.server;
    env_string("LISTEN_HOST", &mut s.listen_host);
    env_u16("LISTEN_PORT", &mut s.listen_port);
    env_string("KEY_FILE", &mut s.key_file);
    env_string("CERT_FILE", &mut s.cert_file);
    env_u64("MAX_BODY_SIZE", &mut s.max_body_size);
    env_string("STATIC_BASE", &mut s.static_base);
    env_string("USER_CONFIG_FILE", &mut s.user_config_file);
    env_string("VERSION_TAG", &mut s.server_version.version_tag);

    let a = &mut config.auth;
    env_u32("DOMAIN_TOKEN_EXPIRE_HOURS", &mut a.domain_token_expire_hours);
    env_u32("OWNER_TOKEN_EXPIRE_HOURS", &mut a.owner_token_expire_hours);

    let ms = &mut config.metaverse_server;
    env_bool("HTTP_ERROR_ON_FAILURE", &mut ms.http_error_on_failure);
    env_string("ERROR_HEADER", &mut ms.error_header);
    env_string(
        "METAVERSE_INFO_ADDITION_FILE",
        &mut ms.metaverse_info_addition_file,
    );
    env_u32("MAX_NAME_LENGTH", &mut ms.max_name_length);
    env_u32("SESSION_TIMEOUT_MINUTES", &mut ms.session_timeout_minutes);
    env_u32(
        "HEARTBEAT_SECONDS_UNTIL_OFFLINE",
        &mut ms.heartbeat_seconds_until_offline,
    );
    env_u32(
        "DOMAIN_SECONDS_UNTIL_OFFLINE",
        &mut ms.domain_seconds_until_offline,
    );
    env_u32(
        "DOMAIN_SECONDS_CHECK_IF_ONLINE",
        &mut ms.domain_seconds_check_if_online,
    );
    env_u32(
        "HANDSHAKE_REQUEST_EXPIRE_MINUTES",
        &mut ms.handshake_request_expiration_minutes,
    );
    env_u32(
        "CONNECTION_REQUEST_EXPIRE_MINUTES",
        &mut ms.connection_request_expiration_minutes,
    );
    env_u32(
        "FRIEND_REQUEST_EXPIRE_MINUTES",
        &mut ms.friend_request_expiration_minutes,
    );
    env_u32(
        "PLACE_CURRENT_TIMEOUT_MINUTES",
        &mut ms.place_current_timeout_minutes,
    );
    env_u32(
        "PLACE_INACTIVE_TIMEOUT_MINUTES",
        &mut ms.place_inactive_timeout_minutes,
    );
    env_u32(
        "PLACE_CHECK_LAST_ACTIVITY_SECONDS",
        &mut ms.place_check_last_activity_seconds,
    );
    env_string("TOKENGEN_URL", &mut ms.tokengen_url);
    env_string("BASE_ADMIN_ACCOUNT", &mut ms.base_admin_account);
    env_bool(
        "FIX_DOMAIN_NETWORK_ADDRESS",
        &mut ms.fix_domain_network_address,
    );
    env_bool(
        "ALLOW_TEMP_DOMAIN_CREATION",
        &mut ms.allow_temp_domain_creation,
    );
    env_bool(
        "ENABLE_ACCOUNT_EMAIL_VERIFICATION",
        &mut ms.enable_account_email_verification,
    );
    env_u32(
        "EMAIL_VERIFICATION_TIMEOUT_MINUTES",
        &mut ms.email_verification_timeout_minutes,
    );
    env_string(
        "EMAIL_VERIFICATION_EMAIL_BODY",
        &mut ms.email_verification_email_body,
    );
    env_string("EMAIL_VERIFICATION_EMAIL_FROM", &mut ms.email_verification_from);
    env_string(
        "EMAIL_VERIFICATION_REDIRECT",
        &mut ms.email_verification_success_redirect,
    );
    env_string(
        "EMAIL_VERIFICATION_FAILURE_REDIRECT",
        &mut ms.email_verification_failure_redirect,
    );

    let mail = &mut config.mail_transport;
    env_string("SMTP_HOSTNAME", &mut mail.host);
    env_u16("SMTP_PORT", &mut mail.port);
    env_bool("SMTP_SECURE", &mut mail.secure);
    env_string("SMTP_USER", &mut mail.auth.user);
    env_string("SMTP_PASSWORD", &mut mail.auth.pass);

    env_bool("MONITORING_ENABLE", &mut config.monitoring.enable);
    env_bool("MONITORING_HISTORY", &mut config.monitoring.history);

    let db = &mut config.database;
    env_string("DB_HOST", &mut db.db_host);
    env_u16("DB_PORT", &mut db.db_port);
    env_string("DB", &mut db.db);
    env_string("DB_USER", &mut db.db_user);
    env_string("DB_PW", &mut db.db_pw);
    env_string("DB_AUTHDB", &mut db.db_authdb);
    env_string("DB_CONNECTION", &mut db.db_connection);

    let bk = &mut config.backup;
    env_string("BACKUP_USER", &mut bk.backup_user);
    env_string("BACKUP_PW", &mut bk.backup_pw);
    env_string("BACKUP_DIR", &mut bk.backup_dir);
    env_string(
        "BACKUP_AUTHENTICATION_DATABASE",
        &mut bk.authentication_database,
    );

    let dbg = &mut config.debug;
    env_string("LOG_LEVEL", &mut dbg.loglevel);
    env_bool("LOG_TO_FILES", &mut dbg.log_to_files);
    env_string("LOG_FILENAME", &mut dbg.log_filename);
    env_string("LOG_DIRECTORY", &mut dbg.log_directory);
    env_u32("LOG_MAX_SIZE_MEGABYTES", &mut dbg.log_max_size_megabytes);
    env_u32("LOG_MAX_FILES", &mut dbg.log_max_files);
    env_bool("LOG_TAILABLE", &mut dbg.log_tailable);
    env_bool("LOG_COMPRESS", &mut dbg.log_compress);
    env_bool("LOG_TO_CONSOLE", &mut dbg.log_to_console);
    env_bool("DEVEL", &mut dbg.devel);
    env_bool("REQUEST_DETAIL", &mut dbg.request_detail);
    env_bool("REQUEST_BODY", &mut dbg.request_body);
    env_bool(
        "METAVERSEAPI_RESPONSE_DETAIL",
        &mut dbg.metaverseapi_response_detail,
    );
    env_bool("QUERY_DETAIL", &mut dbg.query_detail);
    env_bool("DB_QUERY_DETAIL", &mut dbg.db_query_detail);
    env_bool("FIELD_SETTING", &mut dbg.field_setting);
}

fn env_string(name: &str, slot: &mut String) {
    if let Ok(value) = std::env::var(name) {
        *slot = value;
    }
}

fn env_u16(name: &str, slot: &mut u16) {
    if let Ok(value) = std::env::var(name) {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!("{} is not a valid number: {:?}", name, value),
        }
    }
}

fn env_u32(name: &str, slot: &mut u32) {
    if let Ok(value) = std::env::var(name) {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!("{} is not a valid number: {:?}", name, value),
        }
    }
}

fn env_u64(name: &str, slot: &mut u64) {
    if let Ok(value) = std::env::var(name) {
        match value.parse() {
            Ok(parsed) => *slot = parsed,
            Err(_) => warn!("{} is not a valid number: {:?}", name, value),
        }
    }
}

fn env_bool(name: &str, slot: &mut bool) {
    if let Ok(value) = std::env::var(name) {
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => *slot = true,
            "false" | "0" | "no" => *slot = false,
            _ => warn!("{} is not a valid boolean: {:?}", name, value),
        }
    }
}
