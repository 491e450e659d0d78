//! Placeholder substitution for configured URL and email templates.
//!
//! Several configuration values (`tokengen_url`, the email-verification
//! body and redirects) carry literal placeholder tokens that consumers
//! expand with resolved values at the point of use. Substitution is
//! plain text replacement; it never runs inside the resolver.

use crate::config::Config;
use std::borrow::Cow;

/// Values for the fixed set of recognized placeholder tokens.
///
/// Unset placeholders are left verbatim in the output so a consumer that
/// only knows some of the values does not destroy the tokens another
/// consumer will fill in later.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pub metaverse_server_url: Option<String>,
    pub dashboard_url: Option<String>,
    pub verification_url: Option<String>,
    pub metaverse_name: Option<String>,
    pub short_metaverse_name: Option<String>,
    pub account_id: Option<String>,
    /// Stored url-encoded; redirect URLs carry it as a query parameter.
    pub failure_reason: Option<String>,
}

impl Placeholders {
    /// Placeholders whose values come straight from the resolved tree.
    pub fn from_config(config: &Config) -> Self {
        Self {
            metaverse_server_url: Some(config.metaverse.metaverse_server_url.clone()),
            dashboard_url: Some(config.metaverse.dashboard_url.clone()),
            metaverse_name: Some(config.metaverse.metaverse_name.clone()),
            short_metaverse_name: Some(config.metaverse.metaverse_nick_name.clone()),
            ..Self::default()
        }
    }

    pub fn with_verification_url(mut self, url: impl Into<String>) -> Self {
        self.verification_url = Some(url.into());
        self
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the failure reason; the raw text is url-encoded here.
    pub fn with_failure_reason(mut self, reason: &str) -> Self {
        self.failure_reason = Some(urlencoding::encode(reason).into_owned());
        self
    }
}

/// Expand every set placeholder in `template`.
pub fn expand(template: &str, vars: &Placeholders) -> String {
    // Longer tokens first: METAVERSE_NAME is a substring of
    // SHORT_METAVERSE_NAME.
    let substitutions: [(&str, &Option<String>); 7] = [
        ("METAVERSE_SERVER_URL", &vars.metaverse_server_url),
        ("VERIFICATION_URL", &vars.verification_url),
        ("SHORT_METAVERSE_NAME", &vars.short_metaverse_name),
        ("METAVERSE_NAME", &vars.metaverse_name),
        ("DASHBOARD_URL", &vars.dashboard_url),
        ("ACCOUNT_ID", &vars.account_id),
        ("FAILURE_REASON", &vars.failure_reason),
    ];

    let mut result = Cow::Borrowed(template);
    for (token, value) in substitutions {
        if let Some(value) = value {
            if result.contains(token) {
                result = Cow::Owned(result.replace(token, value));
            }
        }
    }
    result.into_owned()
}
