//! Build-time configuration for the portal client.

/// Where the backend lives and which publishable key the processor call
/// uses. Overridable at compile time via environment variables, defaulting
/// to the local development setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Base URL of the portal REST backend, no trailing slash.
    pub backend_url: String,
    /// Publishable (client-side) key for the payment processor.
    pub publishable_key: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            backend_url: option_env!("PORTAL_BACKEND_URL")
                .unwrap_or("http://localhost:5003")
                .trim_end_matches('/')
                .to_string(),
            publishable_key: option_env!("PORTAL_STRIPE_PUBLISHABLE_KEY")
                .unwrap_or("pk_test_placeholder")
                .to_string(),
        }
    }
}
