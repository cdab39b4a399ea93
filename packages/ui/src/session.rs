//! Session context and hooks for the UI.

use api::{PortalClient, PortalConfig};
use dioxus::prelude::*;
use store::SessionStore;

/// Get the app-wide session store.
/// Returns a signal that updates when the user logs in or out.
pub fn use_session() -> Signal<SessionStore> {
    use_context::<Signal<SessionStore>>()
}

/// Get the shared backend client.
pub fn use_portal() -> PortalClient {
    use_context::<PortalClient>()
}

/// Create the platform-appropriate session storage.
///
/// - **Web** (WASM + `web` feature): the browser's localStorage
/// - **Native** (tests, tooling): in-memory only
fn platform_storage() -> impl store::SessionStorage + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::MemoryStorage::new()
    }
}

/// Provider component that owns the session store and the backend client.
/// Wrap the app with this component; consumers reach both via
/// [`use_session`] and [`use_portal`].
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let mut session = use_signal(|| SessionStore::new(platform_storage()));

    // Restore the persisted session once, after the first render. Route
    // guards hold a pending view until `loaded` flips.
    use_effect(move || {
        session.write().restore();
    });

    use_context_provider(|| session);
    use_context_provider(|| PortalClient::new(&PortalConfig::default()));

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session();

    let onclick = move |_| {
        session.write().logout();
        // Back to the login page; the gate would bounce us there anyway.
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
