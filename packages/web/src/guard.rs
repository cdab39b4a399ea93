//! Route guard delegating to the access gate.
//!
//! Every page wraps its content in [`Guarded`]; nothing else in the app is
//! allowed to re-implement the token/paid checks. While the session restore
//! is still pending the guard renders a neutral loading view; no redirect
//! decision is made before `Session::loaded`, so a slow restore never
//! flashes an unauthenticated view.

use dioxus::prelude::*;
use store::{gate, AccessDecision};
use ui::use_session;

use crate::Route;

fn redirect_target(decision: AccessDecision) -> Route {
    match decision {
        AccessDecision::RedirectLogin => Route::Login {},
        AccessDecision::RedirectPayment => Route::Payment {},
        // Allow never reaches here.
        AccessDecision::RedirectDashboard | AccessDecision::Allow => Route::Dashboard {},
    }
}

#[component]
pub fn Guarded(path: String, children: Element) -> Element {
    let session = use_session();
    let nav = use_navigator();
    let mut decision = use_signal(|| Option::<AccessDecision>::None);

    // Decide once per navigation, as soon as the restored session is
    // available. Later session mutations on the same page (e.g. the
    // confirmation page flipping to paid) do not re-open the decision, so
    // the page in view is never yanked away mid-display. The guard is
    // remounted with each navigation, so `path` is fixed for its lifetime.
    let requested = path.clone();
    use_effect(move || {
        let store = session.read();
        if !store.session().loaded || decision.peek().is_some() {
            return;
        }
        decision.set(Some(gate::decide(store.session(), &requested)));
    });

    match decision() {
        None => rsx! {
            div {
                style: "display: flex; align-items: center; justify-content: center; min-height: 100vh;",
                "Loading application..."
            }
        },
        Some(AccessDecision::Allow) => rsx! {
            {children}
        },
        Some(decision) => {
            nav.replace(redirect_target(decision));
            rsx! {}
        }
    }
}
