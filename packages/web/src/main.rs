use dioxus::prelude::*;

use ui::SessionProvider;
use views::{Dashboard, Login, Payment, PaymentSuccess, Register};

mod guard;
mod views;

use guard::Guarded;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/payment")]
    Payment {},
    #[route("/payment-success")]
    PaymentSuccess {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/:..segments")]
    Fallback { segments: Vec<String> },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to the workflow entry point; the gate takes it from there.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// Catch-all: unknown paths get the same three-way decision as the paid
/// workflow, so the guard sends the user wherever they belong.
#[component]
fn Fallback(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        Guarded {
            path: path,
            Root {}
        }
    }
}
