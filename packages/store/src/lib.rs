pub mod gate;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use gate::{classify, decide, AccessDecision, RouteClass};
pub use models::{AuthState, Identity, PaymentStatus, Session};
pub use session::{SessionStorage, SessionStore, StorageError, TOKEN_KEY, USER_KEY};
