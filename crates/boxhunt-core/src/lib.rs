pub mod error;
pub mod service;
pub mod session;
pub mod store;

pub use error::GameError;
pub use service::{GameReply, GameService};
pub use session::GameSession;
pub use store::SessionStore;
