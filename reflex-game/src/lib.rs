pub mod config;
pub mod error;
pub mod name;
pub mod persistence;
pub mod session;
pub mod state;
mod view;

pub use config::GameConfig;
pub use error::{ConfigError, Fault, StorageError};
pub use name::NameInput;
pub use persistence::{JsonFileStore, PersistenceGateway};
pub use session::{Presentation, Session, SessionOutcome};
pub use state::{GameStateMachine, Poll, Screen};
