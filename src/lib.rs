// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds terminal setup and the event loop.
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod dictionary;
pub mod game;
pub mod input;
pub mod metrics;
pub mod runtime;
pub mod sentence;
pub mod session;
pub mod ui;

pub use dictionary::Dictionary;
pub use game::{Game, Snapshot};
pub use input::{process_key, Key, Outcome};
pub use sentence::{GenerationError, LengthPolicy, Sentence, SentenceGenerator};
pub use session::{Phase, SessionState};
