pub mod error;
pub mod constants;
pub mod clock;
pub mod llm;
pub mod context;
pub mod gate;
pub mod config;
pub mod gateway;

// Re-export key types
pub use error::{Result, StarError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use llm::{
    ChatCompletion, ChatRequest, CompletionService, Message, OpenAIClient, Role, Usage,
    UsageTracker,
};
pub use context::{ConversationLedger, Persona, ResetMode, ResetWindow};
pub use gate::{GateDecision, RequestGate};
pub use config::Settings;
pub use gateway::CompletionGateway;
