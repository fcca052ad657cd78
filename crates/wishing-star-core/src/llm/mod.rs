mod traits;
mod openai;
mod usage;

pub use traits::*;
pub use openai::OpenAIClient;
pub use usage::UsageTracker;
