mod ledger;
mod persona;

pub use ledger::{ConversationLedger, ResetMode, ResetWindow};
pub use persona::Persona;
