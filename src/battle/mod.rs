//! The battle: phases, end-of-match rules, status lines, UI notifications
//! and the state machine tying them together.

pub mod engine;
pub mod rules;
pub mod state;
pub mod status;
pub mod view;

pub use engine::{play_out, BattleEngine};
pub use rules::evaluate_match;
pub use state::{BattlePhase, EndCause, MatchEnd, MatchOutcome, PendingAction, TurnTicket};
pub use status::Status;
pub use view::{BattleObserver, BattleView, CardSlot};
