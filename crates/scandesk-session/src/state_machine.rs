//! Reservation-lifecycle state machine.
//!
//! The operator session moves through three states:
//!
//! - `Disconnected`: no device hold
//! - `Reserved`: a reservation is active and the expiry countdown runs
//! - `ResultsPending`: a scan completed and awaits the operator's
//!   accept/reject verdict
//!
//! # Valid Transitions
//!
//! - Disconnected → Reserved (connect succeeded)
//! - Reserved → ResultsPending (scan completed)
//! - Reserved → Disconnected (countdown expired)
//! - ResultsPending → Reserved (rejected; reservation extended)
//! - ResultsPending → Disconnected (accepted, or countdown expired)
//!
//! # Examples
//!
//! ```
//! use scandesk_session::{SessionMachine, SessionState};
//!
//! let mut machine = SessionMachine::new();
//! assert_eq!(machine.current_state(), SessionState::Disconnected);
//!
//! machine.transition_to(SessionState::Reserved).unwrap();
//! assert_eq!(machine.current_state(), SessionState::Reserved);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use scandesk_core::{Error, Result};

/// Maximum number of state transitions kept for diagnostics.
///
/// A full operator cycle is at most four transitions, so this covers over
/// a dozen complete document reviews without unbounded growth.
const MAX_HISTORY_SIZE: usize = 64;

/// Operator session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No device hold; connection parameters are editable.
    Disconnected,

    /// A reservation is active; the expiry countdown is running.
    Reserved,

    /// Scan results are displayed, awaiting accept or reject.
    ResultsPending,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            SessionState::Disconnected => "Disconnected",
            SessionState::Reserved => "Reserved",
            SessionState::ResultsPending => "ResultsPending",
        };
        write!(f, "{}", state_str)
    }
}

impl SessionState {
    /// Check if a transition to `target` is valid from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use scandesk_session::SessionState;
    ///
    /// assert!(SessionState::Disconnected.can_transition_to(SessionState::Reserved));
    /// assert!(!SessionState::Disconnected.can_transition_to(SessionState::ResultsPending));
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, target: SessionState) -> bool {
        matches!(
            (self, target),
            // From Disconnected
            (SessionState::Disconnected, SessionState::Reserved)
            // From Reserved
            | (SessionState::Reserved, SessionState::ResultsPending | SessionState::Disconnected)
            // From ResultsPending
            | (SessionState::ResultsPending, SessionState::Reserved | SessionState::Disconnected)
        )
    }
}

/// One recorded state transition.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: SessionState,

    /// The state transitioned to.
    pub to: SessionState,

    /// When the transition occurred.
    pub timestamp: Instant,
}

/// State machine tracking the session state, its history and the
/// reservation-expiry countdown.
///
/// Not thread-safe by design: the console is a single logical actor, so
/// the machine lives on one task.
pub struct SessionMachine {
    /// Current session state.
    current_state: SessionState,

    /// When the current state was entered.
    state_entered_at: Instant,

    /// Recent transitions (bounded by `MAX_HISTORY_SIZE`).
    history: VecDeque<StateTransition>,

    /// Countdown deadline mirroring the device-side reservation timeout.
    deadline: Option<Instant>,
}

impl SessionMachine {
    /// Create a machine in the `Disconnected` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_state: SessionState::Disconnected,
            state_entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
            deadline: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn current_state(&self) -> SessionState {
        self.current_state
    }

    /// Time spent in the current state.
    #[must_use]
    pub fn time_in_current_state(&self) -> Duration {
        self.state_entered_at.elapsed()
    }

    /// Transition to `target`, enforcing the transition rules.
    ///
    /// # Errors
    /// Returns `Error::InvalidStateTransition` for a transition the rules
    /// do not allow.
    pub fn transition_to(&mut self, target: SessionState) -> Result<()> {
        if !self.current_state.can_transition_to(target) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: target.to_string(),
            });
        }

        if self.history.len() == MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(StateTransition {
            from: self.current_state,
            to: target,
            timestamp: Instant::now(),
        });

        self.current_state = target;
        self.state_entered_at = Instant::now();
        Ok(())
    }

    /// Recorded transitions, oldest first.
    #[must_use]
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Arm the expiry countdown.
    pub fn arm_countdown(&mut self, timeout: Duration) {
        self.deadline = Some(Instant::now() + timeout);
    }

    /// Cancel the countdown.
    pub fn disarm_countdown(&mut self) {
        self.deadline = None;
    }

    /// Whether the countdown is armed and has elapsed.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Remaining countdown time: `None` when disarmed or already expired.
    #[must_use]
    pub fn time_remaining(&self) -> Option<Duration> {
        self.deadline
            .and_then(|deadline| deadline.checked_duration_since(Instant::now()))
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SessionState::Disconnected, SessionState::Reserved, true)]
    #[case(SessionState::Disconnected, SessionState::ResultsPending, false)]
    #[case(SessionState::Disconnected, SessionState::Disconnected, false)]
    #[case(SessionState::Reserved, SessionState::ResultsPending, true)]
    #[case(SessionState::Reserved, SessionState::Disconnected, true)]
    #[case(SessionState::Reserved, SessionState::Reserved, false)]
    #[case(SessionState::ResultsPending, SessionState::Reserved, true)]
    #[case(SessionState::ResultsPending, SessionState::Disconnected, true)]
    #[case(SessionState::ResultsPending, SessionState::ResultsPending, false)]
    fn test_transition_rules(
        #[case] from: SessionState,
        #[case] to: SessionState,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_machine_enforces_rules() {
        let mut machine = SessionMachine::new();

        assert!(machine.transition_to(SessionState::ResultsPending).is_err());
        assert_eq!(machine.current_state(), SessionState::Disconnected);

        machine.transition_to(SessionState::Reserved).unwrap();
        machine.transition_to(SessionState::ResultsPending).unwrap();
        machine.transition_to(SessionState::Reserved).unwrap();
        machine.transition_to(SessionState::Disconnected).unwrap();

        assert_eq!(machine.history().len(), 4);
        assert_eq!(machine.history()[0].from, SessionState::Disconnected);
        assert_eq!(machine.history()[0].to, SessionState::Reserved);
    }

    #[test]
    fn test_countdown() {
        let mut machine = SessionMachine::new();
        assert!(!machine.has_expired());
        assert!(machine.time_remaining().is_none());

        machine.arm_countdown(Duration::from_secs(60));
        assert!(!machine.has_expired());
        assert!(machine.time_remaining().unwrap() <= Duration::from_secs(60));

        machine.arm_countdown(Duration::ZERO);
        assert!(machine.has_expired());
        assert!(machine.time_remaining().is_none());

        machine.disarm_countdown();
        assert!(!machine.has_expired());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut machine = SessionMachine::new();
        machine.transition_to(SessionState::Reserved).unwrap();

        for _ in 0..MAX_HISTORY_SIZE {
            machine.transition_to(SessionState::ResultsPending).unwrap();
            machine.transition_to(SessionState::Reserved).unwrap();
        }

        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);
    }
}
