//! Interaction state machines
//!
//! Flat finite state machines for per-element interaction states. Events
//! with no matching transition from the current state are ignored, which
//! is what makes stale callbacks harmless.

use std::collections::VecDeque;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Number of transitions kept in [`StateMachine::history`]
pub const HISTORY_LIMIT: usize = 32;

/// `from_state --event--> to_state`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Chainable construction of a [`StateMachine`]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Shorthand for `transition(Transition::new(from, event, to))`
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// Current state plus its transition table
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: Vec<Transition>,
    /// Most recent transitions, oldest first
    history: VecDeque<(StateId, EventId, StateId)>,
}

impl StateMachine {
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Recent transitions, oldest first. Bounded by [`HISTORY_LIMIT`] so
    /// machines that live for the whole session do not grow.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &(StateId, EventId, StateId)> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Whether `event` would change state right now
    pub fn can_send(&self, event: EventId) -> bool {
        self.find(event).is_some()
    }

    /// Deliver an event and return the resulting state. Unmatched events
    /// leave the machine untouched and are not recorded.
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;
        let Some(to_state) = self.find(event).map(|t| t.to_state) else {
            return current;
        };

        self.current_state = to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back((current, event, to_state));

        to_state
    }

    fn find(&self, event: EventId) -> Option<&Transition> {
        let current = self.current_state;
        self.transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const HOVERING: StateId = 1;
    const RETURNING: StateId = 2;

    const ENTER: EventId = 1;
    const LEAVE: EventId = 2;
    const SETTLED: EventId = 3;

    fn hover_machine() -> StateMachine {
        StateMachine::builder(IDLE)
            .on(IDLE, ENTER, HOVERING)
            .on(HOVERING, LEAVE, RETURNING)
            .on(RETURNING, SETTLED, IDLE)
            .on(RETURNING, ENTER, HOVERING)
            .build()
    }

    #[test]
    fn test_full_hover_cycle() {
        let mut fsm = hover_machine();
        assert!(fsm.is_in(IDLE));
        assert_eq!(fsm.send(ENTER), HOVERING);
        assert_eq!(fsm.send(LEAVE), RETURNING);
        assert_eq!(fsm.send(SETTLED), IDLE);
    }

    #[test]
    fn test_unmatched_events_are_ignored() {
        let mut fsm = hover_machine();
        assert_eq!(fsm.send(LEAVE), IDLE);
        assert_eq!(fsm.send(SETTLED), IDLE);
        assert_eq!(fsm.history().len(), 0);

        fsm.send(ENTER);
        assert_eq!(fsm.send(ENTER), HOVERING);
        assert_eq!(fsm.history().len(), 1);
    }

    #[test]
    fn test_reenter_while_returning() {
        let mut fsm = hover_machine();
        fsm.send(ENTER);
        fsm.send(LEAVE);
        assert!(fsm.can_send(ENTER));
        assert!(!fsm.can_send(LEAVE));
        assert_eq!(fsm.send(ENTER), HOVERING);
    }

    #[test]
    fn test_explicit_transitions() {
        let mut fsm = StateMachine::new(IDLE, vec![Transition::new(IDLE, ENTER, HOVERING)]);
        assert_eq!(fsm.send(ENTER), HOVERING);
        assert!(!fsm.can_send(ENTER));
    }

    #[test]
    fn test_history_records_and_clears() {
        let mut fsm = hover_machine();
        fsm.send(ENTER);
        fsm.send(LEAVE);

        let history: Vec<_> = fsm.history().copied().collect();
        assert_eq!(history, vec![(IDLE, ENTER, HOVERING), (HOVERING, LEAVE, RETURNING)]);

        fsm.clear_history();
        assert_eq!(fsm.history().len(), 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = hover_machine();
        for _ in 0..HISTORY_LIMIT {
            fsm.send(ENTER);
            fsm.send(LEAVE);
            fsm.send(SETTLED);
        }

        assert_eq!(fsm.history().len(), HISTORY_LIMIT);
        assert_eq!(fsm.history().last().copied(), Some((RETURNING, SETTLED, IDLE)));
    }
}
