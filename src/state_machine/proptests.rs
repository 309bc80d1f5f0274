//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use crate::llm::{MessageRole, RelayError};
use crate::session::Session;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ?!]{0,24}"
}

fn arb_non_blank_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9?!]{1,12}( [a-zA-Z0-9?!]{1,12}){0,3}"
}

fn arb_relay_error() -> impl Strategy<Value = RelayError> {
    prop_oneof![
        Just(RelayError::rate_limited()),
        Just(RelayError::payment_required()),
        Just(RelayError::configuration("LOVABLE_API_KEY is not configured")),
        "[a-z ]{1,20}".prop_map(RelayError::upstream),
        "[a-z ]{1,20}".prop_map(RelayError::network),
    ]
}

fn arb_state() -> impl Strategy<Value = ChatState> {
    prop_oneof![Just(ChatState::Idle), Just(ChatState::Awaiting)]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_text().prop_map(|text| Event::Submit { text }),
        "[ \t\n]{0,4}".prop_map(|text| Event::Submit { text }),
        arb_non_blank_text().prop_map(|text| Event::RelaySucceeded { text }),
        arb_relay_error().prop_map(|error| Event::RelayFailed { error }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn successful_exchanges_alternate(
        exchanges in proptest::collection::vec((arb_non_blank_text(), arb_non_blank_text()), 0..12)
    ) {
        let mut session = Session::new();
        for (question, answer) in &exchanges {
            session.submit(question).unwrap();
            prop_assert!(session.resolve(Ok(answer.clone())).unwrap().is_none());
        }

        let turns = session.transcript().turns();
        prop_assert_eq!(turns.len(), 1 + 2 * exchanges.len());
        prop_assert_eq!(turns[0].role, MessageRole::Assistant);
        for (i, (question, answer)) in exchanges.iter().enumerate() {
            let user = &turns[1 + 2 * i];
            let assistant = &turns[2 + 2 * i];
            prop_assert_eq!(user.role, MessageRole::User);
            prop_assert_eq!(&user.content, question);
            prop_assert_eq!(assistant.role, MessageRole::Assistant);
            prop_assert_eq!(&assistant.content, answer);
        }
        prop_assert_eq!(session.state(), ChatState::Idle);
    }

    #[test]
    fn blank_submit_is_a_no_op(state in arb_state(), blank in "[ \t\n]{0,6}") {
        prop_assert_eq!(
            transition(state, Event::Submit { text: blank }),
            Err(TransitionError::EmptyMessage)
        );
    }

    #[test]
    fn transitions_always_land_in_a_sensible_state(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(state, event.clone()) {
            match event {
                Event::Submit { .. } => prop_assert_eq!(result.new_state, ChatState::Awaiting),
                Event::RelaySucceeded { .. } | Event::RelayFailed { .. } => {
                    prop_assert_eq!(result.new_state, ChatState::Idle);
                }
            }
            let relay_requests = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::RequestRelay))
                .count();
            prop_assert!(relay_requests <= 1);
        }
    }

    #[test]
    fn session_invariants_hold_for_any_event_sequence(
        events in proptest::collection::vec(arb_event(), 0..40)
    ) {
        let mut session = Session::new();

        for event in events {
            let before_state = session.state();
            let before_turns = session.transcript().turns().to_vec();
            let before_typing = session.transcript().is_typing();

            match session.dispatch(event.clone()) {
                Err(_) => {
                    // Rejected events change nothing
                    prop_assert_eq!(session.state(), before_state);
                    prop_assert_eq!(session.transcript().turns(), &before_turns[..]);
                    prop_assert_eq!(session.transcript().is_typing(), before_typing);
                }
                Ok(dispatch) => {
                    let turns = session.transcript().turns();
                    prop_assert_eq!(&turns[..before_turns.len()], &before_turns[..]);
                    match event {
                        Event::Submit { text } => {
                            prop_assert_eq!(turns.len(), before_turns.len() + 1);
                            prop_assert_eq!(&turns[turns.len() - 1].content, &text);
                            prop_assert_eq!(
                                dispatch.relay_request,
                                Some(session.transcript().snapshot())
                            );
                        }
                        Event::RelaySucceeded { .. } => {
                            prop_assert_eq!(turns.len(), before_turns.len() + 1);
                            prop_assert!(dispatch.relay_request.is_none());
                        }
                        Event::RelayFailed { .. } => {
                            prop_assert_eq!(turns.len(), before_turns.len());
                            prop_assert_eq!(dispatch.notices.len(), 1);
                        }
                    }
                }
            }

            // Structural invariants
            let transcript = session.transcript();
            prop_assert_eq!(session.is_awaiting(), transcript.is_typing());
            if session.is_awaiting() {
                prop_assert_eq!(transcript.last().map(|t| t.role), Some(MessageRole::User));
            }
            prop_assert!(transcript.turns().iter().all(|t| !t.content.is_empty()));
            prop_assert!(transcript.turns().windows(2).all(|w| w[0].id < w[1].id));
        }
    }
}
