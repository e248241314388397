use super::*;

#[test]
fn default_state_is_empty() {
    let state = ChatState::default();
    assert!(state.messages.is_empty());
    assert!(state.composer.is_empty());
}

// =============================================================================
// Inbound messages
// =============================================================================

#[test]
fn recv_message_appends_exactly_one_delivered_message() {
    let mut state = ChatState::default();
    state.recv_message("hi".to_owned(), 1_000);

    assert_eq!(state.messages.len(), 1);
    let message = &state.messages[0];
    assert_eq!(message.content, "hi");
    assert_eq!(message.sender, "Remote");
    assert_eq!(message.status, DeliveryStatus::Delivered);
    assert!(!message.is_me);
    assert_eq!(message.timestamp_ms, 1_000);
    assert_eq!(message.id, "1000");
}

// =============================================================================
// Local sends
// =============================================================================

#[test]
fn local_send_appends_sending_message_and_clears_composer() {
    let mut state = ChatState::default();
    state.composer = "ping".to_owned();

    let sent = state.local_send(2_000);
    assert_eq!(sent.as_deref(), Some("ping"));
    assert!(state.composer.is_empty());

    assert_eq!(state.messages.len(), 1);
    let message = &state.messages[0];
    assert_eq!(message.content, "ping");
    assert_eq!(message.sender, "You");
    assert_eq!(message.status, DeliveryStatus::Sending);
    assert!(message.is_me);
}

#[test]
fn blank_composer_sends_nothing() {
    let mut state = ChatState::default();
    state.composer = "   ".to_owned();

    assert_eq!(state.local_send(1_000), None);
    assert!(state.messages.is_empty());
    // The composer is left alone so the user's whitespace is not eaten.
    assert_eq!(state.composer, "   ");
}

#[test]
fn two_rapid_sends_append_in_call_order() {
    let mut state = ChatState::default();
    state.composer = "first".to_owned();
    state.local_send(1_000);
    state.composer = "second".to_owned();
    state.local_send(1_001);

    let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
}

#[test]
fn inbound_and_local_messages_interleave_in_arrival_order() {
    let mut state = ChatState::default();
    state.recv_message("one".to_owned(), 1);
    state.composer = "two".to_owned();
    state.local_send(2);
    state.recv_message("three".to_owned(), 3);

    let contents: Vec<&str> = state.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert!(!state.messages[0].is_me);
    assert!(state.messages[1].is_me);
}
