use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use parley_core::{ContactExport, ContactProfile};
use parley_ui::{App, AppState, EventHandler};
use std::collections::HashMap;
use std::path::Path;

fn create_app_from_sample() -> App {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/contact_sample.json");
    let export = ContactExport::from_file(&fixture).expect("sample fixture loads");
    let (start, events) = export.decode().expect("sample fixture decodes");

    let contacts = ContactProfile::directory(&events, &HashMap::new(), &HashMap::new());
    let session = parley_core::TranscriptSession::new(start, events, "CUSTOMER");
    App::new(AppState::new(session, contacts, "%H:%M:%S"))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        if let Some(action) = EventHandler::handle_key_event(event, app.state_mut()) {
            app.apply_action(action);
        }
    }
}

fn press(app: &mut App, code: KeyCode) {
    let event = KeyEvent::new(code, KeyModifiers::NONE);
    if let Some(action) = EventHandler::handle_key_event(event, app.state_mut()) {
        app.apply_action(action);
    }
}

fn press_ctrl(app: &mut App, c: char) {
    let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
    if let Some(action) = EventHandler::handle_key_event(event, app.state_mut()) {
        app.apply_action(action);
    }
}

#[test]
fn test_sample_fixture_groups() {
    let app = create_app_from_sample();

    // 9 recorded events in 7 maximal speaker runs
    assert_eq!(app.state().session.len(), 9);
    let groups = app.state().groups();
    assert_eq!(groups.len(), 7);

    let total_messages: usize = groups.iter().map(|g| g.messages.len()).sum();
    assert_eq!(total_messages, 9);

    assert_eq!(groups[0].sender_id, "AGENT");
    assert_eq!(groups[0].messages[0].display_time, "14:02:11");

    // contacts derived in order of first appearance
    let ids: Vec<&str> = app.state().contacts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["AGENT", "CUSTOMER"]);
}

#[test]
fn test_send_flow_end_to_end() {
    let mut app = create_app_from_sample();
    let groups_before = app.state().groups().len();

    type_text(&mut app, "Thanks for the quick help!");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.state().session.len(), 10);
    assert!(app.state().input.is_empty());
    assert!(app.state().chat.is_at_bottom());

    // the sample ends with an AGENT message, so the draft opens a new group
    let groups = app.state().groups();
    assert_eq!(groups.len(), groups_before + 1);
    let last = groups.last().unwrap();
    assert_eq!(last.sender_id, "CUSTOMER");
    assert_eq!(last.messages.last().unwrap().text, "Thanks for the quick help!");

    // a second draft joins the group just opened
    type_text(&mut app, "Bye!");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().groups().len(), groups_before + 1);
}

#[test]
fn test_end_chat_flow() {
    let mut app = create_app_from_sample();

    type_text(&mut app, "half-typed draft");
    press_ctrl(&mut app, 'e');

    assert!(app.state().session.is_empty());
    assert!(app.state().input.is_empty());
    assert!(app.state().groups().is_empty());
}

#[test]
fn test_panel_toggles_and_selection() {
    let mut app = create_app_from_sample();

    press_ctrl(&mut app, 'p');
    assert!(app.state().profile_visible);
    assert_eq!(app.state().selected_contact().unwrap().id, "AGENT");

    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.state().selected_contact().unwrap().id, "CUSTOMER");

    press_ctrl(&mut app, 'b');
    assert!(!app.state().contacts_visible);
    assert!(app.state().profile_visible);

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().any_panel_open());
    assert!(!app.state().should_exit);

    press(&mut app, KeyCode::Esc);
    assert!(app.state().should_exit);
}

#[test]
fn test_scroll_snaps_to_bottom_on_send() {
    let mut app = create_app_from_sample();

    press(&mut app, KeyCode::PageUp);
    assert!(!app.state().chat.is_at_bottom());

    type_text(&mut app, "back to the latest");
    press(&mut app, KeyCode::Enter);
    assert!(app.state().chat.is_at_bottom());
}
