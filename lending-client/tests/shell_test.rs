mod common;

use common::{secs, Harness};
use lending_client::config::SessionSettings;
use lending_client::navigation::{RouteSource, Screen};
use lending_client::services::SendBehavior;
use lending_client::shell::{ConsoleNavigator, ConsoleNotifier, Shell};
use lending_client::AppState;
use std::sync::Arc;

fn shell_with(harness: &Harness) -> (Shell, Arc<ConsoleNavigator>) {
    let navigator = Arc::new(ConsoleNavigator::new(Screen::Login));
    let state = AppState::new(
        &SessionSettings::default(),
        harness.service.clone(),
        navigator.clone(),
        navigator.clone(),
        Arc::new(ConsoleNotifier),
        harness.errors.clone(),
        harness.credentials.clone(),
    );
    (Shell::new(state, navigator.clone(), secs(60)), navigator)
}

#[tokio::test]
async fn scripted_device_verification_signs_in() {
    let harness = Harness::new(SendBehavior::Sent);
    let (mut shell, navigator) = shell_with(&harness);

    let script = b"device 99112233 abcdef@example.com\nremember on\nverify email\ncode 123456\nquit\n";
    shell.run(&script[..]).await.unwrap();

    assert_eq!(navigator.current_path(), Screen::Home.path());
    assert!(shell.state().context.is_authenticated().await);
    assert_eq!(
        harness.service.email_calls(),
        vec![("abcdef@example.com".to_string(), "99112233".to_string())]
    );
    assert!(!shell.state().monitor.is_running());
}

#[tokio::test]
async fn commands_out_of_context_are_ignored() {
    let harness = Harness::new(SendBehavior::Sent);
    let (mut shell, navigator) = shell_with(&harness);

    let script = b"verify phone\ncode 123456\nbogus\ngoto /loans\n";
    shell.run(&script[..]).await.unwrap();

    assert_eq!(navigator.current_path(), Screen::Loans.path());
    assert!(harness.service.phone_calls().is_empty());
    assert!(harness.service.verify_calls().is_empty());
    assert!(!shell.state().context.is_authenticated().await);
}

#[tokio::test]
async fn declined_send_stays_on_device_screen() {
    let harness = Harness::new(SendBehavior::Declined);
    let (mut shell, navigator) = shell_with(&harness);

    let script = b"device 99112233\nverify phone\nverify email\n";
    shell.run(&script[..]).await.unwrap();

    assert_eq!(navigator.current_path(), Screen::VerifyDevice.path());
    assert_eq!(harness.service.phone_calls().len(), 1);
    assert!(harness.service.email_calls().is_empty());
}
