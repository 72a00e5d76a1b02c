mod common;

use common::{secs, Harness, EMAIL, PHONE_NO};
use lending_client::models::{SessionStatus, VerificationRequest};
use lending_client::navigation::{NavParams, Screen};
use lending_client::screens::verify_otp::CONTEXT;
use lending_client::screens::{ResendOutcome, SubmitOutcome, VerifyOtpScreen};
use lending_client::services::{MockVerificationService, NoticeKind, SendBehavior};
use tokio_test::{assert_pending, assert_ready};

const COOLDOWN_SECS: u64 = 60;

fn otp_screen(harness: &Harness, request: &VerificationRequest) -> VerifyOtpScreen {
    VerifyOtpScreen::from_params(
        &request.to_params(),
        harness.services(),
        harness.context(),
        secs(COOLDOWN_SECS),
    )
    .unwrap()
}

#[tokio::test]
async fn correct_code_signs_in_and_resets_to_home() {
    let harness = Harness::new(SendBehavior::Sent);
    let context = harness.context();
    let screen = VerifyOtpScreen::from_params(
        &VerificationRequest::phone(PHONE_NO, true).to_params(),
        harness.services(),
        context.clone(),
        secs(COOLDOWN_SECS),
    )
    .unwrap();

    let outcome = screen.submit_code("123456").await;

    assert!(outcome.navigated(), "unexpected outcome: {:?}", outcome);
    assert!(context.is_authenticated().await);
    assert_eq!(context.status().await, SessionStatus::Active);
    assert_eq!(
        context.access_token().await.as_deref(),
        Some("mock-access-token")
    );

    let user = context.user().await.unwrap();
    assert_eq!(user.profile.phone_no, PHONE_NO);

    let history = harness.navigator.history();
    assert_eq!(history, vec![(Screen::Home, NavParams::new(), true)]);
    assert_eq!(harness.service.verify_calls(), vec!["123456".to_string()]);
}

#[tokio::test]
async fn wrong_code_shows_an_error_notice() {
    let harness = Harness::new(SendBehavior::Sent);
    let screen = otp_screen(&harness, &VerificationRequest::phone(PHONE_NO, false));

    let outcome = screen.submit_code("654321").await;

    assert!(matches!(outcome, SubmitOutcome::Stayed));
    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].2, NoticeKind::Error);
    assert!(harness.navigator.history().is_empty());
}

#[tokio::test]
async fn only_the_issued_code_is_accepted() {
    let harness = Harness::with_service(
        MockVerificationService::new(SendBehavior::Sent).with_accepted_code("908172"),
    );
    let context = harness.context();
    let screen = VerifyOtpScreen::from_params(
        &VerificationRequest::phone(PHONE_NO, false).to_params(),
        harness.services(),
        context.clone(),
        secs(COOLDOWN_SECS),
    )
    .unwrap();

    assert!(matches!(screen.submit_code("123456").await, SubmitOutcome::Stayed));
    assert!(!context.is_authenticated().await);

    assert!(screen.submit_code("908172").await.navigated());
    assert!(context.is_authenticated().await);
    assert_eq!(
        harness.service.verify_calls(),
        vec!["123456".to_string(), "908172".to_string()]
    );
}

#[tokio::test]
async fn malformed_code_is_rejected_locally() {
    let harness = Harness::new(SendBehavior::Sent);
    let screen = otp_screen(&harness, &VerificationRequest::phone(PHONE_NO, false));

    let outcome = screen.submit_code("12ab").await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(harness.service.verify_calls().is_empty());
}

#[tokio::test]
async fn backend_failure_is_reported_with_screen_context() {
    let harness = Harness::new(SendBehavior::Fail(500));
    let screen = otp_screen(&harness, &VerificationRequest::phone(PHONE_NO, false));

    let outcome = screen.submit_code("123456").await;

    assert!(matches!(outcome, SubmitOutcome::Failed));
    let reports = harness.errors.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].0, CONTEXT);
    assert!(harness.navigator.history().is_empty());
}

#[tokio::test]
async fn email_target_is_masked() {
    let harness = Harness::new(SendBehavior::Sent);
    let screen = otp_screen(&harness, &VerificationRequest::email(EMAIL, PHONE_NO, false));

    assert_eq!(screen.masked_target(), "abc***@example.com");
    assert_eq!(screen.request().phone_no, PHONE_NO);
}

#[tokio::test]
async fn missing_params_are_rejected() {
    let harness = Harness::new(SendBehavior::Sent);
    let params = NavParams::from([("mode", "verifyPhone")]);

    let result = VerifyOtpScreen::from_params(
        &params,
        harness.services(),
        harness.context(),
        secs(COOLDOWN_SECS),
    );

    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn resend_respects_the_cooldown() {
    let harness = Harness::new(SendBehavior::Sent);
    let screen = otp_screen(&harness, &VerificationRequest::phone(PHONE_NO, false));

    match screen.resend().await {
        ResendOutcome::CoolingDown { remaining } => assert_eq!(remaining, secs(COOLDOWN_SECS)),
        other => panic!("expected cooldown, got {:?}", other),
    }
    assert!(harness.service.phone_calls().is_empty());

    tokio::time::advance(secs(COOLDOWN_SECS)).await;

    assert!(matches!(screen.resend().await, ResendOutcome::Sent));
    assert_eq!(harness.service.phone_calls(), vec![PHONE_NO.to_string()]);
    let notices = harness.notifier.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].2, NoticeKind::Success);

    // The cooldown restarts from the new send.
    assert_eq!(screen.resend_remaining(), secs(COOLDOWN_SECS));
}

#[tokio::test(start_paused = true)]
async fn resend_on_email_channel_sends_both_addresses() {
    let harness = Harness::new(SendBehavior::Sent);
    let screen = otp_screen(&harness, &VerificationRequest::email(EMAIL, PHONE_NO, false));

    tokio::time::advance(secs(COOLDOWN_SECS + 1)).await;

    assert!(matches!(screen.resend().await, ResendOutcome::Sent));
    assert_eq!(
        harness.service.email_calls(),
        vec![(EMAIL.to_string(), PHONE_NO.to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn code_result_after_unmount_is_discarded() {
    let harness = Harness::with_service(
        MockVerificationService::new(SendBehavior::Sent).with_delay(secs(2)),
    );
    let context = harness.context();
    let screen = VerifyOtpScreen::from_params(
        &VerificationRequest::phone(PHONE_NO, false).to_params(),
        harness.services(),
        context.clone(),
        secs(COOLDOWN_SECS),
    )
    .unwrap();

    let mut submit = tokio_test::task::spawn(screen.submit_code("123456"));
    assert_pending!(submit.poll());

    screen.unmount();
    let outcome = assert_ready!(submit.poll());

    assert!(matches!(outcome, SubmitOutcome::Discarded));
    assert!(!context.is_authenticated().await);
    assert!(harness.navigator.history().is_empty());
}
