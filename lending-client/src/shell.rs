//! Headless console shell.
//!
//! Drives the session and verification logic from line commands, one
//! command per line. Every line counts as user activity for the idle
//! monitor.

use crate::models::verification::{PARAM_EMAIL, PARAM_PHONE_NO};
use crate::models::Channel;
use crate::navigation::{NavParams, Navigator, RouteSource, Screen};
use crate::screens::{ResendOutcome, SubmitOutcome, VerifyDeviceScreen, VerifyOtpScreen};
use crate::services::{NoticeKind, Notifier};
use crate::utils::lock;
use crate::AppState;
use client_core::ClientError;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
commands:
  tap                       register a touch
  goto <route>              open a screen, e.g. goto /home
  device <phone> [email]    open device verification
  remember on|off           toggle 'remember this device'
  verify phone|email        request a verification code
  code <digits>             submit the received code
  resend                    request a new code
  state                     show session and idle timer state
  help                      show this text
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tap,
    Goto(Screen),
    Device {
        phone_no: String,
        email: Option<String>,
    },
    Remember(bool),
    Verify(Channel),
    Code(String),
    Resend,
    State,
    Help,
    Quit,
}

fn bad_command(message: String) -> ClientError {
    ClientError::BadRequest(anyhow::anyhow!(message))
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Tap);
        };
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("tap", []) => Ok(Command::Tap),
            ("goto", [route]) => Screen::from_path(route)
                .map(Command::Goto)
                .ok_or_else(|| bad_command(format!("Unknown route: {}", route))),
            ("device", [phone_no]) => Ok(Command::Device {
                phone_no: phone_no.to_string(),
                email: None,
            }),
            ("device", [phone_no, email]) => Ok(Command::Device {
                phone_no: phone_no.to_string(),
                email: Some(email.to_string()),
            }),
            ("remember", ["on"]) => Ok(Command::Remember(true)),
            ("remember", ["off"]) => Ok(Command::Remember(false)),
            ("verify", ["phone"]) => Ok(Command::Verify(Channel::Phone)),
            ("verify", ["email"]) => Ok(Command::Verify(Channel::Email)),
            ("code", [code]) => Ok(Command::Code(code.to_string())),
            ("resend", []) => Ok(Command::Resend),
            ("state", []) => Ok(Command::State),
            ("help", []) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            _ => Err(bad_command(format!("Unrecognized command: {}", line.trim()))),
        }
    }
}

/// Navigator that prints transitions and remembers the current screen
/// together with the parameters it was opened with.
pub struct ConsoleNavigator {
    current: Mutex<(String, NavParams)>,
}

impl ConsoleNavigator {
    pub fn new(initial: Screen) -> Self {
        Self {
            current: Mutex::new((initial.path().to_string(), NavParams::new())),
        }
    }

    pub fn current_params(&self) -> NavParams {
        lock(&self.current).1.clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, screen: Screen, params: NavParams, reset_stack: bool) {
        let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("-> {} [{}]{}", screen, rendered.join(", "), if reset_stack { " (reset)" } else { "" });
        tracing::info!(screen = %screen, reset_stack, "Navigated");
        *lock(&self.current) = (screen.path().to_string(), params);
    }
}

impl RouteSource for ConsoleNavigator {
    fn current_path(&self) -> String {
        lock(&self.current).0.clone()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str, kind: NoticeKind) {
        println!("[{}] {}: {}", kind, title, message);
    }
}

pub struct Shell {
    state: AppState,
    navigator: Arc<ConsoleNavigator>,
    resend_cooldown: Duration,
    device: Option<VerifyDeviceScreen>,
    otp: Option<VerifyOtpScreen>,
}

impl Shell {
    pub fn new(
        state: AppState,
        navigator: Arc<ConsoleNavigator>,
        resend_cooldown: Duration,
    ) -> Self {
        Self {
            state,
            navigator,
            resend_cooldown,
            device: None,
            otp: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Read commands until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ClientError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.state.monitor.start()?;
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            self.state.monitor.record_activity();

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(e) => println!("{}", e),
            }
            self.sync_screens();
        }

        self.state.monitor.stop();
        Ok(())
    }

    pub async fn execute(&mut self, command: Command) {
        match command {
            Command::Tap | Command::Quit => {}
            Command::Goto(screen) => {
                self.state
                    .services
                    .navigator
                    .navigate(screen, NavParams::new(), false);
            }
            Command::Device { phone_no, email } => {
                if let Some(screen) = self.device.take() {
                    screen.unmount();
                }
                let mut params = NavParams::new().with(PARAM_PHONE_NO, phone_no);
                if let Some(email) = email {
                    params.insert(PARAM_EMAIL, email);
                }
                self.state
                    .services
                    .navigator
                    .navigate(Screen::VerifyDevice, params, false);
            }
            Command::Remember(remember) => match &self.device {
                Some(screen) => screen.set_remember_device(remember),
                None => println!("Not on the device verification screen"),
            },
            Command::Verify(channel) => match &self.device {
                Some(screen) => {
                    let outcome = screen.submit(channel).await;
                    print_submit(&outcome);
                }
                None => println!("Not on the device verification screen"),
            },
            Command::Code(code) => match &self.otp {
                Some(screen) => {
                    let outcome = screen.submit_code(&code).await;
                    print_submit(&outcome);
                }
                None => println!("Not on the code entry screen"),
            },
            Command::Resend => match &self.otp {
                Some(screen) => match screen.resend().await {
                    ResendOutcome::CoolingDown { remaining } => {
                        println!("Wait {}s before requesting a new code", remaining.as_secs())
                    }
                    outcome => println!("{:?}", outcome),
                },
                None => println!("Not on the code entry screen"),
            },
            Command::State => {
                println!("route:   {}", self.navigator.current_path());
                println!("session: {:?}", self.state.context.status().await);
                println!("idle:    {:?}", self.state.monitor.state());
                if let Some(user) = self.state.context.user().await {
                    println!("user:    {}", user.profile.display_name());
                }
            }
            Command::Help => println!("{}", HELP),
        }
    }

    /// Mount the controller for the screen now shown; unmount the rest.
    fn sync_screens(&mut self) {
        let path = self.navigator.current_path();

        if path == Screen::VerifyDevice.path() {
            if self.device.is_none() {
                match VerifyDeviceScreen::from_params(
                    &self.navigator.current_params(),
                    self.state.services.clone(),
                ) {
                    Ok(screen) => {
                        let channels: Vec<String> =
                            screen.available_channels().iter().map(|c| c.to_string()).collect();
                        println!("Verify this device via: {}", channels.join(" | "));
                        if let Some(masked) = screen.masked_email() {
                            println!("Email on file: {}", masked);
                        }
                        self.device = Some(screen);
                    }
                    Err(e) => println!("{}", e),
                }
            }
        } else if let Some(screen) = self.device.take() {
            screen.unmount();
        }

        if path == Screen::VerifyOtp.path() {
            if self.otp.is_none() {
                match VerifyOtpScreen::from_params(
                    &self.navigator.current_params(),
                    self.state.services.clone(),
                    self.state.context.clone(),
                    self.resend_cooldown,
                ) {
                    Ok(screen) => {
                        println!("Enter the code sent to {}", screen.masked_target());
                        self.otp = Some(screen);
                    }
                    Err(e) => println!("{}", e),
                }
            }
        } else if let Some(screen) = self.otp.take() {
            screen.unmount();
        }
    }
}

fn print_submit(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Invalid(errors) => println!("Invalid input: {}", errors),
        other => println!("{:?}", other),
    }
}
