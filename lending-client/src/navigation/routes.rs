use serde::{Deserialize, Serialize};
use std::fmt;

/// Navigable screens of the app, keyed by their route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    Login,
    Register,
    ResetPassword,
    RenewAccount,
    VerifyDevice,
    Onboarding,
    VerifyOtp,
    Home,
    Loans,
    Notifications,
    Settings,
    Contract,
}

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::Login,
        Screen::Register,
        Screen::ResetPassword,
        Screen::RenewAccount,
        Screen::VerifyDevice,
        Screen::Onboarding,
        Screen::VerifyOtp,
        Screen::Home,
        Screen::Loans,
        Screen::Notifications,
        Screen::Settings,
        Screen::Contract,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Screen::Login => "/login",
            Screen::Register => "/register",
            Screen::ResetPassword => "/reset-password",
            Screen::RenewAccount => "/renew-account",
            Screen::VerifyDevice => "/verify-device",
            Screen::Onboarding => "/onboarding",
            Screen::VerifyOtp => "/verify-otp",
            Screen::Home => "/home",
            Screen::Loans => "/loans",
            Screen::Notifications => "/notifications",
            Screen::Settings => "/settings",
            Screen::Contract => "/contract",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|screen| screen.path() == path)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Routes where an idle timeout must not force a logout: the user is
/// already outside an authenticated session.
pub const EXEMPT_ROUTES: [&str; 7] = [
    "/login",
    "/register",
    "/reset-password",
    "/renew-account",
    "/verify-device",
    "/onboarding",
    "/verify-otp",
];

/// Exact string match; no prefix or case folding.
pub fn is_exempt_route(path: &str) -> bool {
    EXEMPT_ROUTES.contains(&path)
}
