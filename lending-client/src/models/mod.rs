pub mod session;
pub mod verification;

pub use session::{AuthSession, AuthTokens, SessionStatus, SignedInUser, UserProfile};
pub use verification::{Channel, VerificationRequest};
