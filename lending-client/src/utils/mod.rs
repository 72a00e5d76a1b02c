pub mod guard;
pub mod mask;
pub mod sync;

pub use guard::{ScreenScope, SubmitGuard, SubmitPermit};
pub use mask::mask_email;
pub use sync::lock;
