pub mod email;

use crate::types::Context;
use std::sync::Arc;

pub mod types {
    #[derive(Clone, Debug)]
    pub struct VerificationCodeRequested {
        pub email: String,
        pub code: String,
    }
}

#[derive(Clone, Debug)]
pub enum Notification {
    VerificationCodeRequested(types::VerificationCodeRequested),
}

impl Notification {
    pub fn verification_code_requested(email: String, code: String) -> Self {
        Notification::VerificationCodeRequested(types::VerificationCodeRequested { email, code })
    }
}

#[derive(Debug)]
pub enum Error {
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    email::send(ctx.mailer.clone(), notification).await
}
