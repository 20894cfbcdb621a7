use chrono::Duration;
use rand::Rng;
use std::sync::Arc;

use super::session;
use crate::{
    modules::{
        auth::repository::{self, otp::EmailVerificationCode, session::Session},
        notification::{self, service::Notification},
        user::{self, repository::User},
    },
    types::Context,
};

pub const CODE_LENGTH: usize = 6;
pub const CODE_VALIDITY_MINUTES: i64 = 10;

const DEFAULT_NAME: &str = "User";
const DEFAULT_COUNTRY: &str = "Unknown";

pub fn generate_code() -> String {
    rand::thread_rng()
        .gen_range(100_000..=999_999u32)
        .to_string()
}

/// The local part of the email, or a placeholder when it is empty.
pub fn default_name_for(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string()
}

#[derive(Debug)]
pub enum IssueError {
    NotSent,
    UnexpectedError,
}

pub struct IssuePayload {
    pub email: String,
    pub name: Option<String>,
    pub country: Option<String>,
}

async fn register(
    ctx: &Context,
    payload: user::repository::CreateUserPayload,
) -> Result<User, user::repository::Error> {
    let email = payload.email.clone();
    match user::repository::create(&ctx.db_conn, payload).await {
        Ok(user) => Ok(user),
        // someone else registered the email in the meantime
        Err(err) => user::repository::find_by_email(&ctx.db_conn, &email)
            .await?
            .ok_or(err),
    }
}

async fn find_or_register(ctx: &Context, payload: &IssuePayload) -> Result<User, IssueError> {
    let existing = user::repository::find_by_email(&ctx.db_conn, &payload.email)
        .await
        .map_err(|_| IssueError::UnexpectedError)?;

    let user = match existing {
        Some(user) => user,
        None => {
            return register(
                ctx,
                user::repository::CreateUserPayload {
                    email: payload.email.clone(),
                    name: payload.name.clone(),
                    country: payload.country.clone(),
                    email_verified: false,
                },
            )
            .await
            .map_err(|_| IssueError::UnexpectedError)
        }
    };

    let name = payload.name.clone().filter(|_| user.name.is_none());
    let country = payload.country.clone().filter(|_| user.country.is_none());
    if name.is_none() && country.is_none() {
        return Ok(user);
    }

    user::repository::update_by_id(
        &ctx.db_conn,
        &user.id,
        user::repository::UpdateUserPayload {
            name,
            country,
            email_verified: None,
        },
    )
    .await
    .map_err(|_| IssueError::UnexpectedError)
}

/// Replaces any outstanding code for the email with a fresh one and mails it.
///
/// A code whose email could not be handed to the mailer is deleted again
/// before the error is returned.
pub async fn issue(
    ctx: Arc<Context>,
    payload: IssuePayload,
) -> Result<EmailVerificationCode, IssueError> {
    let user = find_or_register(&ctx, &payload).await?;

    let code = repository::otp::replace(
        &ctx.db_conn,
        repository::otp::CreateCodePayload {
            email: payload.email,
            code: generate_code(),
            expires_at: ctx.clock.now() + Duration::minutes(CODE_VALIDITY_MINUTES),
            user_id: Some(user.id),
        },
    )
    .await
    .map_err(|_| IssueError::UnexpectedError)?;

    let notification =
        Notification::verification_code_requested(code.email.clone(), code.code.clone());
    if notification::service::send(ctx.clone(), notification)
        .await
        .is_err()
    {
        tracing::error!("Verification code for {} could not be delivered", code.email);
        repository::otp::delete_by_id(&ctx.db_conn, &code.id)
            .await
            .ok();
        return Err(IssueError::NotSent);
    }

    Ok(code)
}

#[derive(Debug, PartialEq, Eq)]
pub enum VerificationError {
    InvalidCodeLength {
        master_code_configured: bool,
    },
    InvalidOrExpiredCode {
        user_exists: bool,
        master_code_configured: bool,
    },
    UserNotFound,
    UnexpectedError,
}

impl VerificationError {
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCodeLength {
                master_code_configured,
            } => {
                let mut message = format!("Verification code must be {} digits.", CODE_LENGTH);
                if *master_code_configured {
                    message.push_str(" Or use the master code if configured.");
                }
                message
            }
            Self::InvalidOrExpiredCode {
                user_exists: true,
                master_code_configured,
            } => {
                let mut message = String::from(
                    "Invalid or expired verification code. Please request a new code.",
                );
                if *master_code_configured {
                    message.push_str(
                        " Or if you have a master code configured, make sure you're using it correctly.",
                    );
                }
                message
            }
            Self::InvalidOrExpiredCode {
                user_exists: false,
                ..
            } => String::from(
                "Invalid or expired verification code. Please send a verification code first and ensure you've provided your name and country during registration.",
            ),
            Self::UserNotFound => String::from(
                "User not found. Please send a verification code with your name and country to register first.",
            ),
            Self::UnexpectedError => String::from("Failed to verify code"),
        }
    }
}

pub struct VerifyPayload {
    pub email: String,
    pub code: String,
}

pub struct Verified {
    pub user: User,
    pub session: Session,
}

async fn verify_with_master_code(ctx: &Context, email: &str) -> Result<User, VerificationError> {
    let existing = user::repository::find_by_email(&ctx.db_conn, email)
        .await
        .map_err(|_| VerificationError::UnexpectedError)?;

    match existing {
        Some(user) if user.email_verified => Ok(user),
        Some(user) => user::repository::verify_email_by_id(&ctx.db_conn, &user.id)
            .await
            .map_err(|_| VerificationError::UnexpectedError),
        None => {
            let user = register(
                ctx,
                user::repository::CreateUserPayload {
                    email: email.to_string(),
                    name: Some(default_name_for(email)),
                    country: Some(DEFAULT_COUNTRY.to_string()),
                    email_verified: true,
                },
            )
            .await
            .map_err(|_| VerificationError::UnexpectedError)?;

            match user.email_verified {
                true => Ok(user),
                false => user::repository::verify_email_by_id(&ctx.db_conn, &user.id)
                    .await
                    .map_err(|_| VerificationError::UnexpectedError),
            }
        }
    }
}

async fn verify_with_code(
    ctx: &Context,
    payload: &VerifyPayload,
    master_code_configured: bool,
) -> Result<User, VerificationError> {
    if payload.code.chars().count() != CODE_LENGTH {
        return Err(VerificationError::InvalidCodeLength {
            master_code_configured,
        });
    }

    let code = repository::otp::find_live(
        &ctx.db_conn,
        &payload.email,
        &payload.code,
        ctx.clock.now(),
    )
    .await
    .map_err(|_| VerificationError::UnexpectedError)?;

    let code = match code {
        Some(code) => code,
        None => {
            let user_exists = user::repository::find_by_email(&ctx.db_conn, &payload.email)
                .await
                .map_err(|_| VerificationError::UnexpectedError)?
                .is_some();

            return Err(VerificationError::InvalidOrExpiredCode {
                user_exists,
                master_code_configured,
            });
        }
    };

    let owner = match &code.user_id {
        Some(user_id) => user::repository::find_by_id(&ctx.db_conn, user_id)
            .await
            .map_err(|_| VerificationError::UnexpectedError)?,
        None => None,
    };
    let user = match owner {
        Some(user) => user,
        None => user::repository::find_by_email(&ctx.db_conn, &payload.email)
            .await
            .map_err(|_| VerificationError::UnexpectedError)?
            .ok_or(VerificationError::UserNotFound)?,
    };

    // a concurrent verification may have consumed the code first
    let consumed = repository::otp::delete_by_id(&ctx.db_conn, &code.id)
        .await
        .map_err(|_| VerificationError::UnexpectedError)?;
    if !consumed {
        return Err(VerificationError::InvalidOrExpiredCode {
            user_exists: true,
            master_code_configured,
        });
    }

    user::repository::verify_email_by_id(&ctx.db_conn, &user.id)
        .await
        .map_err(|_| VerificationError::UnexpectedError)
}

/// Authenticates the email with the master code or an issued code and opens a
/// new session for the user.
pub async fn verify(
    ctx: Arc<Context>,
    payload: VerifyPayload,
) -> Result<Verified, VerificationError> {
    let master_code = ctx.auth.master_code.as_deref();

    let user = match master_code {
        Some(master_code) if master_code == payload.code => {
            tracing::info!("Master code used to sign in {}", payload.email);
            verify_with_master_code(&ctx, &payload.email).await?
        }
        _ => verify_with_code(&ctx, &payload, master_code.is_some()).await?,
    };

    let session = session::create(ctx.clone(), user.id.clone())
        .await
        .map_err(|_| VerificationError::UnexpectedError)?;

    Ok(Verified { user, session })
}
