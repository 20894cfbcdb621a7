pub use crate::utils::config::Config;
pub use crate::utils::database;
use crate::{
    modules::notification::service::email::{Mailer, Outbox, ResendMailer},
    utils::{
        clock::{Clock, SystemClock},
        config::MailDriver,
    },
};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: &str) -> Self {
        match raw_environment {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone)]
pub struct AuthContext {
    pub master_code: Option<String>,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub auth: AuthContext,
    pub mailer: Arc<dyn Mailer>,
    pub clock: Arc<dyn Clock>,
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, database::Error>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, database::Error> {
        let db_conn = database::connect(self.database.url.as_str()).await?;
        database::migrate(&db_conn).await?;

        let mailer: Arc<dyn Mailer> = match self.mail.driver {
            MailDriver::Resend { api_key } => Arc::new(ResendMailer::new(api_key, self.mail.sender)),
            MailDriver::Log => {
                tracing::warn!("MAIL_DRIVER=log, verification emails are only logged");
                Arc::new(Outbox::new())
            }
        };

        if self.auth.master_code.is_some() {
            tracing::warn!("A master code is configured, it signs in any email address");
        }

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            auth: AuthContext {
                master_code: self.auth.master_code,
            },
            mailer,
            clock: Arc::new(SystemClock),
        })
    }
}
