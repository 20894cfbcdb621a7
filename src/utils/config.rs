use crate::types::AppEnvironment;
use std::{env, fmt};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAIL_SENDER: &str = "Digital Menu <onboarding@resend.dev>";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MailDriver {
    Resend { api_key: String },
    Log,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub sender: String,
    pub driver: MailDriver,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub master_code: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub mail: MailConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "{} not set", name),
            Self::Invalid { name, value } => write!(f, "Invalid {}: {}", name, value),
        }
    }
}

impl std::error::Error for Error {}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or(Error::Missing("DATABASE_URL"))?;
        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().map_err(|_| Error::Invalid {
                name: "PORT",
                value: port,
            })?,
            None => DEFAULT_PORT,
        };
        let url = var("URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        let environment = AppEnvironment::from(var("APP_ENV").unwrap_or_default().as_str());

        let driver = match var("MAIL_DRIVER").as_deref() {
            None | Some("resend") => MailDriver::Resend {
                api_key: var("RESEND_API_KEY").ok_or(Error::Missing("RESEND_API_KEY"))?,
            },
            // codes would only reach the logs
            Some("log") if environment.is_production() => {
                return Err(Error::Invalid {
                    name: "MAIL_DRIVER",
                    value: String::from("log (not allowed in production)"),
                })
            }
            Some("log") => MailDriver::Log,
            Some(other) => {
                return Err(Error::Invalid {
                    name: "MAIL_DRIVER",
                    value: other.to_string(),
                })
            }
        };
        let sender = var("MAIL_SENDER").unwrap_or_else(|| DEFAULT_MAIL_SENDER.to_string());

        Ok(Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment,
                port,
                url,
            },
            mail: MailConfig { sender, driver },
            auth: AuthConfig {
                master_code: var("MASTER_CODE"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_fill_in_the_optional_values() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/menu"),
            ("RESEND_API_KEY", "re_123"),
        ])
        .unwrap();

        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.url, "http://0.0.0.0:8000");
        assert_eq!(config.app.environment, AppEnvironment::Development);
        assert_eq!(config.mail.sender, "Digital Menu <onboarding@resend.dev>");
        assert_eq!(
            config.mail.driver,
            MailDriver::Resend {
                api_key: "re_123".to_string()
            }
        );
        assert_eq!(config.auth.master_code, None);
    }

    #[test]
    fn database_url_is_required() {
        assert_eq!(
            config_from(&[("MAIL_DRIVER", "log")]).unwrap_err(),
            Error::Missing("DATABASE_URL")
        );
    }

    #[test]
    fn resend_needs_an_api_key_but_log_does_not() {
        assert_eq!(
            config_from(&[("DATABASE_URL", "postgres://localhost/menu")]).unwrap_err(),
            Error::Missing("RESEND_API_KEY")
        );

        let config = config_from(&[("DATABASE_URL", "postgres://localhost/menu"), ("MAIL_DRIVER", "log")]).unwrap();
        assert_eq!(config.mail.driver, MailDriver::Log);
    }

    #[test]
    fn empty_master_code_disables_it() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/menu"),
            ("MAIL_DRIVER", "log"),
            ("MASTER_CODE", ""),
        ])
        .unwrap();
        assert_eq!(config.auth.master_code, None);

        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/menu"),
            ("RESEND_API_KEY", "re_123"),
            ("MASTER_CODE", "MASTER1"),
            ("APP_ENV", "production"),
        ])
        .unwrap();
        assert_eq!(config.auth.master_code.as_deref(), Some("MASTER1"));
        assert!(config.app.environment.is_production());
    }

    #[test]
    fn log_mailer_is_refused_in_production() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/menu"),
            ("MAIL_DRIVER", "log"),
            ("APP_ENV", "production"),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::Invalid { name: "MAIL_DRIVER", .. }));
    }

    #[test]
    fn bad_port_is_reported() {
        assert_eq!(
            config_from(&[
                ("DATABASE_URL", "postgres://localhost/menu"),
                ("MAIL_DRIVER", "log"),
                ("PORT", "eighty")
            ])
            .unwrap_err(),
            Error::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }
}
