use crate::cli::{Args, TransportKind};
use anyhow::{bail, Context, Result};
use mail_transport::{MailTransport, MockTransport, SmtpMailTransport, SmtpSettings};
use std::sync::Arc;

pub const DEFAULT_SENDER: &str = "ai-employee@example.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportConfig {
    Mock,
    Smtp(SmtpSettings),
}

/// Runtime settings gathered from CLI arguments and the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub sender: String,
    pub transport: TransportConfig,
}

impl GatewayConfig {
    pub fn load(args: &Args) -> Result<Self> {
        Self::from_lookup(args, |key| std::env::var(key).ok())
    }

    /// Build the config with `lookup` standing in for the process environment.
    /// Empty variables count as unset.
    pub fn from_lookup(args: &Args, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let sender = args
            .from
            .clone()
            .or_else(|| var("EMAIL_FROM"))
            .unwrap_or_else(|| DEFAULT_SENDER.to_string());

        let transport = match args.transport {
            TransportKind::Mock => TransportConfig::Mock,
            TransportKind::Smtp => {
                let host = var("SMTP_HOST")
                    .context("SMTP_HOST environment variable not set")?;
                let port = match var("SMTP_PORT") {
                    Some(port) => port
                        .trim()
                        .parse()
                        .with_context(|| format!("Invalid SMTP_PORT: {port}"))?,
                    None => DEFAULT_SMTP_PORT,
                };
                let username = var("EMAIL_USER");
                let password = var("EMAIL_PASSWORD");
                if username.is_some() != password.is_some() {
                    bail!("EMAIL_USER and EMAIL_PASSWORD must be set together");
                }
                TransportConfig::Smtp(SmtpSettings {
                    host,
                    port,
                    username,
                    password,
                })
            }
        };

        Ok(Self { sender, transport })
    }

    pub fn build_transport(&self) -> Result<Arc<dyn MailTransport>> {
        match &self.transport {
            TransportConfig::Mock => Ok(Arc::new(MockTransport)),
            TransportConfig::Smtp(settings) => Ok(Arc::new(
                SmtpMailTransport::new(settings).context("Failed to create SMTP transport")?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("test").chain(argv.iter().copied())).unwrap()
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_lookup(&args(&[]), env(&[])).unwrap();
        assert_eq!(config.sender, DEFAULT_SENDER);
        assert_eq!(config.transport, TransportConfig::Mock);
    }

    #[test]
    fn test_email_from_overrides_default() {
        let config =
            GatewayConfig::from_lookup(&args(&[]), env(&[("EMAIL_FROM", "bot@corp.example")]))
                .unwrap();
        assert_eq!(config.sender, "bot@corp.example");
    }

    #[test]
    fn test_empty_email_from_falls_back() {
        let config =
            GatewayConfig::from_lookup(&args(&[]), env(&[("EMAIL_FROM", "")])).unwrap();
        assert_eq!(config.sender, DEFAULT_SENDER);
    }

    #[test]
    fn test_cli_sender_wins() {
        let config = GatewayConfig::from_lookup(
            &args(&["--from", "cli@corp.example"]),
            env(&[("EMAIL_FROM", "env@corp.example")]),
        )
        .unwrap();
        assert_eq!(config.sender, "cli@corp.example");
    }

    #[test]
    fn test_smtp_settings() {
        let config = GatewayConfig::from_lookup(
            &args(&["--transport", "smtp"]),
            env(&[
                ("SMTP_HOST", "smtp.gmail.com"),
                ("EMAIL_USER", "me"),
                ("EMAIL_PASSWORD", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(
            config.transport,
            TransportConfig::Smtp(SmtpSettings {
                host: "smtp.gmail.com".to_string(),
                port: DEFAULT_SMTP_PORT,
                username: Some("me".to_string()),
                password: Some("secret".to_string()),
            })
        );
    }

    #[test]
    fn test_smtp_requires_host() {
        let err = GatewayConfig::from_lookup(&args(&["--transport", "smtp"]), env(&[]))
            .unwrap_err();
        assert!(err.to_string().contains("SMTP_HOST"));
    }

    #[test]
    fn test_smtp_rejects_bad_port() {
        let err = GatewayConfig::from_lookup(
            &args(&["--transport", "smtp"]),
            env(&[("SMTP_HOST", "localhost"), ("SMTP_PORT", "smtp")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid SMTP_PORT"));
    }

    #[test]
    fn test_smtp_credentials_come_in_pairs() {
        let result = GatewayConfig::from_lookup(
            &args(&["--transport", "smtp"]),
            env(&[("SMTP_HOST", "localhost"), ("EMAIL_USER", "me")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_transport_builds() {
        let config = GatewayConfig::from_lookup(&args(&[]), env(&[])).unwrap();
        assert!(config.build_transport().is_ok());
    }
}
