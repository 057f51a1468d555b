//! Booking confirmation emails
//!
//! Pure side-effect component. A booking never fails because of this module:
//! callers downgrade every error here to an `emailSent: false` flag. When no
//! SMTP credentials are configured the mailer is constructed disabled and
//! every send fails fast with `NotifierError::NotConfigured`.

use chrono::NaiveDate;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while attempting a notification
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Failed to send email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Mailer configuration
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP username; absence disables the mailer
    pub username: Option<String>,
    /// SMTP password; absence disables the mailer
    pub password: Option<String>,
    /// Sender address; defaults to the username
    pub from: Option<String>,
}

impl MailerConfig {
    /// Create a new MailerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SMTP_HOST`: Relay host (default: smtp.gmail.com)
    /// - `SMTP_USERNAME`, `SMTP_PASSWORD`: Credentials; when either is
    ///   absent the mailer is disabled rather than failing startup
    /// - `SMTP_FROM`: Sender address (default: SMTP_USERNAME)
    pub fn from_env() -> Self {
        MailerConfig {
            host: std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            from: std::env::var("SMTP_FROM").ok(),
        }
    }
}

/// Details interpolated into the confirmation template
#[derive(Debug)]
pub struct BookingEmail<'a> {
    pub to: &'a str,
    pub user_name: &'a str,
    pub hotel_name: &'a str,
    pub room_type: &'a str,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_amount: f64,
}

/// SMTP mailer for booking confirmations
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Build the mailer; missing credentials produce a disabled instance
    pub fn new(config: MailerConfig) -> Result<Self, NotifierError> {
        let from = config
            .from
            .clone()
            .or_else(|| config.username.clone())
            .unwrap_or_default();

        let transport = match (config.username, config.password) {
            (Some(username), Some(password)) => {
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
                    .credentials(Credentials::new(username, password))
                    .build();
                info!("Email transporter configured for {}", config.host);
                Some(transport)
            }
            _ => {
                warn!("Email not configured: SMTP_USERNAME and SMTP_PASSWORD required");
                None
            }
        };

        Ok(Mailer { transport, from })
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Render and dispatch the confirmation email
    pub async fn send_booking_confirmation(
        &self,
        email: BookingEmail<'_>,
    ) -> Result<(), NotifierError> {
        let transport = self.transport.as_ref().ok_or(NotifierError::NotConfigured)?;

        let message = Message::builder()
            .from(format!("Getaway <{}>", self.from).parse()?)
            .to(email.to.parse()?)
            .subject(format!("Booking confirmed at {}", email.hotel_name))
            .header(ContentType::TEXT_HTML)
            .body(render_confirmation(&email))?;

        transport.send(message).await?;
        info!("Booking confirmation sent to {}", email.to);
        Ok(())
    }
}

fn render_confirmation(email: &BookingEmail<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>Booking Confirmation</title></head>
<body style="margin:0;padding:0;font-family:Arial,sans-serif;background-color:#f0fdf4;">
  <table width="550" align="center" style="background:#fff;border-radius:12px;overflow:hidden;">
    <tr>
      <td style="background:#065f46;padding:25px;">
        <h1 style="margin:0;color:#fff;">Getaway</h1>
        <p style="margin:6px 0 0;color:#d1fae5;">Hotel Booking Confirmation</p>
      </td>
    </tr>
    <tr>
      <td style="padding:25px;">
        <p style="margin:0;font-size:16px;">Hello {user_name},</p>
        <p style="margin-top:10px;color:#6b7280;">
          Your hotel booking has been successfully confirmed.
        </p>
        <h2 style="margin:18px 0 12px;">{hotel_name}</h2>
        <p style="margin:6px 0;">Room: {room_type}</p>
        <p style="margin:6px 0;">Check-in: {check_in}</p>
        <p style="margin:6px 0;">Check-out: {check_out}</p>
        <hr style="margin:14px 0;" />
        <p style="margin:0;font-size:18px;font-weight:700;color:#065f46;">
          Total: {total_amount:.2}
        </p>
      </td>
    </tr>
    <tr>
      <td style="padding:20px;text-align:center;">
        <p style="font-size:12px;color:#6b7280;">We wish you a relaxing stay.</p>
      </td>
    </tr>
  </table>
</body>
</html>"#,
        user_name = email.user_name,
        hotel_name = email.hotel_name,
        room_type = email.room_type,
        check_in = email.check_in,
        check_out = email.check_out,
        total_amount = email.total_amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> BookingEmail<'static> {
        BookingEmail {
            to: "ann@x.com",
            user_name: "Ann",
            hotel_name: "Seaside Lodge",
            room_type: "Deluxe",
            check_in: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            total_amount: 100.0,
        }
    }

    #[tokio::test]
    async fn unconfigured_mailer_fails_fast() {
        let mailer = Mailer::new(MailerConfig {
            host: "smtp.gmail.com".to_string(),
            username: None,
            password: None,
            from: None,
        })
        .unwrap();
        assert!(!mailer.is_enabled());

        let err = mailer
            .send_booking_confirmation(sample_email())
            .await
            .unwrap_err();
        assert!(matches!(err, NotifierError::NotConfigured));
    }

    #[test]
    fn template_contains_booking_details() {
        let html = render_confirmation(&sample_email());
        assert!(html.contains("Ann"));
        assert!(html.contains("Seaside Lodge"));
        assert!(html.contains("Deluxe"));
        assert!(html.contains("2024-01-01"));
        assert!(html.contains("2024-01-03"));
        assert!(html.contains("100.00"));
    }
}
