//! Digest rendering: subject, plain-text body, and HTML body.

use incidenthub_core::config::NotificationsConfig;
use incidenthub_entity::notification::NotificationGroup;

use crate::delivery::OutboundMessage;

/// Renders a [`NotificationGroup`] into an email-ready message.
#[derive(Debug, Clone)]
pub struct DigestFormatter {
    /// Prefix for every subject line.
    subject_prefix: String,
    /// Link shown under the digest.
    platform_url: String,
}

impl DigestFormatter {
    /// Create a formatter.
    pub fn new(subject_prefix: impl Into<String>, platform_url: impl Into<String>) -> Self {
        Self {
            subject_prefix: subject_prefix.into(),
            platform_url: platform_url.into(),
        }
    }

    /// Create a formatter from notification settings.
    pub fn from_config(config: &NotificationsConfig) -> Self {
        Self::new(config.subject_prefix.clone(), config.platform_url.clone())
    }

    /// Render one digest.
    pub fn render(&self, group: &NotificationGroup) -> OutboundMessage {
        OutboundMessage {
            subject: self.subject(group),
            text_body: self.text_body(group),
            html_body: self.html_body(group),
        }
    }

    fn subject(&self, group: &NotificationGroup) -> String {
        let subject = format!("Incident notifications ({})", group.priority);
        if self.subject_prefix.is_empty() {
            subject
        } else {
            format!("{} {}", self.subject_prefix, subject)
        }
    }

    fn text_body(&self, group: &NotificationGroup) -> String {
        let mut body = String::new();
        for line in &group.lines {
            body.push_str("- ");
            body.push_str(line);
            body.push('\n');
        }
        body.push('\n');
        body.push_str(&self.platform_url);
        body
    }

    fn html_body(&self, group: &NotificationGroup) -> String {
        let color = group.priority.accent_color();
        let items: String = group
            .lines
            .iter()
            .map(|line| format!(r#"<li style="margin-bottom: 5px;">{}</li>"#, escape_html(line)))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f3f4f6; margin: 0; padding: 0; }}
        .container {{ max-width: 600px; margin: 20px auto; background: #ffffff; border-radius: 8px; overflow: hidden; }}
        .header {{ background-color: #111827; color: #ffffff; padding: 20px; text-align: center; }}
        .content {{ padding: 30px; }}
        .footer {{ background-color: #f9fafb; padding: 15px; text-align: center; color: #9ca3af; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header"><h1 style="margin: 0; font-size: 24px;">Incident Management</h1></div>
        <div class="content">
            <p>You have new incident notifications:</p>
            <div style="margin-bottom: 20px; border-left: 4px solid {color}; padding-left: 15px;">
                <h3 style="margin: 0 0 5px 0;">Priority: <span style="color: {color}; text-transform: capitalize;">{priority}</span></h3>
                <ul style="padding-left: 20px;">{items}</ul>
            </div>
            <div style="margin-top: 30px; text-align: center;">
                <a href="{url}" style="background-color: #2563eb; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">Open the platform</a>
            </div>
        </div>
        <div class="footer">IncidentHub</div>
    </div>
</body>
</html>"#,
            color = color,
            priority = group.priority,
            items = items,
            url = escape_html(&self.platform_url),
        )
    }
}

/// Minimal HTML escaping for text and attribute values.
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
