//! Email subjects and bodies

use chrono::{DateTime, FixedOffset, Utc};

use crate::notify::Notification;

/// Rendered email ready for the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub html: String,
}

/// Render `notification`, formatting times in `offset`
pub fn render(notification: &Notification, offset: FixedOffset) -> EmailMessage {
    match notification {
        Notification::SaidYes { no_count, at } => EmailMessage {
            subject: "💍 SHE SAID YES! 🎉".to_string(),
            html: format!(
                r#"<div style="font-family: sans-serif; max-width: 500px; margin: 0 auto; padding: 40px 20px; text-align: center;">
  <h1 style="font-size: 48px; margin-bottom: 10px;">🎉</h1>
  <h1 style="font-size: 32px; color: #ce1215; text-transform: uppercase; letter-spacing: 2px;">She Said Yes!</h1>
  <p style="font-size: 18px; color: #333; margin: 20px 0;">The moment you've been waiting for: she clicked <strong>"OKAY, ONE DATE"</strong>.</p>
  <div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p style="font-size: 14px; color: #666; margin: 0;">Times she clicked "No" before saying Yes:</p>
    <p style="font-size: 48px; font-weight: bold; color: #ce1215; margin: 10px 0;">{}</p>
  </div>
  <p style="font-size: 14px; color: #999;">Sent from Vally at {}</p>
</div>"#,
                no_count,
                local_time(at, offset)
            ),
        },
        Notification::Signed { name, at } => EmailMessage {
            subject: "✍️ T&C Signed!".to_string(),
            html: format!(
                r#"<div style="font-family: sans-serif; max-width: 500px; margin: 0 auto; padding: 40px 20px; text-align: center;">
  <h1 style="font-size: 48px; margin-bottom: 10px;">✍️</h1>
  <h1 style="font-size: 28px; color: #ce1215; text-transform: uppercase;">Terms &amp; Conditions Signed</h1>
  <p style="font-size: 18px; color: #333; margin: 20px 0;">She signed with the name: <strong style="color: #ce1215;">"{}"</strong></p>
  <p style="font-size: 14px; color: #999;">Signed at {}</p>
</div>"#,
                escape_html(name),
                local_time(at, offset)
            ),
        },
    }
}

fn local_time(at: &DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset)
        .format("%-d/%-m/%Y, %-I:%M:%S %p")
        .to_string()
}

// Signer names are visitor input
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    #[test]
    fn test_said_yes_contains_count_and_local_time() {
        let at = Utc.with_ymd_and_hms(2025, 2, 14, 14, 30, 0).unwrap();
        let msg = render(&Notification::SaidYes { no_count: 7, at }, ist());

        assert!(msg.subject.contains("YES"));
        assert!(msg.html.contains(">7</p>"));
        // 14:30 UTC is 20:00 IST
        assert!(msg.html.contains("14/2/2025, 8:00:00 PM"));
    }

    #[test]
    fn test_signed_escapes_name() {
        let at = Utc.with_ymd_and_hms(2025, 2, 14, 0, 0, 0).unwrap();
        let msg = render(
            &Notification::Signed {
                name: "<b>Ada</b> & co".to_string(),
                at,
            },
            ist(),
        );

        assert!(msg.html.contains("&lt;b&gt;Ada&lt;/b&gt; &amp; co"));
        assert!(!msg.html.contains("<b>Ada</b>"));
    }
}
