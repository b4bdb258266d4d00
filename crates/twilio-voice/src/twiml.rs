//! TwiML document construction.

use crate::types::CallMode;

/// Build the TwiML for a call.
///
/// Direct calls speak the message via text-to-speech and hang up. Conference
/// calls join the callee into the named room; the room starts with the first
/// participant and ends as soon as any participant leaves, so it lives only as
/// long as the alerted participants do.
pub fn build_twiml(mode: &CallMode, message: &str) -> String {
    match mode {
        CallMode::Direct => format!(
            r#"<Response><Say voice="alice">{}</Say></Response>"#,
            escape_xml(message)
        ),
        CallMode::Conference { room } => format!(
            r#"<Response><Dial><Conference startConferenceOnEnter="true" endConferenceOnExit="true">{}</Conference></Dial></Response>"#,
            escape_xml(room)
        ),
    }
}

/// Escape text for embedding in an XML text node or attribute.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_twiml() {
        let twiml = build_twiml(&CallMode::Direct, "New signal from FX Room: BUY EURUSD now");
        assert_eq!(
            twiml,
            r#"<Response><Say voice="alice">New signal from FX Room: BUY EURUSD now</Say></Response>"#
        );
    }

    #[test]
    fn test_conference_twiml() {
        let mode = CallMode::Conference {
            room: "FX Room".to_string(),
        };
        let twiml = build_twiml(&mode, "ignored for conference joins");
        assert!(twiml.contains(r#"<Conference startConferenceOnEnter="true" endConferenceOnExit="true">FX Room</Conference>"#));
        assert!(twiml.starts_with("<Response><Dial>"));
    }

    #[test]
    fn test_xml_escaping() {
        let twiml = build_twiml(&CallMode::Direct, r#"BUY <EURUSD> & "hold""#);
        assert!(twiml.contains("BUY &lt;EURUSD&gt; &amp; &quot;hold&quot;"));
        assert!(!twiml.contains("<EURUSD>"));
    }
}
