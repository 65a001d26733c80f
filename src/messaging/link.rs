//! WhatsApp links for reminders.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in the message text; everything else is escaped.
const TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds a `wa.me` link that opens a chat with `phone` prefilled with `text`.
///
/// Returns `None` when the volunteer has no phone number.
///
/// ```
/// use sunday_roster::messaging::whatsapp_link;
///
/// assert_eq!(
///     whatsapp_link("5511999990000", "Olá Ana!").as_deref(),
///     Some("https://wa.me/5511999990000?text=Ol%C3%A1%20Ana!")
/// );
/// assert_eq!(whatsapp_link("", "Olá"), None);
/// ```
pub fn whatsapp_link(phone: &str, text: &str) -> Option<String> {
    if phone.is_empty() {
        return None;
    }
    Some(format!(
        "https://wa.me/{}?text={}",
        phone,
        utf8_percent_encode(text, TEXT)
    ))
}
