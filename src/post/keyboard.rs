use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

pub const PAYMENT_BUTTON_TEXT: &str = "Получить номера сейчас";
pub const SUPPORT_BUTTON_TEXT: &str = "Связаться с техподдержкой";

/// The payment button is always present. The support button is rendered only
/// when a contact was configured, so the keyboard never carries a broken or
/// empty link.
pub fn build_keyboard(payment_url: &Url, support_url: Option<&Url>) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::url(
        PAYMENT_BUTTON_TEXT,
        payment_url.clone(),
    )]];

    if let Some(support) = support_url {
        rows.push(vec![InlineKeyboardButton::url(
            SUPPORT_BUTTON_TEXT,
            support.clone(),
        )]);
    }

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn button_url(button: &InlineKeyboardButton) -> &Url {
        match &button.kind {
            InlineKeyboardButtonKind::Url(url) => url,
            other => panic!("expected a url button, got {other:?}"),
        }
    }

    #[test]
    fn payment_button_only_without_support_contact() {
        let payment = Url::parse("https://pay.example/qr").unwrap();

        let kb = build_keyboard(&payment, None);

        assert_eq!(kb.inline_keyboard.len(), 1);
        assert_eq!(kb.inline_keyboard[0].len(), 1);
        let button = &kb.inline_keyboard[0][0];
        assert_eq!(button.text, PAYMENT_BUTTON_TEXT);
        assert_eq!(button_url(button).as_str(), "https://pay.example/qr");
    }

    #[test]
    fn support_button_added_when_configured() {
        let payment = Url::parse("https://pay.example/qr").unwrap();
        let support = Url::parse("https://t.me/helpdesk").unwrap();

        let kb = build_keyboard(&payment, Some(&support));

        assert_eq!(kb.inline_keyboard.len(), 2);
        let button = &kb.inline_keyboard[1][0];
        assert_eq!(button.text, SUPPORT_BUTTON_TEXT);
        assert_eq!(button_url(button).as_str(), "https://t.me/helpdesk");
        assert!(!button_url(button).as_str().contains('@'));
    }
}
