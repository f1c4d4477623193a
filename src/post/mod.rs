mod keyboard;
mod telegram;

pub use keyboard::build_keyboard;
pub use telegram::{DeliveryError, TelegramPoster};

use async_trait::async_trait;

/// The fixed promotional post. All content is static configuration; the post
/// has no identity of its own beyond the message id Telegram assigns on send.
pub const POST_TEXT: &str = "Дорогие друзья!

Все квартиры с номерами хозяев находятся в нашей закрытой группе.
Мы работаем по честной системе — вы платите в основном за результат, а не за обещания.

Подписка навсегда стоит всего 1000 сом:
750 сом — перед вступлением в группу,
250 сом — уже после того, как вы через нас найдёте квартиру и заселитесь.

Каждый день в закрытой группе появляется до 100 новых, бюджетных квартир напрямую от хозяев.
В среднем наши клиенты находят жильё за 1–3 дня.

Оплатите первую часть подписки — 750 сом — по кнопке ниже и получите доступ к актуальной базе квартир.
Ознакомьтесь и подпишите договор: kgzhome.deno.dev
После оплаты прикрепите, пожалуйста, чек в договоре и подтвердите его.

Вторую часть — 250 сом — вы оплачиваете только после заселения, также прикрепив чек.";

/// Delivers the promotional post to the configured chat.
///
/// Implementations absorb every upstream failure: `deliver` logs and returns,
/// it never raises. The trigger endpoint answers "sent" either way.
#[async_trait]
pub trait Poster: Send + Sync {
    async fn deliver(&self);
}
