//! Host texts around the module menus

pub(crate) const BACK: &str = "🔙 Назад";

pub(crate) const MAIN_MENU: &str = "Главное меню. Выберите действие:";
pub(crate) const MY_KEYS_BUTTON: &str = "🔑 Мои подписки";
pub(crate) const ABOUT_VPN_BUTTON: &str = "ℹ️ О сервисе";

pub(crate) const ABOUT_VPN: &str =
    "Быстрый и надежный VPN. Подключение занимает меньше минуты, поддержка отвечает круглосуточно.";

pub(crate) const KEYS_LIST: &str = "Ваши подписки:";
pub(crate) const NO_KEYS: &str = "У вас пока нет подписок.";

pub(crate) const CONNECT_TV_BUTTON: &str = "📺 Подключить телевизор";
pub(crate) const KEY_NOT_FOUND: &str = "Подписка не найдена.";

pub(crate) const PRIVATE_ONLY: &str = "Бот работает только в личных сообщениях.";
pub(crate) const UNKNOWN_MESSAGE: &str = "Не понимаю. Воспользуйтесь меню: /start";
pub(crate) const TV_INSTRUCTIONS: &str =
    "Откройте приложение на телевизоре и добавьте подписку по ссылке из описания ключа.";

pub(crate) const SOMETHING_WRONG: &str = "❌ Произошла ошибка. Попробуйте еще раз.";
pub(crate) const INVALID_CALLBACK: &str = "❌ Кнопка устарела, откройте меню заново.";

pub(crate) fn key_info(name: &str, link: Option<&str>) -> String {
    match link {
        Some(link) => format!("🔑 Подписка {name}\n\n{link}"),
        None => format!("🔑 Подписка {name}"),
    }
}
