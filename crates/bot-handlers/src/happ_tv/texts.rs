pub(crate) const HAPP_TV_BUTTON: &str = "📺 Подключить Happ TV";

pub(crate) const HAPP_TV_CODE_REQUEST: &str = "📺 Откройте Happ на телевизоре и введите код, \
    который показан на экране.\n\nКод состоит из 5 букв и цифр.";
pub(crate) const HAPP_TV_INVALID_CODE: &str =
    "❌ Неверный код. Введите 5 букв и цифр, как на экране телевизора.";
pub(crate) const HAPP_TV_SUCCESS: &str = "✅ Подписка отправлена на телевизор!";
pub(crate) const HAPP_TV_ERROR: &str =
    "❌ Не удалось подключить телевизор. Проверьте код и попробуйте еще раз.";
