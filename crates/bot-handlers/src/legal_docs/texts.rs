pub(crate) const LEGAL_MENU_BUTTON_TEXT: &str = "📄 Юридические документы";
pub(crate) const LEGAL_DOCS_MENU_TEXT: &str = "📄 Юридические документы\n\nВыберите документ для просмотра:";

pub(crate) const FIRST_LAUNCH_LEGAL_MESSAGE: &str = "👋 Добро пожаловать!\n\n\
    Перед началом работы ознакомьтесь с документами ниже. \
    Нажимая «Принимаю», вы соглашаетесь с их условиями.";
pub(crate) const ACCEPT_DOCUMENTS_BUTTON: &str = "✅ Принимаю";
pub(crate) const DOCUMENTS_ACCEPTED_MESSAGE: &str = "✅ Спасибо! Документы приняты.";
pub(crate) const DOCUMENTS_ACCEPTED_ALERT: &str = "✅ Документы приняты!";

pub(crate) const ERROR_NO_DOCUMENTS: &str = "Документы пока не опубликованы.";
pub(crate) const ERROR_MODULE_DISABLED: &str = "Раздел с документами временно недоступен.";
