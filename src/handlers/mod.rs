pub(crate) mod tg_logs;
