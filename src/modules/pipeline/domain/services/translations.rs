//! Display strings for catalog enums
//!
//! Unknown values pass through untouched; the catalog adds kinds faster than
//! the site gets translations for them.

pub fn translate_status(status: &str) -> String {
    match status {
        "released" => "Вышел",
        "ongoing" => "Онгоинг",
        "tba" => "Неизвестно",
        other => other,
    }
    .to_string()
}

pub fn translate_kind(kind: &str) -> String {
    match kind {
        "tv" => "TV Сериал",
        "ova" => "OVA",
        "movie" => "Фильм",
        "special" => "Специальный выпуск",
        other => other,
    }
    .to_string()
}
