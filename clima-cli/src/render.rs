//! Text rendering of the weather view.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use clima_core::{Theme, ViewState, WeatherCondition};

pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => "Cargando…".to_string(),
        ViewState::Error { message } => format!("{message}\n(Reintentar disponible)"),
        ViewState::Ready { condition, theme } => render_ready(condition, theme),
    }
}

fn render_ready(condition: &WeatherCondition, theme: &Theme) -> String {
    let [from, to] = theme.palette();
    let date = condition.observed_at().with_timezone(&Local).date_naive();

    let lines = [
        condition.location_name().to_string(),
        spanish_date(date),
        String::new(),
        format!("[{}]  {}°", theme.icon_key(), round_half_up(condition.temperature_c())),
        capitalize_words(condition.description()),
        String::new(),
        format!("“{}”", theme.message()),
        format!("💡 {}", theme.recommendation()),
        String::new(),
        format!(
            "Humedad {}%  ·  Viento {} m/s  ·  Sensación {}°",
            condition.humidity_pct(),
            condition.wind_speed_mps(),
            round_half_up(condition.feels_like_c()),
        ),
        format!("Paleta {from} → {to}"),
    ];

    lines.join("\n")
}

/// Halves round toward positive infinity, so -2.5 shows as -2.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// e.g. "lunes, 16 de octubre"
fn spanish_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
        "septiembre", "octubre", "noviembre", "diciembre",
    ];

    let weekday = match date.weekday() {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    };

    format!("{weekday}, {} de {}", date.day(), MONTHS[date.month0() as usize])
}
