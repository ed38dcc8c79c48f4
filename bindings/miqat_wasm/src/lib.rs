//! WASM bindings for Miqat
//!
//! Exposes prayer times, qibla bearing, the last third of the night and
//! reminder resolution to the browser UI.

use chrono::{NaiveDate, NaiveDateTime};
use miqat_core::{Coordinate, DaySchedule, Locale, NotificationTimeOption, PrayerTime, Settings};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(date_str: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date format: {e}")))
}

fn parse_datetime(now_str: &str) -> Result<NaiveDateTime, JsValue> {
    NaiveDateTime::parse_from_str(now_str, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(now_str, "%Y-%m-%dT%H:%M"))
        .map_err(|e| JsValue::from_str(&format!("Invalid date-time format: {e}")))
}

/// Prayer times for a date (YYYY-MM-DD) as JSON.
///
/// # Example (JavaScript)
/// ```js
/// const day = prayerTimes(21.3891, 39.8579, "2024-03-21", "ar");
/// console.log(day.times[0].display); // "ص ٤:١١"
/// ```
#[wasm_bindgen(js_name = prayerTimes)]
pub fn prayer_times(lat: f64, lng: f64, date_str: &str, locale: &str) -> Result<JsValue, JsValue> {
    let locale: Locale = locale.parse().map_err(js_err)?;
    let settings = Settings::new().locale(locale);
    let day = miqat_core::prayer_times(Coordinate::new_unchecked(lat, lng), parse_date(date_str)?, &settings)
        .map_err(js_err)?;
    serde_wasm_bindgen::to_value(&WasmDaySchedule::from(day)).map_err(js_err)
}

/// Qibla bearing in degrees from true north.
#[wasm_bindgen(js_name = qiblaBearing)]
pub fn qibla_bearing(lat: f64, lng: f64) -> Result<f64, JsValue> {
    let coords = Coordinate::new(lat, lng).map_err(js_err)?;
    Ok(miqat_core::qibla_bearing(coords))
}

/// Localized 12-hour clock text, e.g. "AM 4:11".
#[wasm_bindgen(js_name = formatClockTime)]
pub fn format_clock_time(hour: u32, minute: u32, locale: &str) -> Result<String, JsValue> {
    let locale: Locale = locale.parse().map_err(js_err)?;
    Ok(miqat_core::format_clock_time(hour, minute, locale))
}

/// Class-based API bound to one location and the user's settings.
///
/// # Example (JavaScript)
/// ```js
/// const miqat = new Miqat(21.3891, 39.8579, localStorage.getItem("settings"));
/// const view = miqat.today("2024-03-21T13:00");
/// console.log(view.next.name, view.nextCountdown);
/// ```
#[wasm_bindgen]
pub struct Miqat {
    coords: Coordinate,
    settings: Settings,
}

#[wasm_bindgen]
impl Miqat {
    /// Creates an instance; `settings_json` is the stored settings object, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(lat: f64, lng: f64, settings_json: Option<String>) -> Result<Miqat, JsValue> {
        console_error_panic_hook::set_once();
        let settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(js_err)?,
            None => Settings::default(),
        };
        Ok(Miqat { coords: Coordinate::new_unchecked(lat, lng), settings })
    }

    /// Today's schedule with the next prayer flagged. `now` is local `YYYY-MM-DDTHH:MM[:SS]`.
    pub fn today(&self, now: &str) -> Result<JsValue, JsValue> {
        let view = miqat_core::today(self.coords, parse_datetime(now)?, &self.settings).map_err(js_err)?;
        let result = WasmToday {
            hijri: view.hijri_display(self.settings.locale),
            next_countdown: view.next.map(|n| n.countdown_text()),
            schedule: WasmDaySchedule::from(view.schedule),
        };
        serde_wasm_bindgen::to_value(&result).map_err(js_err)
    }

    /// Qibla bearing, compass label and distance.
    pub fn qibla(&self) -> Result<JsValue, JsValue> {
        let dir = miqat_core::qibla(self.coords, &self.settings).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&dir).map_err(js_err)
    }

    /// Start and middle of the last third of the night beginning on `date`.
    #[wasm_bindgen(js_name = lastThird)]
    pub fn last_third(&self, date: &str) -> Result<JsValue, JsValue> {
        let night = miqat_core::last_third(self.coords, parse_date(date)?, &self.settings).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&night).map_err(js_err)
    }

    /// Fire instant of a reminder option (JSON) on `date`.
    #[wasm_bindgen(js_name = notificationTime)]
    pub fn notification_time(&self, option: JsValue, date: &str) -> Result<String, JsValue> {
        let option: NotificationTimeOption = serde_wasm_bindgen::from_value(option).map_err(js_err)?;
        let at = miqat_core::notification_time(&option, self.coords, parse_date(date)?, &self.settings)
            .map_err(js_err)?;
        Ok(at.format("%Y-%m-%dT%H:%M:%S").to_string())
    }

    /// Next fire instant of every enabled reminder, plus those that could not be resolved.
    #[wasm_bindgen(js_name = notificationPlan)]
    pub fn notification_plan(&self, now: &str) -> Result<JsValue, JsValue> {
        let plan = miqat_core::notification_plan(self.coords, parse_datetime(now)?, &self.settings)
            .map_err(js_err)?;
        serde_wasm_bindgen::to_value(&plan).map_err(js_err)
    }
}

/// WASM-friendly prayer time for TypeScript generation.
#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerTime {
    pub name: String,
    pub label: String,
    pub time: String,
    pub display: String,
    pub is_next: bool,
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmDaySchedule {
    pub date: String,
    pub locale: String,
    pub times: Vec<WasmPrayerTime>,
}

#[derive(Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmToday {
    pub schedule: WasmDaySchedule,
    pub next_countdown: Option<String>,
    pub hijri: Option<String>,
}

fn wasm_time(t: PrayerTime, locale: Locale) -> WasmPrayerTime {
    WasmPrayerTime {
        name: format!("{:?}", t.name),
        label: t.name.label(locale).to_string(),
        time: t.clock.to_string(),
        display: t.display,
        is_next: t.is_next,
    }
}

impl From<DaySchedule> for WasmDaySchedule {
    fn from(day: DaySchedule) -> Self {
        let locale = day.locale;
        Self {
            date: day.date.to_string(),
            locale: locale.code().to_string(),
            times: day.times.into_iter().map(|t| wasm_time(t, locale)).collect(),
        }
    }
}
