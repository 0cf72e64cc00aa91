//! Fixed parameters of the analytics requests.

use chrono::NaiveDate;
use serde::Deserialize;

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    fn ymd(start: (i32, u32, u32), end: (i32, u32, u32)) -> Self {
        let date = |(y, m, d): (i32, u32, u32)| {
            NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
        };
        Self {
            start: date(start),
            end: date(end),
        }
    }
}

/// Inputs for the search, funnel, keyword and report endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Product article numbers the reports cover.
    #[serde(default = "default_nm_ids")]
    pub nm_ids: Vec<u64>,
    #[serde(default = "default_current_period")]
    pub current_period: Period,
    #[serde(default = "default_past_period")]
    pub past_period: Period,
    #[serde(default = "default_funnel_period")]
    pub funnel_period: Period,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    #[serde(default = "default_advert_id")]
    pub advert_id: u64,
    #[serde(default = "default_keyword_period")]
    pub keyword_period: Period,
    #[serde(default = "default_report_name")]
    pub report_name: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_nm_ids() -> Vec<u64> {
    vec![310_364_796]
}

fn default_current_period() -> Period {
    Period::ymd((2025, 3, 1), (2025, 3, 27))
}

fn default_past_period() -> Period {
    Period::ymd((2025, 2, 1), (2025, 2, 27))
}

fn default_funnel_period() -> Period {
    Period::ymd((2025, 3, 1), (2025, 3, 10))
}

fn default_keyword_period() -> Period {
    Period::ymd((2025, 3, 10), (2025, 3, 15))
}

const fn default_search_limit() -> u32 {
    20
}

const fn default_advert_id() -> u64 {
    132_681
}

fn default_report_name() -> String {
    "My_First_Report".into()
}

fn default_timezone() -> String {
    "Europe/Moscow".into()
}

impl ReportsConfig {
    /// Every configured period, labelled for validation messages.
    #[must_use]
    pub fn periods(&self) -> [(&'static str, Period); 4] {
        [
            ("current_period", self.current_period),
            ("past_period", self.past_period),
            ("funnel_period", self.funnel_period),
            ("keyword_period", self.keyword_period),
        ]
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            nm_ids: default_nm_ids(),
            current_period: default_current_period(),
            past_period: default_past_period(),
            funnel_period: default_funnel_period(),
            search_limit: default_search_limit(),
            advert_id: default_advert_id(),
            keyword_period: default_keyword_period(),
            report_name: default_report_name(),
            timezone: default_timezone(),
        }
    }
}
