//! 캘린더 월.
//!
//! 화면에 표시되는 월은 연도와 0부터 시작하는 월 인덱스(0 = 1월)로
//! 식별합니다. 날짜 범위 계산은 모두 로컬 달력 날짜(`NaiveDate`) 기준입니다.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 연도 + 0 기반 월 인덱스.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    year: i32,
    month0: u32,
}

impl CalendarMonth {
    /// 0 기반 월 인덱스로 생성합니다. 인덱스가 0..=11 범위 밖이거나
    /// 연도가 chrono 표현 범위를 벗어나면 `None`.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        if month0 > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
        Some(Self { year, month0 })
    }

    /// 1 기반 월 번호(1 = 1월)로 생성합니다.
    pub fn from_ym(year: i32, month: u32) -> Option<Self> {
        month.checked_sub(1).and_then(|m0| Self::new(year, m0))
    }

    /// 날짜가 속한 월.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// `YYYY-MM` 문자열을 파싱합니다.
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.trim().split_once('-')?;
        Self::from_ym(year.parse().ok()?, month.parse().ok()?)
    }

    /// 연도.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0 기반 월 인덱스.
    pub fn index(&self) -> u32 {
        self.month0
    }

    /// 1 기반 월 번호.
    pub fn number(&self) -> u32 {
        self.month0 + 1
    }

    /// 월의 첫째 날.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// 월의 마지막 날.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// 월의 시작/끝 날짜 (양 끝 포함).
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.last_day())
    }

    /// 월의 일수.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// 날짜가 이 월에 속하는지.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// 다음 월.
    pub fn next(&self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }

    /// 이전 월.
    pub fn prev(&self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }
}

impl std::fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.number())
    }
}
