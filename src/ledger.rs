// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const WINDOW_MONTHS: i32 = 12;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid entry date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid entry kind '{0}', expected 'income' or 'expense'")]
    InvalidKind(String),
}

// Income sorts before Expense in listings; keep the variant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn parse(s: &str) -> Result<EntryKind, LedgerError> {
        if s.eq_ignore_ascii_case("income") {
            Ok(EntryKind::Income)
        } else if s.eq_ignore_ascii_case("expense") {
            Ok(EntryKind::Expense)
        } else {
            Err(LedgerError::InvalidKind(s.to_string()))
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub amount: Decimal, // non-negative; sign is carried by kind
    pub description: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub key: String, // YYYY-MM
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl MonthBucket {
    fn empty(key: String) -> MonthBucket {
        MonthBucket {
            key,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
            net: Decimal::ZERO,
            count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    pub buckets: Vec<MonthBucket>,
    pub yearly_income: Decimal,
    pub yearly_expense: Decimal,
    pub yearly_net: Decimal,
    pub yearly_count: usize,
}

pub fn parse_entry_date(s: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

/// Bucket key from the date's own calendar fields; no timezone math.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// The trailing 12 month keys ending at `now`'s month, oldest first.
pub fn rolling_window(now: NaiveDate) -> Vec<String> {
    let anchor = now.year() * 12 + now.month0() as i32;
    (0..WINDOW_MONTHS)
        .map(|i| anchor - (WINDOW_MONTHS - 1) + i)
        .map(|m| format!("{:04}-{:02}", m.div_euclid(12), m.rem_euclid(12) + 1))
        .collect()
}

/// Fold a snapshot of entries into the trailing-12-month report.
/// Entries dated outside the window are excluded from bucket and yearly
/// totals alike. Summation runs left to right over the input slice.
pub fn aggregate(entries: &[LedgerEntry], now: NaiveDate) -> AggregateReport {
    let mut buckets: Vec<MonthBucket> = rolling_window(now)
        .into_iter()
        .map(MonthBucket::empty)
        .collect();

    for entry in entries {
        let key = month_key(entry.date);
        let Some(bucket) = buckets.iter_mut().find(|b| b.key == key) else {
            continue;
        };
        match entry.kind {
            EntryKind::Income => bucket.income_total += entry.amount,
            EntryKind::Expense => bucket.expense_total += entry.amount,
        }
        bucket.count += 1;
    }
    for bucket in &mut buckets {
        bucket.net = bucket.income_total - bucket.expense_total;
    }

    let yearly_income: Decimal = buckets.iter().map(|b| b.income_total).sum();
    let yearly_expense: Decimal = buckets.iter().map(|b| b.expense_total).sum();
    let yearly_count = buckets.iter().map(|b| b.count).sum();
    AggregateReport {
        buckets,
        yearly_income,
        yearly_expense,
        yearly_net: yearly_income - yearly_expense,
        yearly_count,
    }
}

/// Order the full entry set for the detail listing: most recent month
/// first, income before expense within a month. The sort is stable, so
/// entries tied on month and kind keep their input order.
pub fn sort_for_listing(mut entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
    entries.sort_by(|a, b| {
        (b.date.year(), b.date.month())
            .cmp(&(a.date.year(), a.date.month()))
            .then(a.kind.cmp(&b.kind))
    });
    entries
}
