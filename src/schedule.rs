use chrono::NaiveDate;
use log::{debug, trace};
use std::fmt;

use crate::calendar::{days_between, payment_dates};
use crate::error::Result;
use crate::loan::{round_currency, LoanTerms};

/// One period of an amortization schedule. Row 0 is the disbursement.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRow {
    pub period_index: u32,
    pub date: NaiveDate,
    pub start_balance: f64,
    /// principal plus interest, excluding the extra payment
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_accrued: f64,
    pub extra_applied: f64,
    pub balance: f64,
}

impl ScheduleRow {
    fn disbursement(date: NaiveDate, principal: f64) -> Self {
        Self {
            period_index: 0,
            date,
            start_balance: principal,
            payment: 0.,
            principal_paid: 0.,
            interest_accrued: 0.,
            extra_applied: 0.,
            balance: principal,
        }
    }

    /// Everything paid in the period, extra payment included.
    pub fn total_cash(&self) -> f64 {
        round_currency(self.payment + self.extra_applied)
    }
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, date {}, payment ${:.2}, interest ${:.2}, principal ${:.2}, extra ${:.2}, balance ${:.2}",
            self.period_index,
            self.date,
            self.payment,
            self.interest_accrued,
            self.principal_paid,
            self.extra_applied,
            self.balance
        )
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSummary {
    pub payoff_date: NaiveDate,
    pub months_to_payoff: u32,
    pub annual_rate_percent: f64,
    pub scheduled_payment: f64,
    pub extra_payment: f64,
    pub total_interest_paid: f64,
    pub total_principal_paid: f64,
    pub total_extra_paid: f64,
}

impl ScheduleSummary {
    fn from_rows(rows: &[ScheduleRow], terms: &LoanTerms, scheduled_payment: f64) -> Self {
        let last = &rows[rows.len() - 1];
        let total = |field: fn(&ScheduleRow) -> f64| round_currency(rows.iter().map(field).sum());

        Self {
            payoff_date: last.date,
            months_to_payoff: last.period_index,
            annual_rate_percent: terms.annual_rate_percent,
            scheduled_payment,
            extra_payment: terms.extra_payment,
            total_interest_paid: total(|row| row.interest_accrued),
            total_principal_paid: total(|row| row.principal_paid),
            total_extra_paid: total(|row| row.extra_applied),
        }
    }
}

impl fmt::Display for ScheduleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "paid off {} after {} months at {}%, payment ${:.2} + extra ${:.2}, interest ${:.2}, principal ${:.2}, additional ${:.2}",
            self.payoff_date,
            self.months_to_payoff,
            self.annual_rate_percent,
            self.scheduled_payment,
            self.extra_payment,
            self.total_interest_paid,
            self.total_principal_paid,
            self.total_extra_paid
        )
    }
}

/// Builds the month-by-month schedule for `terms` and summarises it.
///
/// Interest accrues on an actual/365 basis over the days between consecutive
/// billing dates, on the balance left after the previous period. The scheduled
/// payment covers interest first; the remainder and then the extra payment
/// reduce the balance, both capped so it never goes below zero. The final
/// scheduled period retires whatever balance is left, and the schedule stops
/// at the first period that brings the balance to zero.
///
/// Every amount is rounded to cents as it is produced and carried forward
/// rounded; totals are sums of the rounded row values.
pub fn schedule(terms: &LoanTerms) -> Result<(Vec<ScheduleRow>, ScheduleSummary)> {
    terms.validate()?;

    let scheduled_payment = terms.scheduled_payment();
    let dates = payment_dates(terms.start_date, terms.term_months, terms.billing_day_offset)?;
    let annual_rate = terms.annual_rate_percent;
    // amounts are carried in cents from the first row
    let principal = round_currency(terms.principal);
    let extra_payment = round_currency(terms.extra_payment);

    let mut rows = Vec::with_capacity(dates.len());
    rows.push(ScheduleRow::disbursement(dates[0], principal));

    let mut balance = principal;
    for (period, window) in (1..=terms.term_months).zip(dates.windows(2)) {
        let (begin_date, end_date) = (&window[0], &window[1]);
        let days = days_between(begin_date, end_date);

        let interest = round_currency(balance * annual_rate * days as f64 / 100. / 365.);
        let mut principal_paid = round_currency(scheduled_payment - interest)
            .max(0.)
            .min(balance);
        let extra_applied = extra_payment.min(round_currency(balance - principal_paid));
        if period == terms.term_months {
            principal_paid = round_currency(balance - extra_applied);
        }

        let start_balance = balance;
        balance = round_currency(balance - principal_paid - extra_applied);
        trace!(
            "period {}, {} days to {}, interest {}, principal {}, extra {}, end bal {}",
            period,
            days,
            end_date,
            interest,
            principal_paid,
            extra_applied,
            balance
        );

        rows.push(ScheduleRow {
            period_index: period,
            date: *end_date,
            start_balance,
            payment: round_currency(principal_paid + interest),
            principal_paid,
            interest_accrued: interest,
            extra_applied,
            balance,
        });

        if balance <= 0. {
            break;
        }
    }

    let summary = ScheduleSummary::from_rows(&rows, terms, scheduled_payment);
    debug!("{}: {}", terms, summary);
    Ok((rows, summary))
}
