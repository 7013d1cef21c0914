use chrono::{Local, NaiveDate};
use log::debug;
use std::fmt;

use crate::calendar::{last_payment_date, MAX_BILLING_DAY_OFFSET};
use crate::error::{AmortizationError, Result};
use crate::schedule::{self, ScheduleRow, ScheduleSummary};

/// Decimal places every money amount is rounded to.
pub const CURRENCY_DECIMALS: u32 = 2;

/// The terms of a fixed-rate loan repaid monthly.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanTerms {
    pub principal: f64,
    /// annual rate in percent, i.e. 2.99 for 2.99%
    pub annual_rate_percent: f64,
    pub term_months: u32,
    pub start_date: NaiveDate,
    /// paid toward principal on top of every scheduled payment
    pub extra_payment: f64,
    pub billing_day_offset: Option<u32>,
}

impl LoanTerms {
    /// New terms with no extra payment and anniversary billing dates. A missing
    /// `start_date` means today in local time.
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_months: u32,
        start_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            start_date: start_date.unwrap_or_else(|| Local::now().date_naive()),
            extra_payment: 0.,
            billing_day_offset: None,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: f64) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    /// Bill `offset` days after the first of each month instead of on the
    /// start date's day of month.
    pub fn with_billing_day_offset(mut self, offset: u32) -> Self {
        self.billing_day_offset = Some(offset);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() || round_currency(self.principal) <= 0. {
            return Err(AmortizationError::invalid(
                "principal",
                format!("must be a positive amount of at least one cent, got {}", self.principal),
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0. {
            return Err(AmortizationError::invalid(
                "annual_rate_percent",
                format!("must be zero or positive, got {}", self.annual_rate_percent),
            ));
        }
        if self.term_months == 0 {
            return Err(AmortizationError::invalid(
                "term_months",
                "must be at least one month",
            ));
        }
        if !self.extra_payment.is_finite() || self.extra_payment < 0. {
            return Err(AmortizationError::invalid(
                "extra_payment",
                format!("must be zero or positive, got {}", self.extra_payment),
            ));
        }
        if let Some(offset) = self.billing_day_offset {
            if offset > MAX_BILLING_DAY_OFFSET {
                return Err(AmortizationError::invalid(
                    "billing_day_offset",
                    format!("must be at most {}, got {}", MAX_BILLING_DAY_OFFSET, offset),
                ));
            }
        }
        last_payment_date(self.start_date, self.term_months, self.billing_day_offset)?;
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100. / 12.
    }

    /// Fixed monthly payment, excluding any extra payment.
    pub fn scheduled_payment(&self) -> f64 {
        get_pmt_amount(&self.principal, &self.annual_rate_percent, &self.term_months)
    }

    pub fn schedule(&self) -> Result<(Vec<ScheduleRow>, ScheduleSummary)> {
        schedule::schedule(self)
    }
}

impl fmt::Display for LoanTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "principal ${:.2}, rate {}%, {} months from {}, extra ${:.2}",
            self.principal,
            self.annual_rate_percent,
            self.term_months,
            self.start_date,
            self.extra_payment
        )
    }
}

/// Parses a loan start date written as `YYYYMMDD` or `YYYY-MM-DD`.
pub fn parse_start_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();
    let parsed = if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        match (date[0..4].parse(), date[4..6].parse(), date[6..8].parse()) {
            (Ok(yr), Ok(mon), Ok(day)) => NaiveDate::from_ymd_opt(yr, mon, day),
            _ => None,
        }
    } else {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    };

    parsed.ok_or_else(|| {
        AmortizationError::invalid(
            "start_date",
            format!("'{}' is not a calendar date in YYYYMMDD or YYYY-MM-DD form", date),
        )
    })
}

pub(crate) fn round(amt: f64, dec: u32) -> f64 {
    let factor = 10_f64.powi(dec as i32);
    let rounded = (amt * factor).round() / factor;
    // fold -0.0 into 0.0
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}

pub(crate) fn round_currency(amt: f64) -> f64 {
    round(amt, CURRENCY_DECIMALS)
}

// standard annuity payment, rounded to currency precision
fn get_pmt_amount(
    &principal: &f64,           // loan principal
    &annual_rate_percent: &f64, // annual interest rate in percent (i.e., 2.99, 7.0)
    &term_months: &u32,         // number of monthly payments
) -> f64 {
    let pmt_rate = annual_rate_percent / 100. / 12.;
    let total_pmts = f64::from(term_months);
    let discount = 1. - (1. + pmt_rate).powf(-total_pmts);

    // a rate too small to move the discount factor behaves like no interest
    let pmt = if pmt_rate > 0. && discount > 0. {
        principal * pmt_rate / discount
    } else {
        principal / total_pmts
    };
    debug!(
        "scheduled payment {} for {} at {}% over {} months",
        pmt, principal, annual_rate_percent, term_months
    );
    round_currency(pmt)
}
