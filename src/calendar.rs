use chrono::{Datelike, Days, Months, NaiveDate};
use log::trace;

use crate::error::{AmortizationError, Result};

/// Largest billing day offset accepted; keeps every shifted date inside its month.
pub const MAX_BILLING_DAY_OFFSET: u32 = 27;

/// Period-boundary dates for a loan: the start date followed by one date per
/// scheduled payment, `term_months + 1` dates in all.
///
/// Without an offset, period `k` falls on the start date advanced `k` calendar
/// months, clamped to the last day of shorter months (Jan 31 -> Feb 29 -> Mar 31).
/// With `Some(offset)`, period `k` falls `offset` days after the first of the
/// `k`-th month following the start month, so `Some(15)` bills on the 16th.
pub fn payment_dates(
    start_date: NaiveDate,
    term_months: u32,
    billing_day_offset: Option<u32>,
) -> Result<Vec<NaiveDate>> {
    // the calendar must reach the final period before anything is allocated
    last_payment_date(start_date, term_months, billing_day_offset)?;

    let mut dates = Vec::with_capacity(term_months as usize + 1);
    dates.push(start_date);

    for period in 1..=term_months {
        let end_date = get_period_end(&start_date, period, billing_day_offset)
            .ok_or_else(|| out_of_range(&start_date, term_months))?;
        trace!("period {} ends {}", period, end_date);
        dates.push(end_date);
    }
    Ok(dates)
}

/// Date of the final scheduled payment, or an error against `term_months`
/// when it falls outside the supported calendar.
pub fn last_payment_date(
    start_date: NaiveDate,
    term_months: u32,
    billing_day_offset: Option<u32>,
) -> Result<NaiveDate> {
    get_period_end(&start_date, term_months, billing_day_offset)
        .ok_or_else(|| out_of_range(&start_date, term_months))
}

fn get_period_end(
    &start_date: &NaiveDate,
    period: u32,
    billing_day_offset: Option<u32>,
) -> Option<NaiveDate> {
    match billing_day_offset {
        None => start_date.checked_add_months(Months::new(period)),
        Some(offset) => start_date
            .with_day(1)
            .and_then(|month_start| month_start.checked_add_months(Months::new(period)))
            .and_then(|billing_month| billing_month.checked_add_days(Days::new(u64::from(offset)))),
    }
}

fn out_of_range(start_date: &NaiveDate, term_months: u32) -> AmortizationError {
    AmortizationError::invalid(
        "term_months",
        format!(
            "{} months from {} runs past the supported calendar",
            term_months, start_date
        ),
    )
}

/// Actual number of days from `begin_date` to `end_date`.
pub fn days_between(&begin_date: &NaiveDate, &end_date: &NaiveDate) -> i64 {
    end_date.signed_duration_since(begin_date).num_days()
}
