//! Loan amortization schedules.
//!
//! Build a [`LoanTerms`], then call [`schedule()`] (or [`LoanTerms::schedule`])
//! to get the month-by-month rows and a summary of the whole loan.

pub mod calendar;
pub mod error;
pub mod loan;
pub mod schedule;

pub use error::{AmortizationError, Result};
pub use loan::LoanTerms;
pub use schedule::{schedule, ScheduleRow, ScheduleSummary};
