use amortization::loan::parse_start_date;
use amortization::{LoanTerms, ScheduleRow};
use log::info;
use simple_logger::SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()?;

    let terms = LoanTerms::new(35000., 2.99, 72, Some(parse_start_date("20181025")?))
        .with_extra_payment(100.)
        .with_billing_day_offset(15);
    info!("amortizing {}", terms);

    let (rows, summary) = terms.schedule()?;
    show_amortization(&rows);
    println!("{}", summary);
    Ok(())
}

fn show_amortization(rows: &[ScheduleRow]) {
    for row in rows {
        println!("{}", row);
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<LoanTerms>();
    is_normal::<ScheduleRow>();
    is_normal::<amortization::ScheduleSummary>();
    is_normal::<amortization::AmortizationError>();
}
