use super::types::{Inputs, Projection, Summary, ValidationError, YearlyPoint};

/// Runs the month-by-month compounding simulation and returns the yearly
/// series (year 0 first, then one point per completed year) plus the final
/// aggregate summary. Pure: identical inputs always produce identical output.
pub fn run_projection(inputs: &Inputs) -> Result<Projection, ValidationError> {
    validate(inputs)?;

    let mut balance = inputs.initial_amount;
    let mut contributed = inputs.initial_amount;
    let rate_per_year = inputs.annual_rate_percent / 100.0;
    let rate_per_period = rate_per_year / inputs.frequency.times_per_year() as f64;
    let months_per_period = inputs.frequency.months_per_period();
    let total_months = inputs.years * 12;

    let mut series = Vec::with_capacity(inputs.years as usize + 1);
    series.push(YearlyPoint {
        year: 0,
        invested: inputs.initial_amount,
        interest: 0.0,
        total: inputs.initial_amount,
    });

    for month in 1..=total_months {
        balance += inputs.monthly_contribution;
        contributed += inputs.monthly_contribution;

        if month % months_per_period == 0 {
            // The contribution made this month does not earn interest in the
            // period that closes this month; only the pre-contribution balance
            // compounds.
            let interest_earned = (balance - inputs.monthly_contribution) * rate_per_period;
            balance += interest_earned;
        }

        if month % 12 == 0 {
            series.push(YearlyPoint {
                year: month / 12,
                invested: contributed,
                interest: balance - contributed,
                total: balance,
            });
        }
    }

    Ok(Projection {
        series,
        summary: Summary {
            total_value: balance,
            total_invested: contributed,
            total_interest: balance - contributed,
        },
    })
}

fn validate(inputs: &Inputs) -> Result<(), ValidationError> {
    for (field, value) in [
        ("initial_amount", inputs.initial_amount),
        ("monthly_contribution", inputs.monthly_contribution),
        ("annual_rate_percent", inputs.annual_rate_percent),
    ] {
        if !value.is_finite() {
            return Err(ValidationError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative { field });
        }
    }
    Ok(())
}
