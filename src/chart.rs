//! Builds the ECharts description of the monthly income and expense chart.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Line,
};
use serde_json::{Map, Value};

use crate::{Error, summary::summarize_by_month, transaction::Transaction};

/// The text shown in place of the chart when there are no transactions.
pub const NO_DATA_LABEL: &str = "No Data";

/// Creates a line chart of monthly income and expenses.
///
/// `records` are plain mappings as produced by [Transaction::to_record]. The
/// chart has an "Income" and an "Expense" series plotted against the months
/// in ascending order. If `records` is empty, the chart only shows a
/// "No Data" label.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidRecord] if a record does not describe a transaction,
/// - or [Error::InvalidDate] if a record has an invalid date.
pub fn income_expense_chart(records: &[Map<String, Value>]) -> Result<Chart, Error> {
    if records.is_empty() {
        return Ok(no_data_chart());
    }

    let transactions = records
        .iter()
        .map(Transaction::from_record)
        .collect::<Result<Vec<_>, _>>()?;
    let summaries = summarize_by_month(&transactions)?;

    let labels: Vec<String> = summaries.iter().map(|month| month.month.clone()).collect();
    let income: Vec<f64> = summaries.iter().map(|month| month.income).collect();
    let expense: Vec<f64> = summaries.iter().map(|month| month.expense).collect();

    let chart = Chart::new()
        .title(
            Title::new()
                .text("Monthly Income vs Expense")
                .left("center"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(80)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Month")
                .data(labels),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount")
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expense").data(expense));

    Ok(chart)
}

fn no_data_chart() -> Chart {
    Chart::new().title(
        Title::new()
            .text(NO_DATA_LABEL)
            .left("center")
            .top("middle"),
    )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
