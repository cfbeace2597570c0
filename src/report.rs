//! Renders a standalone HTML report with the income and expense chart, the
//! monthly totals and the list of transactions.

use std::{ops::Range, sync::OnceLock};

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

use crate::{
    Error,
    chart::income_expense_chart,
    summary::{MonthlySummary, summarize_by_month, totals},
    transaction::Transaction,
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The HTML element ID of the chart container.
const CHART_ID: &str = "income-expense-chart";

const TABLE_HEADER_STYLE: &str =
    "text-align: left; padding: 0.25rem 1rem; border-bottom: 2px solid #ccc;";
const TABLE_CELL_STYLE: &str = "padding: 0.25rem 1rem; border-bottom: 1px solid #eee;";

/// Renders the report for `transactions` as a complete HTML document.
///
/// The chart is drawn in the browser by ECharts, which is loaded from a CDN.
///
/// # Errors
/// Returns [Error::InvalidDate] if a transaction has an invalid date.
pub fn render_report(transactions: &[Transaction]) -> Result<String, Error> {
    let records: Vec<_> = transactions.iter().map(Transaction::to_record).collect();
    let chart = income_expense_chart(&records)?;
    let summaries = summarize_by_month(transactions)?;

    let page = html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Finance Report" }
                script src=(ECHARTS_URL) {}
                script { (chart_script(&chart.to_string())) }
            }
            body style="font-family: sans-serif; max-width: 960px; margin: 0 auto;"
            {
                h1 { "Finance Report" }
                div id=(CHART_ID) style="width: 100%; min-height: 380px;" {}
                (summary_table(&summaries))
                (transactions_table(transactions))
            }
        }
    };

    Ok(page.into_string())
}

fn chart_script(options: &str) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }});"#
    ))
}

fn summary_table(summaries: &[MonthlySummary]) -> Markup {
    let (total_income, total_expense) = totals(summaries);

    html!(
        section id="monthly-summary"
        {
            h2 { "Monthly Summary" }

            @if summaries.is_empty() {
                p { "No transactions yet." }
            } @else {
                table
                {
                    thead
                    {
                        tr
                        {
                            th style=(TABLE_HEADER_STYLE) { "Month" }
                            th style=(TABLE_HEADER_STYLE) { "Income" }
                            th style=(TABLE_HEADER_STYLE) { "Expense" }
                            th style=(TABLE_HEADER_STYLE) { "Net" }
                        }
                    }
                    tbody
                    {
                        @for month in summaries {
                            tr
                            {
                                td style=(TABLE_CELL_STYLE) { (month.month) }
                                td style=(TABLE_CELL_STYLE) { (format_currency(month.income)) }
                                td style=(TABLE_CELL_STYLE) { (format_currency(month.expense)) }
                                td style=(TABLE_CELL_STYLE) { (format_currency(month.net())) }
                            }
                        }
                    }
                    tfoot
                    {
                        tr
                        {
                            th style=(TABLE_CELL_STYLE) { "Total" }
                            td style=(TABLE_CELL_STYLE) { (format_currency(total_income)) }
                            td style=(TABLE_CELL_STYLE) { (format_currency(total_expense)) }
                            td style=(TABLE_CELL_STYLE) {
                                (format_currency(total_income - total_expense))
                            }
                        }
                    }
                }
            }
        }
    )
}

fn transactions_table(transactions: &[Transaction]) -> Markup {
    html!(
        section id="transactions"
        {
            h2 { "Transactions" }

            table
            {
                thead
                {
                    tr
                    {
                        th style=(TABLE_HEADER_STYLE) { "Date" }
                        th style=(TABLE_HEADER_STYLE) { "Amount" }
                        th style=(TABLE_HEADER_STYLE) { "Category" }
                        th style=(TABLE_HEADER_STYLE) { "Description" }
                    }
                }
                tbody
                {
                    @for transaction in transactions {
                        tr
                        {
                            td style=(TABLE_CELL_STYLE) { (transaction.date) }
                            td style=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            td style=(TABLE_CELL_STYLE) { (transaction.category) }
                            td style=(TABLE_CELL_STYLE) { (transaction.description) }
                        }
                    }
                }
            }
        }
    )
}

/// Magnitudes numfmt formats with digit grouping. Outside this range it
/// switches to scientific notation, so those amounts are formatted by hand.
const GROUPED_RANGE: Range<f64> = 1.0..1e12;

/// Formats `number` as dollars with two decimal places, e.g. "-$12.30".
///
/// The amount is rounded to the nearest cent first, so amounts smaller than
/// half a cent are shown as "$0.00".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let cents = (number * 100.0).round() / 100.0;
    let magnitude = cents.abs();

    if magnitude == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    }

    if !GROUPED_RANGE.contains(&magnitude) {
        let sign = if cents < 0.0 { "-" } else { "" };
        return format!("{sign}${magnitude:.2}");
    }

    let mut formatted_string = if cents < 0.0 {
        negative_fmt.fmt_string(magnitude)
    } else {
        positive_fmt.fmt_string(magnitude)
    };

    // numfmt omits trailing zeros, so we must add them ourselves.
    // For example, "12.30" is rendered as "12.3" so we append "0".
    match formatted_string.rfind('.') {
        Some(point) => {
            for _ in formatted_string.len() - point..3 {
                formatted_string.push('0');
            }
        }
        None => formatted_string.push_str(".00"),
    }

    formatted_string
}
