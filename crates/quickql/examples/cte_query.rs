//! Composing a query from common table expressions.
//!
//! Run with: cargo run --example cte_query -p quickql

use quickql::{QueryError, query};

fn main() -> Result<(), QueryError> {
    let monthly_sales = "
        SELECT
            DATE_TRUNC('month', created_at) AS month,
            SUM(total_amount) AS monthly_total,
            COUNT(*) AS order_count
        FROM orders
        WHERE status = 'completed'
        GROUP BY 1
    ";

    let q = query()
        .with("monthly_sales", monthly_sales)?
        .with("active_users", "SELECT id FROM users WHERE active = 1")?
        .select(&["m.month", "m.monthly_total", "m.order_count"])
        .from(&["monthly_sales m"])
        .and_where("m.monthly_total > 10000")
        .order_by(&["m.month DESC"])
        .limit(12);

    println!("{q}");
    Ok(())
}
