//! Building a reporting query with joins, grouping, and a limit.
//!
//! Run with: cargo run --example report_query -p quickql

use quickql::{QueryError, query};

fn main() -> Result<(), QueryError> {
    let q = query()
        .select(&["p.name", "p.category"])
        .select_as("SUM(oi.quantity)", "total_sold")
        .select_as("SUM(oi.price * oi.quantity)", "revenue")
        .from(&["products p"])
        .add("INNER JOIN", &["order_items oi ON oi.product_id = p.id"])?
        .add("INNER JOIN", &["orders o ON o.id = oi.order_id"])?
        .and_where("o.status = 'completed'")
        .and_where("o.created_at >= '2023-01-01'")
        .group_by(&["p.id", "p.name", "p.category"])
        .and_having("SUM(oi.quantity) > 10")
        .order_by(&["revenue DESC", "total_sold DESC"])
        .limit(100);

    println!("{q}");
    Ok(())
}
