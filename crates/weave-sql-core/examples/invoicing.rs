//! Invoicing schema rendered for every dialect.
//!
//! Run with: cargo run --example invoicing

use chrono::NaiveDate;
use weave_sql_core::prelude::*;
use weave_sql_core::schema::{Boolean, Date, Decimal, Integer, Text};

struct Schema {
    clients: Table,
    client_id: Column<Integer>,
    client_name: Column<Text>,
    invoices: Table,
    invoice_id: Column<Integer>,
    invoice_client: Column<Integer>,
    total: Column<Decimal>,
    due: Column<Date>,
    paid: Column<Boolean>,
}

fn schema() -> Schema {
    let mut clients = Table::aliased("t_clients", "c");
    let client_id = clients.int_column("id").build();
    let client_name = clients.varchar_column("name").build();
    let clients = clients.build();

    let mut invoices = Table::aliased("t_invoices", "i");
    invoices.remark("Issued invoices");
    let invoice_id = invoices.int_column("id").build();
    let invoice_client = invoices.int_column("client_id").build();
    let total = invoices.decimal_column("total").build();
    let due = invoices.date_column("due_on").build();
    let paid = invoices.boolean_column("paid").build();
    let invoices = invoices.build();

    Schema {
        clients,
        client_id,
        client_name,
        invoices,
        invoice_id,
        invoice_client,
        total,
        due,
        paid,
    }
}

fn main() -> Result<(), SqlError> {
    let s = schema();
    let cutoff = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default();

    let overdue = select(&[&s.client_name, &Function::sum(&s.total)])
        .from(&s.clients)
        .inner_join(&s.invoices, s.invoice_client.eq(&s.client_id))
        .where_clause(s.paid.eq(false).and(s.due.is_before(cutoff)))
        .group_by(&s.client_name)
        .having(Function::sum(&s.total).gt(1000.0))
        .order_by(Function::sum(&s.total).desc())
        .limit(10);

    let mark_paid = update(&s.invoices)
        .set(&s.paid, true)
        .where_clause(s.invoice_id.eq(Placeholder::new("invoice")));

    let purge = delete_from(&s.invoices)
        .where_clause(s.paid.eq(true).and(s.due.is_before(cutoff)))
        .limit(500);

    let issue = insert_into(&s.invoices)
        .value(&s.invoice_client, 7)
        .value(&s.total, 125.5)
        .value(&s.due, cutoff)
        .value(&s.paid, false);

    for dialect in Dialect::ALL {
        println!("-- {dialect}");
        println!("{}\n", overdue.build_indented(dialect, Indentation::enabled())?);
        println!("{}\n", mark_paid.build(dialect)?);
        match purge.build(dialect) {
            Ok(sql) => println!("{sql}\n"),
            Err(err) => println!("-- {err}\n"),
        }
        println!("{}\n", issue.build(dialect)?);
    }
    Ok(())
}
