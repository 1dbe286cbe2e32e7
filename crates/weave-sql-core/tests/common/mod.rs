#![allow(dead_code)]

use weave_sql_core::schema::{Column, Integer, Table, Text};

pub struct Persons {
    pub table: Table,
    pub lastname: Column<Text>,
    pub age: Column<Integer>,
}

pub fn persons() -> Persons {
    let mut table = Table::builder("persons");
    let lastname = table.varchar_column("lastname").build();
    let age = table.int_column("age").build();
    Persons {
        table: table.build(),
        lastname,
        age,
    }
}

pub struct Orders {
    pub table: Table,
    pub id: Column<Integer>,
}

/// `t_orders` exposed under the alias `orders`.
pub fn orders() -> Orders {
    let mut table = Table::aliased("t_orders", "orders");
    let id = table.int_column("id").build();
    Orders {
        table: table.build(),
        id,
    }
}
