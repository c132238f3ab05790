// Construtores usados pelos testes do motor.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    menu::{MenuCatalog, MenuItemRef},
    sales::{Sale, SaleItem, SaleStatus},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 15, 0).unwrap()
}

pub fn line(menu_item_id: Uuid, quantity: i32, price: Decimal, cost: Decimal) -> SaleItem {
    SaleItem {
        id: Uuid::new_v4(),
        sale_id: Uuid::nil(),
        menu_item_id,
        quantity,
        price,
        cost,
    }
}

pub fn sale(sold_at: NaiveDateTime, items: Vec<SaleItem>) -> Sale {
    let id = Uuid::new_v4();
    let total = items.iter().map(SaleItem::revenue).sum();
    Sale {
        id,
        tenant_id: Uuid::nil(),
        sold_at,
        total,
        status: SaleStatus::Completed,
        table_id: None,
        waiter_id: None,
        items: items
            .into_iter()
            .map(|item| SaleItem { sale_id: id, ..item })
            .collect(),
    }
}

/// Um item de cardápio com categoria, para rótulos nos testes.
pub struct Menu {
    pub entries: Vec<MenuItemRef>,
}

impl Menu {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn item(&mut self, name: &str, category: (Uuid, &str)) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(MenuItemRef {
            id,
            name: name.to_string(),
            category_id: Some(category.0),
            category_name: Some(category.1.to_string()),
        });
        id
    }

    pub fn catalog(&self) -> MenuCatalog {
        MenuCatalog::new(self.entries.clone())
    }
}
