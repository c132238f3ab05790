// src/analytics/rollup.rs

use std::collections::{btree_map::Entry, BTreeMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    analytics::{
        margin_percent,
        time_of_day::{DayPart, DayPartBoundaries, Histogram},
        ReportWindow,
    },
    models::{
        analytics::{CategoryTotal, DaySeriesPoint, ItemStat},
        menu::MenuCatalog,
        sales::{Sale, SaleItem},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Day,
    Category,
    MenuItem,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Day(NaiveDate),
    /// `None` = item sem categoria (ou apagado do cardápio).
    Category(Option<Uuid>),
    MenuItem(Uuid),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub quantity: i64,
}

impl Totals {
    fn add_line(&mut self, item: &SaleItem) {
        self.revenue += item.revenue();
        self.cost += item.total_cost();
        self.quantity += i64::from(item.quantity);
    }

    pub fn profit(&self) -> Decimal {
        self.revenue - self.cost
    }

    pub fn margin_percent(&self) -> Decimal {
        margin_percent(self.profit(), self.revenue)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RollupRow {
    pub key: GroupKey,
    pub label: String,
    pub totals: Totals,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollupResult {
    /// Ordenadas pela chave.
    pub rows: Vec<RollupRow>,
    pub totals: Totals,
}

/// Soma receita e custo (snapshot da venda) das vendas concluídas, agrupando pela dimensão pedida.
pub fn aggregate(sales: &[Sale], dimension: Dimension, catalog: &MenuCatalog) -> RollupResult {
    let mut groups: BTreeMap<GroupKey, (String, Totals)> = BTreeMap::new();
    let mut totals = Totals::default();

    for sale in sales.iter().filter(|s| s.is_completed()) {
        for item in &sale.items {
            let key = match dimension {
                Dimension::Day => GroupKey::Day(sale.sold_at.date()),
                Dimension::Category => GroupKey::Category(catalog.category_id(&item.menu_item_id)),
                Dimension::MenuItem => GroupKey::MenuItem(item.menu_item_id),
            };

            let group = match groups.entry(key) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let label = match entry.key() {
                        GroupKey::Day(day) => day.to_string(),
                        GroupKey::Category(_) => catalog.category_name(&item.menu_item_id).to_string(),
                        GroupKey::MenuItem(id) => catalog.item_name(id).to_string(),
                    };
                    entry.insert((label, Totals::default()))
                }
            };

            group.1.add_line(item);
            totals.add_line(item);
        }
    }

    RollupResult {
        rows: groups
            .into_iter()
            .map(|(key, (label, totals))| RollupRow { key, label, totals })
            .collect(),
        totals,
    }
}

/// Série diária densa: todo dia da janela aparece, mesmo sem vendas.
pub fn day_series(sales: &[Sale], window: &ReportWindow, catalog: &MenuCatalog) -> Vec<DaySeriesPoint> {
    let rollup = aggregate(sales, Dimension::Day, catalog);

    let mut by_day: BTreeMap<NaiveDate, Totals> = window.days().map(|day| (day, Totals::default())).collect();
    for row in rollup.rows {
        if let GroupKey::Day(day) = row.key {
            if let Some(slot) = by_day.get_mut(&day) {
                *slot = row.totals;
            }
        }
    }

    by_day
        .into_iter()
        .map(|(date, totals)| DaySeriesPoint {
            date,
            revenue: totals.revenue,
            cost: totals.cost,
        })
        .collect()
}

/// Receita por categoria, maior primeiro.
pub fn category_totals(sales: &[Sale], catalog: &MenuCatalog) -> Vec<CategoryTotal> {
    let mut rows = aggregate(sales, Dimension::Category, catalog).rows;
    rows.sort_by(|a, b| b.totals.revenue.cmp(&a.totals.revenue));

    rows.into_iter()
        .map(|row| CategoryTotal {
            name: row.label,
            revenue: row.totals.revenue,
        })
        .collect()
}

// =========================================================================
//  Desempenho por item
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub menu_item_id: Uuid,
    pub name: String,
    pub category: String,
    pub totals: Totals,
    /// Quantidade vendida por período do dia.
    pub day_parts: Histogram<DayPart>,
}

impl ItemRecord {
    pub fn to_stat(&self, commonly_with: Option<String>) -> ItemStat {
        ItemStat {
            id: self.menu_item_id,
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.totals.quantity,
            revenue: self.totals.revenue,
            cost: self.totals.cost,
            profit: self.totals.profit(),
            margin: self.totals.margin_percent(),
            top_time_of_day: self.day_parts.top(),
            commonly_with,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMetric {
    Revenue,
    Profit,
    Quantity,
    Margin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Registros por item, montados uma vez. Toda visão "Top N" sai daqui.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPerformance {
    records: Vec<ItemRecord>,
}

pub fn item_performance(
    sales: &[Sale],
    catalog: &MenuCatalog,
    day_parts: &DayPartBoundaries,
) -> ItemPerformance {
    let mut by_item: BTreeMap<Uuid, ItemRecord> = BTreeMap::new();

    for sale in sales.iter().filter(|s| s.is_completed()) {
        let part = day_parts.bucket(sale.sold_at);

        for item in &sale.items {
            let record = by_item
                .entry(item.menu_item_id)
                .or_insert_with(|| ItemRecord {
                    menu_item_id: item.menu_item_id,
                    name: catalog.item_name(&item.menu_item_id).to_string(),
                    category: catalog.category_name(&item.menu_item_id).to_string(),
                    totals: Totals::default(),
                    day_parts: Histogram::default(),
                });

            record.totals.add_line(item);
            record.day_parts.add(part, u64::try_from(item.quantity).unwrap_or(0));
        }
    }

    ItemPerformance {
        records: by_item.into_values().collect(),
    }
}

impl ItemPerformance {
    pub fn records(&self) -> &[ItemRecord] {
        &self.records
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn top(&self, metric: ItemMetric, order: SortOrder, limit: usize) -> Vec<&ItemRecord> {
        let mut ranked: Vec<&ItemRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| {
            let ordering = match metric {
                ItemMetric::Revenue => a.totals.revenue.cmp(&b.totals.revenue),
                ItemMetric::Profit => a.totals.profit().cmp(&b.totals.profit()),
                ItemMetric::Quantity => a.totals.quantity.cmp(&b.totals.quantity),
                ItemMetric::Margin => a.totals.margin_percent().cmp(&b.totals.margin_percent()),
            };
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        ranked.truncate(limit);
        ranked
    }
}
