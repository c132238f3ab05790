// src/analytics/combos.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    analytics::{
        margin_percent,
        time_of_day::{DayPart, DayPartBoundaries, Histogram},
    },
    models::{analytics::ComboView, menu::MenuCatalog, sales::Sale},
};

/// Estatística acumulada de um par de itens. `items.0 < items.1` sempre.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboStat {
    pub items: (Uuid, Uuid),
    pub count: u64,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub day_parts: Histogram<DayPart>,
}

impl ComboStat {
    fn new(items: (Uuid, Uuid)) -> Self {
        Self {
            items,
            count: 0,
            revenue: Decimal::ZERO,
            profit: Decimal::ZERO,
            day_parts: Histogram::default(),
        }
    }

    pub fn margin_percent(&self) -> Decimal {
        margin_percent(self.profit, self.revenue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestPartner {
    pub item: Uuid,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboMining {
    pub combos: BTreeMap<(Uuid, Uuid), ComboStat>,
    pub best_partner: HashMap<Uuid, BestPartner>,
}

/// Conta os pares de itens distintos de cada venda concluída.
///
/// Cada par recebe a receita e o lucro da venda INTEIRA, sem rateio: uma venda com 3 itens
/// soma o total dela nos 3 pares. É o comportamento que o dashboard sempre mostrou;
/// não ratear sem alinhar com o produto.
pub fn mine_combos(sales: &[Sale], day_parts: &DayPartBoundaries) -> ComboMining {
    let mut mining = ComboMining::default();

    for sale in sales.iter().filter(|s| s.is_completed()) {
        // Quantidade vira presença; o BTreeSet já deixa os ids ordenados
        let distinct: Vec<Uuid> = sale
            .items
            .iter()
            .map(|item| item.menu_item_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if distinct.len() < 2 {
            continue;
        }

        let revenue = sale.line_revenue();
        let profit = sale.line_profit();
        let part = day_parts.bucket(sale.sold_at);

        for (i, &a) in distinct.iter().enumerate() {
            for &b in &distinct[i + 1..] {
                let combo = mining
                    .combos
                    .entry((a, b))
                    .or_insert_with(|| ComboStat::new((a, b)));
                combo.count += 1;
                combo.revenue += revenue;
                combo.profit += profit;
                combo.day_parts.add(part, 1);

                let count = combo.count;
                mining.update_best_partner(a, b, count);
                mining.update_best_partner(b, a, count);
            }
        }
    }

    mining
}

impl ComboMining {
    fn update_best_partner(&mut self, item: Uuid, partner: Uuid, count: u64) {
        let current = self.best_partner.get(&item).map_or(0, |best| best.count);
        if count > current {
            self.best_partner.insert(item, BestPartner { item: partner, count });
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Pares por ocorrência, do mais frequente. Empates seguem a ordem dos ids.
    pub fn ranked(&self) -> Vec<&ComboStat> {
        let mut ranked: Vec<&ComboStat> = self.combos.values().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    pub fn top(&self, catalog: &MenuCatalog, limit: usize) -> Vec<ComboView> {
        self.ranked()
            .into_iter()
            .take(limit)
            .map(|combo| ComboView {
                items: vec![
                    catalog.item_name(&combo.items.0).to_string(),
                    catalog.item_name(&combo.items.1).to_string(),
                ],
                count: combo.count,
                revenue: combo.revenue,
                profit: combo.profit,
                margin: combo.margin_percent(),
                top_time_of_day: combo.day_parts.top(),
            })
            .collect()
    }

    /// Nome do parceiro mais frequente de `item`, para o campo `commonlyWith`.
    pub fn commonly_with(&self, item: &Uuid, catalog: &MenuCatalog) -> Option<String> {
        self.best_partner
            .get(item)
            .map(|best| catalog.item_name(&best.item).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::{at, line, sale, Menu};
    use rust_decimal_macros::dec;

    fn key(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
        if a < b { (a, b) } else { (b, a) }
    }

    #[test]
    fn each_pair_gets_the_full_sale_revenue() {
        let mut menu = Menu::new();
        let cat = (Uuid::new_v4(), "Mains");
        let a = menu.item("A", cat);
        let b = menu.item("B", cat);
        let c = menu.item("C", cat);

        // R = 20 + 15 + 5 = 40
        let sales = vec![sale(
            at(2026, 3, 2, 19),
            vec![
                line(a, 1, dec!(20), dec!(8)),
                line(b, 1, dec!(15), dec!(5)),
                line(c, 1, dec!(5), dec!(1)),
            ],
        )];

        let mining = mine_combos(&sales, &DayPartBoundaries::default());

        assert_eq!(mining.combos.len(), 3);
        for pair in [key(a, b), key(a, c), key(b, c)] {
            let combo = &mining.combos[&pair];
            assert_eq!(combo.count, 1);
            assert_eq!(combo.revenue, dec!(40));
            assert_eq!(combo.profit, dec!(26));
        }
    }

    #[test]
    fn quantity_collapses_to_presence() {
        let mut menu = Menu::new();
        let cat = (Uuid::new_v4(), "Drinks");
        let beer = menu.item("Beer", cat);
        let wings = menu.item("Wings", cat);

        let sales = vec![sale(
            at(2026, 3, 2, 21),
            vec![
                line(beer, 3, dec!(6), dec!(2)),
                line(wings, 1, dec!(12), dec!(4)),
                line(beer, 1, dec!(6), dec!(2)),
            ],
        )];

        let mining = mine_combos(&sales, &DayPartBoundaries::default());

        assert_eq!(mining.combos.len(), 1);
        assert_eq!(mining.combos[&key(beer, wings)].count, 1);
        assert_eq!(mining.combos[&key(beer, wings)].revenue, dec!(36));
    }

    #[test]
    fn single_item_sales_produce_no_combos() {
        let mut menu = Menu::new();
        let soup = menu.item("Soup", (Uuid::new_v4(), "Starters"));

        let mining = mine_combos(
            &[sale(at(2026, 3, 2, 12), vec![line(soup, 2, dec!(6), dec!(2))])],
            &DayPartBoundaries::default(),
        );

        assert!(mining.is_empty());
        assert!(mining.best_partner.is_empty());
    }

    #[test]
    fn best_partner_is_updated_for_both_members() {
        let mut menu = Menu::new();
        let cat = (Uuid::new_v4(), "Mains");
        let burger = menu.item("Burger", cat);
        let fries = menu.item("Fries", cat);
        let shake = menu.item("Shake", cat);
        let catalog = menu.catalog();

        let price = dec!(5);
        let cost = dec!(2);
        let sales = vec![
            sale(at(2026, 3, 2, 12), vec![line(burger, 1, price, cost), line(shake, 1, price, cost)]),
            sale(at(2026, 3, 2, 13), vec![line(burger, 1, price, cost), line(fries, 1, price, cost)]),
            sale(at(2026, 3, 2, 19), vec![line(burger, 1, price, cost), line(fries, 1, price, cost)]),
        ];

        let mining = mine_combos(&sales, &DayPartBoundaries::default());

        assert_eq!(mining.best_partner[&burger], BestPartner { item: fries, count: 2 });
        assert_eq!(mining.best_partner[&fries], BestPartner { item: burger, count: 2 });
        assert_eq!(mining.best_partner[&shake], BestPartner { item: burger, count: 1 });
        assert_eq!(mining.commonly_with(&burger, &catalog).as_deref(), Some("Fries"));
    }

    #[test]
    fn top_combos_are_sorted_by_count_and_capped() {
        let mut menu = Menu::new();
        let cat = (Uuid::new_v4(), "Mains");
        let items: Vec<Uuid> = (0..6).map(|i| menu.item(&format!("Item {i}"), cat)).collect();
        let catalog = menu.catalog();

        // 15 pares distintos numa venda, mais uma repetição do par (0, 1)
        let all_lines = items.iter().map(|&id| line(id, 1, dec!(10), dec!(4))).collect();
        let sales = vec![
            sale(at(2026, 3, 2, 12), all_lines),
            sale(
                at(2026, 3, 3, 18),
                vec![line(items[0], 1, dec!(10), dec!(4)), line(items[1], 1, dec!(10), dec!(4))],
            ),
        ];

        let mining = mine_combos(&sales, &DayPartBoundaries::default());
        let top = mining.top(&catalog, 10);

        assert_eq!(mining.combos.len(), 15);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].count, 2);
        assert!(top[0].items.contains(&"Item 0".to_string()));
        assert!(top[0].items.contains(&"Item 1".to_string()));
        assert_eq!(top[0].revenue, dec!(80));
        assert_eq!(top[0].margin, dec!(60));
        // Uma venda à tarde e uma à noite: empate, fica a tarde
        assert_eq!(top[0].top_time_of_day, DayPart::Afternoon);
        assert!(top[1..].iter().all(|combo| combo.count == 1));
    }

    #[test]
    fn deleted_items_are_labeled_unknown() {
        let mut menu = Menu::new();
        let known = menu.item("Known", (Uuid::new_v4(), "Mains"));
        let ghost = Uuid::new_v4();

        let mining = mine_combos(
            &[sale(
                at(2026, 3, 2, 9),
                vec![line(known, 1, dec!(4), dec!(1)), line(ghost, 1, dec!(4), dec!(1))],
            )],
            &DayPartBoundaries::default(),
        );
        let top = mining.top(&menu.catalog(), 10);

        assert!(top[0].items.contains(&"Unknown".to_string()));
    }
}
