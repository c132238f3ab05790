// src/analytics/quadrant.rs
//
// Engenharia de cardápio: margem x popularidade, cortando pelas medianas.
// Empate com a mediana conta como "alto" nos dois eixos.

use rust_decimal::Decimal;

use crate::{
    analytics::rollup::ItemRecord,
    models::analytics::{Quadrant, QuadrantCounts, QuadrantItem, QuadrantReport},
};

/// Classifica os itens com pelo menos uma unidade vendida.
/// Empates na mediana contam como "alto" nos dois eixos.
pub fn classify(records: &[ItemRecord]) -> QuadrantReport {
    let eligible: Vec<&ItemRecord> = records.iter().filter(|r| r.totals.quantity > 0).collect();
    if eligible.is_empty() {
        return QuadrantReport::default();
    }

    let median_margin = median(eligible.iter().map(|r| r.totals.margin_percent()).collect());
    let median_units = median(eligible.iter().map(|r| Decimal::from(r.totals.quantity)).collect());

    let mut counts = QuadrantCounts::default();
    let items = eligible
        .into_iter()
        .map(|record| {
            let margin = record.totals.margin_percent();
            let units = Decimal::from(record.totals.quantity);
            let quadrant = quadrant_for(margin >= median_margin, units >= median_units);
            counts.increment(quadrant);

            QuadrantItem {
                menu_item_id: record.menu_item_id,
                name: record.name.clone(),
                category: record.category.clone(),
                quadrant,
                margin_percent: margin,
                units_sold: record.totals.quantity,
            }
        })
        .collect();

    QuadrantReport {
        counts,
        median_margin,
        median_units,
        items,
    }
}

fn quadrant_for(high_margin: bool, high_popularity: bool) -> Quadrant {
    match (high_margin, high_popularity) {
        (true, true) => Quadrant::Star,
        (true, false) => Quadrant::Puzzle,
        (false, true) => Quadrant::Workhorse,
        (false, false) => Quadrant::Dog,
    }
}

fn median(mut values: Vec<Decimal>) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.sort();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / Decimal::TWO
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{
        rollup::Totals,
        time_of_day::Histogram,
    };
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    // Receita 100 para a margem sair direto em %.
    fn record(name: &str, margin: Decimal, units: i64) -> ItemRecord {
        ItemRecord {
            menu_item_id: Uuid::new_v4(),
            name: name.to_string(),
            category: "Mains".to_string(),
            totals: Totals {
                revenue: dec!(100),
                cost: dec!(100) - margin,
                quantity: units,
            },
            day_parts: Histogram::default(),
        }
    }

    fn quadrant_of(report: &QuadrantReport, name: &str) -> Quadrant {
        report
            .items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.quadrant)
            .unwrap()
    }

    #[test]
    fn splits_on_median_margin_and_units() {
        let records = vec![
            record("margin40-units4", dec!(40), 4),
            record("margin10-units1", dec!(10), 1),
            record("margin30-units2", dec!(30), 2),
            record("margin20-units3", dec!(20), 3),
        ];

        let report = classify(&records);

        assert_eq!(report.median_margin, dec!(25));
        assert_eq!(report.median_units, dec!(2.5));
        assert_eq!(quadrant_of(&report, "margin40-units4"), Quadrant::Star);
        assert_eq!(quadrant_of(&report, "margin10-units1"), Quadrant::Dog);
        assert_eq!(quadrant_of(&report, "margin30-units2"), Quadrant::Puzzle);
        assert_eq!(quadrant_of(&report, "margin20-units3"), Quadrant::Workhorse);
        assert_eq!(
            report.counts,
            QuadrantCounts { star: 1, puzzle: 1, workhorse: 1, dog: 1 }
        );
    }

    #[test]
    fn ties_at_the_median_count_as_high() {
        let records = vec![
            record("low", dec!(10), 1),
            record("mid", dec!(20), 2),
            record("high", dec!(30), 3),
        ];

        let report = classify(&records);

        assert_eq!(report.median_margin, dec!(20));
        assert_eq!(report.median_units, dec!(2));
        assert_eq!(quadrant_of(&report, "mid"), Quadrant::Star);
        assert_eq!(report.counts.get(Quadrant::Star), 2);
        assert_eq!(report.counts.get(Quadrant::Dog), 1);
    }

    #[test]
    fn items_without_sales_are_not_classified() {
        let records = vec![record("sold", dec!(50), 3), record("idle", dec!(0), 0)];

        let report = classify(&records);

        assert_eq!(report.items.len(), 1);
        assert_eq!(quadrant_of(&report, "sold"), Quadrant::Star);
        assert_eq!(report.median_units, dec!(3));
    }

    #[test]
    fn empty_input_has_zero_counts() {
        let report = classify(&[]);

        assert_eq!(report.counts, QuadrantCounts::default());
        assert!(report.items.is_empty());
    }
}
