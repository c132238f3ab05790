// src/analytics/time_of_day.rs

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use utoipa::ToSchema;

/// Um conjunto fixo de faixas do dia. `ALL` define a ordem de desempate.
pub trait Bucket: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn index(self) -> usize;
}

// =========================================================================
//  Período do dia usado nas análises de itens e combos
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl Bucket for DayPart {
    const ALL: &'static [Self] = &[DayPart::Morning, DayPart::Afternoon, DayPart::Evening];

    fn index(self) -> usize {
        self as usize
    }
}

/// Horas de corte: `[0, afternoon_from)` manhã, `[afternoon_from, evening_from)` tarde, resto noite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPartBoundaries {
    pub afternoon_from: u32,
    pub evening_from: u32,
}

impl Default for DayPartBoundaries {
    fn default() -> Self {
        Self {
            afternoon_from: 12,
            evening_from: 17,
        }
    }
}

impl DayPartBoundaries {
    pub fn bucket_hour(&self, hour: u32) -> DayPart {
        if hour < self.afternoon_from {
            DayPart::Morning
        } else if hour < self.evening_from {
            DayPart::Afternoon
        } else {
            DayPart::Evening
        }
    }

    pub fn bucket(&self, timestamp: NaiveDateTime) -> DayPart {
        self.bucket_hour(timestamp.hour())
    }
}

// =========================================================================
//  Turnos da escala (carrossel). Mapeamento independente do DayPart.
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum ShiftSlot {
    Day,
    Evening,
    Night,
}

impl Bucket for ShiftSlot {
    const ALL: &'static [Self] = &[ShiftSlot::Day, ShiftSlot::Evening, ShiftSlot::Night];

    fn index(self) -> usize {
        self as usize
    }
}

/// `[day_from, evening_from)` dia, `[evening_from, night_from)` tarde, o resto (passando da meia-noite) noite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSlotBoundaries {
    pub day_from: u32,
    pub evening_from: u32,
    pub night_from: u32,
}

impl Default for ShiftSlotBoundaries {
    fn default() -> Self {
        Self {
            day_from: 6,
            evening_from: 12,
            night_from: 18,
        }
    }
}

impl ShiftSlotBoundaries {
    pub fn bucket_hour(&self, hour: u32) -> ShiftSlot {
        if (self.day_from..self.evening_from).contains(&hour) {
            ShiftSlot::Day
        } else if (self.evening_from..self.night_from).contains(&hour) {
            ShiftSlot::Evening
        } else {
            ShiftSlot::Night
        }
    }

    pub fn bucket(&self, timestamp: NaiveDateTime) -> ShiftSlot {
        self.bucket_hour(timestamp.hour())
    }
}

// =========================================================================
//  Histograma por faixa
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<B: Bucket> {
    counts: Vec<u64>,
    _bucket: std::marker::PhantomData<B>,
}

impl<B: Bucket> Default for Histogram<B> {
    fn default() -> Self {
        Self {
            counts: vec![0; B::ALL.len()],
            _bucket: std::marker::PhantomData,
        }
    }
}

impl<B: Bucket> Histogram<B> {
    pub fn add(&mut self, bucket: B, amount: u64) {
        self.counts[bucket.index()] += amount;
    }

    pub fn count(&self, bucket: B) -> u64 {
        self.counts[bucket.index()]
    }

    /// Faixa com a maior contagem. Varre da esquerda para a direita com `>` estrito,
    /// então empate fica com a faixa declarada primeiro.
    pub fn top(&self) -> B {
        let mut best = B::ALL[0];
        for &bucket in &B::ALL[1..] {
            if self.count(bucket) > self.count(best) {
                best = bucket;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn day_parts_follow_hour_boundaries() {
        let parts = DayPartBoundaries::default();

        assert_eq!(parts.bucket(at(0, 0)), DayPart::Morning);
        assert_eq!(parts.bucket(at(11, 59)), DayPart::Morning);
        assert_eq!(parts.bucket(at(12, 0)), DayPart::Afternoon);
        assert_eq!(parts.bucket(at(16, 59)), DayPart::Afternoon);
        assert_eq!(parts.bucket(at(17, 0)), DayPart::Evening);
        assert_eq!(parts.bucket(at(23, 59)), DayPart::Evening);
    }

    #[test]
    fn shift_slots_wrap_past_midnight() {
        let slots = ShiftSlotBoundaries::default();

        assert_eq!(slots.bucket(at(6, 0)), ShiftSlot::Day);
        assert_eq!(slots.bucket(at(12, 0)), ShiftSlot::Evening);
        assert_eq!(slots.bucket(at(18, 0)), ShiftSlot::Night);
        assert_eq!(slots.bucket(at(3, 30)), ShiftSlot::Night);
    }

    #[test]
    fn the_two_mappings_are_configured_independently() {
        let parts = DayPartBoundaries {
            afternoon_from: 11,
            evening_from: 16,
        };
        let slots = ShiftSlotBoundaries::default();

        // 11h: tarde para o DayPart ajustado, mas ainda turno do dia na escala
        assert_eq!(parts.bucket_hour(11), DayPart::Afternoon);
        assert_eq!(slots.bucket_hour(11), ShiftSlot::Day);
    }

    #[test]
    fn ties_resolve_to_the_first_declared_bucket() {
        let mut histogram = Histogram::<DayPart>::default();
        assert_eq!(histogram.top(), DayPart::Morning);

        histogram.add(DayPart::Afternoon, 3);
        histogram.add(DayPart::Evening, 3);
        assert_eq!(histogram.top(), DayPart::Afternoon);

        histogram.add(DayPart::Evening, 1);
        assert_eq!(histogram.top(), DayPart::Evening);

        let mut shifts = Histogram::<ShiftSlot>::default();
        shifts.add(ShiftSlot::Day, 2);
        shifts.add(ShiftSlot::Night, 2);
        assert_eq!(shifts.top(), ShiftSlot::Day);
    }
}
