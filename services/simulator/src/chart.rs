//! Running-sum chart data
//!
//! x is the toss index and y is heads minus tails so far. The trace is cut
//! into segments wherever it leaves the axis, so each segment lies entirely
//! on the heads side or the tails side and can be drawn in that side's colour.

use serde::Serialize;

use crate::domain::{Coin, TossEvent};
use crate::simulation::TossObserver;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceSegment {
    pub side: Coin,
    pub points: Vec<(u64, i64)>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadChart {
    segments: Vec<TraceSegment>,
    tosses: u64,
    value: i64,
}

impl LeadChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coin: Coin) {
        let previous = (self.tosses, self.value);
        self.tosses += 1;
        self.value += coin.step();
        let point = (self.tosses, self.value);

        if previous.1 != 0 {
            if let Some(segment) = self.segments.last_mut() {
                segment.points.push(point);
                return;
            }
        }

        // Leaving the axis opens a segment on the side just tossed
        self.segments.push(TraceSegment {
            side: coin,
            points: vec![previous, point],
        });
    }

    pub fn segments(&self) -> &[TraceSegment] {
        &self.segments
    }

    pub fn tosses(&self) -> u64 {
        self.tosses
    }

    /// Heads minus tails after the latest toss
    pub fn current_value(&self) -> i64 {
        self.value
    }

    /// Number of times the trace left the axis after its first segment
    pub fn axis_crossings(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

impl TossObserver for LeadChart {
    fn on_toss(&mut self, event: &TossEvent) {
        self.push(event.coin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coin::{Head, Tail};

    fn chart_of(coins: &[Coin]) -> LeadChart {
        let mut chart = LeadChart::new();
        for coin in coins {
            chart.push(*coin);
        }
        chart
    }

    #[test]
    fn test_first_toss_starts_at_origin() {
        let chart = chart_of(&[Tail]);

        assert_eq!(chart.segments().len(), 1);
        assert_eq!(chart.segments()[0].side, Tail);
        assert_eq!(chart.segments()[0].points, vec![(0, 0), (1, -1)]);
    }

    #[test]
    fn test_segment_continues_until_back_on_axis() {
        let chart = chart_of(&[Head, Head, Tail, Tail, Tail, Head]);

        assert_eq!(chart.segments().len(), 2);
        assert_eq!(chart.segments()[0].side, Head);
        assert_eq!(
            chart.segments()[0].points,
            vec![(0, 0), (1, 1), (2, 2), (3, 1), (4, 0)]
        );
        assert_eq!(chart.segments()[1].side, Tail);
        assert_eq!(chart.segments()[1].points, vec![(4, 0), (5, -1), (6, 0)]);
        assert_eq!(chart.axis_crossings(), 1);
        assert_eq!(chart.current_value(), 0);
        assert_eq!(chart.tosses(), 6);
    }

    #[test]
    fn test_touching_axis_starts_new_segment_on_same_side() {
        let chart = chart_of(&[Head, Tail, Head]);

        let sides: Vec<Coin> = chart.segments().iter().map(|s| s.side).collect();
        assert_eq!(sides, vec![Head, Head]);
    }
}
