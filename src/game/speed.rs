//! Speed ramp: how the tick period shrinks each time food is eaten.

/// Tick period a fresh game starts with
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Shortest tick period the ramp will reach
pub const DELAY_FLOOR_MS: u64 = 25;

/// Tier boundaries paired with their decrement, checked top to bottom.
const TIERS: [(u64, u64); 3] = [(150, 5), (100, 3), (50, 2)];

/// Returns the tick period to use after one food-eaten event.
///
/// Above 150 ms the period drops by 5, above 100 ms by 3, above 50 ms by 2,
/// and above `floor_ms` by 1. The result never goes below `floor_ms`, and a
/// period already at or below the floor is left unchanged.
pub fn next_delay(current_ms: u64, floor_ms: u64) -> u64 {
    if current_ms <= floor_ms {
        return current_ms;
    }

    let decrement = TIERS
        .iter()
        .find(|(threshold, _)| current_ms > *threshold)
        .map(|(_, step)| *step)
        .unwrap_or(1);

    current_ms.saturating_sub(decrement).max(floor_ms)
}
