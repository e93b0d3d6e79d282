use crate::TimeSeriesPoint;

/// Resample an SMA defined on a coarse grid onto `targets`.
///
/// For each target the nearest valid samples at or before (`before`) and at
/// or after (`after`) it are located:
///
/// - both found at different times: linear interpolation between them;
/// - both found at the same time: that sample's value exactly;
/// - only `before`: the last known value is held forward;
/// - only `after`: `None`. An average that does not exist yet is never
///   extended backward.
///
/// Samples with no value are ignored. The output has one point per target,
/// in target order.
pub fn interpolate(sma: &[TimeSeriesPoint], targets: &[i64]) -> Vec<TimeSeriesPoint> {
    let mut valid: Vec<(i64, f64)> = sma
        .iter()
        .filter_map(|point| point.value.map(|value| (point.timestamp, value)))
        .collect();
    if valid.is_empty() {
        return targets.iter().map(|&ts| TimeSeriesPoint::empty(ts)).collect();
    }
    valid.sort_by_key(|&(timestamp, _)| timestamp);

    targets
        .iter()
        .map(|&target| {
            let at_or_before = valid.partition_point(|&(ts, _)| ts <= target);
            let before = at_or_before.checked_sub(1).map(|index| valid[index]);
            let after = valid
                .get(valid.partition_point(|&(ts, _)| ts < target))
                .copied();

            let value = match (before, after) {
                (Some((t0, v0)), Some((t1, v1))) if t0 != t1 => {
                    let ratio = (target - t0) as f64 / (t1 - t0) as f64;
                    Some(v0 + ratio * (v1 - v0))
                }
                (Some((_, v0)), Some(_)) => Some(v0),
                (Some((_, v0)), None) => Some(v0),
                (None, _) => None,
            };

            TimeSeriesPoint::new(target, value)
        })
        .collect()
}
