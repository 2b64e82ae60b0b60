use crate::types::{Aspect, AspectMatch, AspectSelection, Position};

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(lon_a: f64, lon_b: f64) -> f64 {
    let raw = (lon_a - lon_b).abs().rem_euclid(360.0);
    raw.min(360.0 - raw)
}

/// Classifies a pair of longitudes against the selected aspect types only.
///
/// Types are tested in [`crate::types::AspectType::PRIORITY`] order and the first window
/// that contains the separation wins, so at most one match is produced.
/// Unselected types are never tested.
pub fn classify_selected(
    lon_a: f64,
    lon_b: f64,
    selection: &AspectSelection,
) -> Option<AspectMatch> {
    let separation = angular_separation(lon_a, lon_b);
    selection.types().find_map(|kind| {
        let orb = (separation - kind.angle()).abs();
        (orb <= kind.orb_limit()).then_some(AspectMatch {
            aspect_type: kind,
            angle: kind.angle(),
            orb,
            exact: orb == 0.0,
        })
    })
}

pub fn classify(lon_a: f64, lon_b: f64) -> Option<AspectMatch> {
    classify_selected(lon_a, lon_b, &AspectSelection::all())
}

/// Aspects over every unordered pair `(i, j)`, `i < j`, of same-day positions.
pub fn transit_aspects(positions: &[Position]) -> Vec<Aspect> {
    let mut aspects = Vec::new();
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if let Some(m) = classify(a.longitude, b.longitude) {
                aspects.push(Aspect::between(a.body, b.body, m));
            }
        }
    }
    aspects
}

/// Aspects over the full natal × transit cross product, gated by `selection`.
/// The natal body is always `body_a`.
pub fn natal_aspects(
    natal: &[Position],
    transit: &[Position],
    selection: &AspectSelection,
) -> Vec<Aspect> {
    if selection.is_empty() {
        return Vec::new();
    }
    natal
        .iter()
        .flat_map(|n| {
            transit.iter().filter_map(move |t| {
                classify_selected(n.longitude, t.longitude, selection)
                    .map(|m| Aspect::between(n.body, t.body, m))
            })
        })
        .collect()
}

/// Display-side filter: keeps already-computed aspects whose type is selected.
pub fn filter_by_selection(aspects: &[Aspect], selection: &AspectSelection) -> Vec<Aspect> {
    aspects
        .iter()
        .filter(|a| selection.contains(a.aspect_type))
        .copied()
        .collect()
}

