use kupu_types::Cue;

/// Position of the active cue at playback time `t`.
///
/// Cues may overlap while a transcript is being authored; the one listed
/// last in source order wins. Walks the list backwards and stops at the
/// first cue whose inclusive interval contains `t`.
pub fn resolve_active_index(cues: &[Cue], t: f64) -> Option<usize> {
    if !t.is_finite() {
        return None;
    }
    for (idx, cue) in cues.iter().enumerate().rev() {
        if cue.contains(t) {
            return Some(idx);
        }
    }
    None
}

/// The cue shown at playback time `t`, or `None` when `t` falls in a gap.
pub fn resolve_active(cues: &[Cue], t: f64) -> Option<&Cue> {
    resolve_active_index(cues, t).map(|idx| &cues[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Vec<Cue> {
        vec![
            Cue::new("a", 0.0, 5.0, "first"),
            Cue::new("b", 4.0, 9.0, "second"),
            Cue::new("c", 12.0, 14.0, "third"),
        ]
    }

    #[test]
    fn later_cue_wins_overlap() {
        let cues = track();
        assert_eq!(resolve_active(&cues, 4.5).map(|c| c.id.as_str()), Some("b"));
        assert_eq!(resolve_active(&cues, 4.0).map(|c| c.id.as_str()), Some("b"));
        assert_eq!(resolve_active(&cues, 3.0).map(|c| c.id.as_str()), Some("a"));
    }

    #[test]
    fn bounds_are_inclusive() {
        let cues = track();
        assert_eq!(resolve_active_index(&cues, 0.0), Some(0));
        assert_eq!(resolve_active_index(&cues, 9.0), Some(1));
        assert_eq!(resolve_active_index(&cues, 12.0), Some(2));
        assert_eq!(resolve_active_index(&cues, 14.0), Some(2));
    }

    #[test]
    fn gaps_and_out_of_range_resolve_to_none() {
        let cues = track();
        assert!(resolve_active(&cues, 10.0).is_none());
        assert!(resolve_active(&cues, -1.0).is_none());
        assert!(resolve_active(&cues, 100.0).is_none());
        assert!(resolve_active(&cues, f64::NAN).is_none());
        assert!(resolve_active(&cues, f64::INFINITY).is_none());
        assert!(resolve_active(&[], 1.0).is_none());
    }

    fn cues_from(spans: &[(u8, u8)]) -> Vec<Cue> {
        spans
            .iter()
            .enumerate()
            .map(|(idx, &(a, b))| {
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                Cue::new(idx.to_string(), f64::from(start), f64::from(end), "x")
            })
            .collect()
    }

    #[quickcheck_macros::quickcheck]
    fn active_cue_is_last_containing(spans: Vec<(u8, u8)>, t: u8) -> bool {
        let cues = cues_from(&spans);
        let t = f64::from(t) + 0.5;
        match resolve_active_index(&cues, t) {
            Some(idx) => cues[idx].contains(t) && !cues[idx + 1..].iter().any(|c| c.contains(t)),
            None => !cues.iter().any(|c| c.contains(t)),
        }
    }

    #[quickcheck_macros::quickcheck]
    fn appending_a_covering_cue_takes_over(spans: Vec<(u8, u8)>, t: u8) -> bool {
        let mut cues = cues_from(&spans);
        let t = f64::from(t);
        cues.push(Cue::new("last", t, t, "x"));
        resolve_active(&cues, t).map(|c| c.id.as_str()) == Some("last")
    }
}
