use crate::pipeline::types::Cell;

/// Collapses runs of identical consecutive cells into a single entry.
pub fn deduplicate(raw: &[Cell]) -> Vec<Cell> {
    let mut out: Vec<Cell> = Vec::with_capacity(raw.len());
    for &cell in raw {
        if out.last() != Some(&cell) {
            out.push(cell);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(pairs: &[(u32, u32)]) -> Vec<Cell> {
        pairs.iter().map(|&(c, r)| Cell::new(c, r)).collect()
    }

    fn is_subsequence(sub: &[Cell], seq: &[Cell]) -> bool {
        let mut it = seq.iter();
        sub.iter().all(|c| it.any(|s| s == c))
    }

    #[test]
    fn test_empty_stays_empty() {
        assert!(deduplicate(&[]).is_empty());
    }

    #[test]
    fn test_collapses_consecutive_repeats_only() {
        let raw = cells(&[(1, 1), (1, 1), (1, 1), (2, 1), (2, 1), (1, 1), (2, 2)]);
        assert_eq!(deduplicate(&raw), cells(&[(1, 1), (2, 1), (1, 1), (2, 2)]));
    }

    #[test]
    fn test_single_repeated_cell() {
        let raw = cells(&[(4, 7); 5]);
        assert_eq!(deduplicate(&raw), cells(&[(4, 7)]));
    }

    #[test]
    fn test_idempotent() {
        let raw = cells(&[(0, 0), (0, 0), (0, 1), (0, 1), (1, 1), (0, 1), (0, 1)]);
        let once = deduplicate(&raw);
        assert_eq!(deduplicate(&once), once);
    }

    #[test]
    fn test_ordered_subsequence_without_adjacent_duplicates() {
        let raw = cells(&[(3, 3), (3, 4), (3, 4), (3, 3), (3, 3), (9, 9), (3, 3)]);
        let dedup = deduplicate(&raw);
        assert!(is_subsequence(&dedup, &raw));
        assert!(dedup.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(dedup.first(), raw.first());
        assert_eq!(dedup.last(), raw.last());
    }
}
