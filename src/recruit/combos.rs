// src/recruit/combos.rs
use std::collections::HashSet;

/// First appearance wins; later repeats are dropped.
pub fn dedup_in_order(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Every combination of 1..=`max_len` items, shortest first, each length in
/// lexicographic order over input positions. Items keep their input order
/// inside a combination.
pub fn combinations<T: Clone>(items: &[T], max_len: usize) -> Vec<Vec<T>> {
    let n = items.len();
    let mut out = Vec::new();

    for k in 1..=max_len.min(n) {
        let mut idx: Vec<usize> = (0..k).collect();
        loop {
            out.push(idx.iter().map(|&i| items[i].clone()).collect());

            // rightmost position that can still advance
            let Some(i) = (0..k).rev().find(|&i| idx[i] < n - k + i) else { break };
            idx[i] += 1;
            for j in i + 1..k {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn three_items_yield_seven_combos_in_order() {
        let got = combinations(&["a", "b", "c"], 3);
        let want: Vec<Vec<&str>> = vec![
            vec!["a"],
            vec!["b"],
            vec!["c"],
            vec!["a", "b"],
            vec!["a", "c"],
            vec!["b", "c"],
            vec!["a", "b", "c"],
        ];
        assert_eq!(got, want);
    }

    #[test]
    fn length_is_capped() {
        let items: Vec<u8> = (0..5).collect();
        let got = combinations(&items, 3);
        // C(5,1) + C(5,2) + C(5,3)
        assert_eq!(got.len(), 5 + 10 + 10);
        assert!(got.iter().all(|c| c.len() <= 3));
    }

    #[test]
    fn empty_and_single_inputs() {
        assert!(combinations::<u8>(&[], 3).is_empty());
        assert_eq!(combinations(&[7], 3), vec![vec![7]]);
    }

    #[test]
    fn dedup_keeps_first_appearance() {
        let tags = strings!["b", "a", "b", "c", "a"];
        assert_eq!(dedup_in_order(tags), strings!["b", "a", "c"]);
    }
}
