//! Randomized property checks for the similarity scorer.
//!
//! Inputs come from a seeded RNG over a small alphabet (mixed case, spaces,
//! a couple of CJK characters) so that strings overlap often.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use answer_match::similarity::levenshtein::distance;
use answer_match::similarity::normalize::normalize;
use answer_match::{calculate_similarity, Scorer};

const ALPHABET: &[char] = &['a', 'b', 'c', 'A', 'B', ' ', '聊', '天'];
const ROUNDS: usize = 500;

fn random_string(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn score(a: &str, b: &str) -> f64 {
    calculate_similarity(a, b).expect("within default limit")
}

#[test]
fn test_self_similarity_is_one() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..ROUNDS {
        let s = random_string(&mut rng, 12);
        assert!((score(&s, &s) - 1.0).abs() < f64::EPSILON, "{s:?}");

        let varied = format!("  {} ", s.to_uppercase());
        assert!((score(&s, &varied) - 1.0).abs() < f64::EPSILON, "{s:?}");
    }
}

#[test]
fn test_empty_against_non_empty_is_zero() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..ROUNDS {
        let s = random_string(&mut rng, 12);
        let expected = if normalize(&s).is_empty() { 1.0 } else { 0.0 };
        assert!((score(&s, "") - expected).abs() < f64::EPSILON, "{s:?}");
        assert!((score("", &s) - expected).abs() < f64::EPSILON, "{s:?}");
    }
}

#[test]
fn test_symmetry_and_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..ROUNDS {
        let a = random_string(&mut rng, 12);
        let b = random_string(&mut rng, 12);
        let ab = score(&a, &b);
        let ba = score(&b, &a);
        assert!((ab - ba).abs() < f64::EPSILON, "{a:?} vs {b:?}");
        assert!((0.0..=1.0).contains(&ab), "{a:?} vs {b:?} = {ab}");
    }
}

#[test]
fn test_distance_bounded_by_longer_length() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..ROUNDS {
        let a = random_string(&mut rng, 16);
        let b = random_string(&mut rng, 16);
        let d = distance(&a, &b);
        let len_a = a.chars().count();
        let len_b = b.chars().count();
        assert!(d <= len_a.max(len_b), "{a:?} vs {b:?}");
        assert!(d >= len_a.abs_diff(len_b), "{a:?} vs {b:?}");
        assert_eq!(d == 0, a == b, "{a:?} vs {b:?}");
    }
}

#[test]
fn test_triangle_inequality() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..ROUNDS {
        let a = random_string(&mut rng, 10);
        let b = random_string(&mut rng, 10);
        let c = random_string(&mut rng, 10);
        assert!(
            distance(&a, &c) <= distance(&a, &b) + distance(&b, &c),
            "{a:?} {b:?} {c:?}"
        );
    }
}

#[test]
fn test_deterministic() {
    let mut rng = StdRng::seed_from_u64(6);
    let scorer = Scorer::default();
    for _ in 0..100 {
        let a = random_string(&mut rng, 12);
        let b = random_string(&mut rng, 12);
        let first = scorer.compare(&a, &b).expect("score");
        let second = scorer.compare(&a, &b).expect("score");
        assert_eq!(first, second);
    }
}

#[test]
fn test_score_matches_distance_ratio() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..ROUNDS {
        let a = normalize(&random_string(&mut rng, 12));
        let b = normalize(&random_string(&mut rng, 12));
        if a.is_empty() || b.is_empty() || a == b {
            continue;
        }
        let max_len = a.chars().count().max(b.chars().count()) as f64;
        let expected = 1.0 - distance(&a, &b) as f64 / max_len;
        assert!((score(&a, &b) - expected).abs() < f64::EPSILON, "{a:?} vs {b:?}");
    }
}

#[tokio::test]
async fn test_concurrent_scoring() {
    let scorer = Scorer::default();
    let pairs = [
        ("kitten", "sitting", 4.0 / 7.0),
        ("Hello World", "hello world", 1.0),
        ("", "abc", 0.0),
        ("abc", "xyz", 0.0),
        ("AI聊天", "AI聊天", 1.0),
    ];

    let mut handles = Vec::new();
    for i in 0..64 {
        let (a, b, expected) = pairs[i % pairs.len()];
        handles.push(tokio::task::spawn_blocking(move || {
            let got = scorer.score(a, b).expect("score");
            (got, expected)
        }));
    }

    for handle in handles {
        let (got, expected) = handle.await.expect("task panicked");
        assert!((got - expected).abs() < 1e-9);
    }
}
