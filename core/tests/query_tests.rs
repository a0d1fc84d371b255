use search_core::eval::{difference, intersect, union};
use search_core::{InvertedIndex, Lowercase, QueryEngine, QueryError};
use std::collections::BTreeSet;

fn scenario_engine() -> QueryEngine<Lowercase> {
    let index: InvertedIndex = [("звезда", vec![1, 3, 5]), ("галактика", vec![2, 3])].into_iter().collect();
    QueryEngine::new(index, Lowercase)
}

#[test]
fn scenario_queries() {
    let engine = scenario_engine();
    assert_eq!(engine.search("звезда AND галактика"), Ok(vec![3]));
    assert_eq!(engine.search("звезда OR галактика"), Ok(vec![1, 2, 3, 5]));
    assert_eq!(engine.search("NOT звезда"), Ok(vec![2]));
    assert_eq!(engine.search("(звезда OR галактика) AND NOT звезда"), Ok(vec![2]));
}

#[test]
fn scenario_rejections() {
    let engine = scenario_engine();
    assert!(engine.search("AND звезда").is_err());
    assert_eq!(engine.search("звезда AND"), Err(QueryError::TrailingOperator));
    assert_eq!(engine.search(""), Err(QueryError::EmptyQuery));
    assert_eq!(engine.search("звезда галактика"), Err(QueryError::MissingOperator { position: 2 }));
    assert_eq!(engine.search("звезда AND ()"), Err(QueryError::EmptyGroup { position: 4 }));
}

#[test]
fn binary_operators_accept_a_following_not() {
    let engine = scenario_engine();
    assert_eq!(engine.search("галактика AND NOT звезда"), Ok(vec![2]));
    assert_eq!(engine.search("звезда AND NOT NOT галактика"), Ok(vec![3]));
    assert_eq!(engine.search("галактика OR NOT звезда"), Ok(vec![2, 3]));
    assert!(engine.search("звезда AND OR галактика").is_err());
}

#[test]
fn unknown_lemma_is_an_empty_result() {
    assert_eq!(scenario_engine().search("комета"), Ok(vec![]));
    assert_eq!(scenario_engine().search("комета AND звезда"), Ok(vec![]));
}

#[test]
fn double_negation_restores_the_operand() {
    let engine = scenario_engine();
    for lemma in ["звезда", "галактика"] {
        let plain = engine.search(lemma).unwrap();
        assert_eq!(engine.search(&format!("NOT (NOT {lemma})")).unwrap(), plain);
        assert_eq!(engine.search(&format!("NOT NOT {lemma}")).unwrap(), plain);
    }
}

#[test]
fn repeated_queries_are_identical() {
    let engine = scenario_engine();
    let query = "(звезда OR галактика) AND NOT (галактика AND звезда)";
    let first = engine.search(query).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.search(query).unwrap(), first);
    }
    assert_eq!(first, vec![1, 2, 5]);
}

#[test]
fn stored_postings_are_not_reordered() {
    let index: InvertedIndex = [("a", vec![9, 4, 4, 1])].into_iter().collect();
    let engine = QueryEngine::new(index, Lowercase);
    assert_eq!(engine.search("a OR a"), Ok(vec![1, 4, 9]));
    assert_eq!(engine.index().postings("a"), Some(&[9, 4, 4, 1][..]));
}

#[test]
fn injected_lemmatizer_normalizes_operands() {
    let index: InvertedIndex = [("звезд", vec![1, 2]), ("галактик", vec![2])].into_iter().collect();
    let chop = |w: &str| {
        let mut s = w.to_string();
        s.pop();
        s
    };
    let engine = QueryEngine::new(index, chop);
    assert_eq!(engine.search("Звезды AND галактики"), Ok(vec![2]));
}

/// Small deterministic generator so the set properties cover many shapes.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn list(&mut self) -> Vec<u32> {
        let len = self.next() % 12;
        (0..len).map(|_| self.next() % 20 + 1).collect()
    }
}

fn sorted(mut v: Vec<u32>) -> Vec<u32> {
    v.sort_unstable();
    v
}

fn strictly_ascending(v: &[u32]) -> bool { v.windows(2).all(|w| w[0] < w[1]) }

#[test]
fn merges_match_set_semantics() {
    let mut rng = Lcg(7);
    for _ in 0..500 {
        let (a, b) = (rng.list(), rng.list());
        let (sa, sb): (BTreeSet<u32>, BTreeSet<u32>) = (a.iter().copied().collect(), b.iter().copied().collect());
        let (a, b) = (sorted(a), sorted(b));

        let and = intersect(&a, &b);
        let or = union(&a, &b);
        assert!(strictly_ascending(&and) && strictly_ascending(&or));
        assert_eq!(and, sa.intersection(&sb).copied().collect::<Vec<_>>());
        assert_eq!(or, sa.union(&sb).copied().collect::<Vec<_>>());
        assert_eq!(difference(&or, &a), sb.difference(&sa).copied().collect::<Vec<_>>());
    }
}

#[test]
fn engine_matches_set_semantics_on_random_indexes() {
    let mut rng = Lcg(42);
    for _ in 0..100 {
        let (a, b) = (rng.list(), rng.list());
        let index: InvertedIndex = [("a", a.clone()), ("b", b.clone())].into_iter().collect();
        let engine = QueryEngine::new(index, Lowercase);

        let sa: BTreeSet<u32> = a.into_iter().collect();
        let sb: BTreeSet<u32> = b.into_iter().collect();
        let universe: BTreeSet<u32> = sa.union(&sb).copied().collect();

        let not_a: Vec<u32> = universe.difference(&sa).copied().collect();
        assert_eq!(engine.search("NOT a").unwrap(), not_a);
        assert_eq!(engine.search("a AND b").unwrap(), sa.intersection(&sb).copied().collect::<Vec<_>>());
        assert_eq!(engine.search("b OR a").unwrap(), universe.iter().copied().collect::<Vec<_>>());
        assert_eq!(engine.search("b AND NOT a").unwrap(), sb.difference(&sa).copied().collect::<Vec<_>>());
    }
}
