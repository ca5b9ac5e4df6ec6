use super::{catalog, finished};
use crate::runtime::value::Value;

fn result_of(id: &str, preset: Option<&str>) -> Value {
    let catalog = catalog();
    let session = finished(&catalog, id, preset);
    session
        .current_variables()
        .get("result")
        .expect("result is declared")
        .clone()
}

#[test]
fn linear_search_reports_one_based_positions() {
    assert_eq!(result_of("linear-search", None), Value::Integer(4));
    assert_eq!(result_of("linear-search", Some("target=42")), Value::Integer(6));
    assert_eq!(result_of("linear-search", Some("missing")), Value::Integer(-1));
    assert_eq!(result_of("linear-search", Some("empty")), Value::Integer(-1));
}

#[test]
fn binary_search_finds_both_ends() {
    assert_eq!(result_of("binary-search", None), Value::Integer(5));
    assert_eq!(result_of("binary-search", Some("first")), Value::Integer(1));
    assert_eq!(result_of("binary-search", Some("last")), Value::Integer(7));
    assert_eq!(result_of("binary-search", Some("missing")), Value::Integer(-1));
    assert_eq!(result_of("binary-search", Some("single")), Value::Integer(1));
}

#[test]
fn buggy_search_still_answers_the_easy_cases() {
    assert_eq!(result_of("binary-search-bug", None), Value::Integer(1));
    assert_eq!(result_of("binary-search-bug", Some("target=5")), Value::Integer(-1));
}

#[test]
fn gcd_and_fibonacci_compute_the_textbook_values() {
    assert_eq!(result_of("gcd-euclid", None), Value::Integer(6));
    assert_eq!(result_of("gcd-euclid", Some("coprime")), Value::Integer(1));
    assert_eq!(result_of("gcd-euclid", Some("b=0")), Value::Integer(9));
    assert_eq!(result_of("gcd-euclid", Some("a<b")), Value::Integer(6));

    assert_eq!(result_of("fibonacci", None), Value::Integer(8));
    assert_eq!(result_of("fibonacci", Some("n=0")), Value::Integer(0));
    assert_eq!(result_of("fibonacci", Some("n=1")), Value::Integer(1));
    assert_eq!(result_of("fibonacci", Some("n=10")), Value::Integer(55));
}

#[test]
fn factorial_base_cases_stay_shallow() {
    let catalog = catalog();
    for preset in ["n=1", "n=0"] {
        let session = finished(&catalog, "factorial-recursive", Some(preset));
        assert_eq!(session.current_variables().int("result"), Ok(1));
        assert_eq!(session.peak_depth(), 1);
    }
    let session = finished(&catalog, "factorial-recursive", Some("n=6"));
    assert_eq!(session.current_variables().int("result"), Ok(720));
    assert_eq!(session.peak_depth(), 6);
}

#[test]
fn sorts_leave_arrays_in_order() {
    let catalog = catalog();
    let cases: [(&str, Option<&str>, Vec<i64>); 7] = [
        ("bubble-sort", None, vec![1, 2, 4, 5, 8]),
        ("bubble-sort", Some("reversed"), vec![1, 2, 3, 4, 5]),
        ("bubble-sort", Some("single"), vec![7]),
        ("quicksort", None, vec![1, 2, 3, 5, 8, 9]),
        ("quicksort", Some("sorted"), vec![1, 2, 3, 4]),
        ("quicksort", Some("duplicates"), vec![1, 2, 3, 3]),
        ("quicksort", Some("empty"), vec![]),
    ];
    for (id, preset, expected) in cases {
        let session = finished(&catalog, id, preset);
        assert_eq!(
            session.current_variables().get("arr"),
            Ok(&Value::from(expected)),
            "{id} {preset:?}"
        );
    }
}

#[test]
fn quicksort_prints_the_sorted_array_once() {
    let catalog = catalog();
    let session = finished(&catalog, "quicksort", None);
    let sorted = Value::from(vec![1, 2, 3, 5, 8, 9]);
    assert_eq!(session.current_variables().output(), [sorted.to_string()]);
    assert!(session.peak_depth() >= 2);
}

#[test]
fn linked_list_delete_unlinks_the_matching_node() {
    let catalog = catalog();
    let cases: [(Option<&str>, Vec<i64>); 5] = [
        (None, vec![3, 9]),
        (Some("delete head"), vec![7, 9]),
        (Some("delete tail"), vec![3, 7]),
        (Some("missing"), vec![3, 7, 9]),
        (Some("empty list"), vec![]),
    ];
    for (preset, expected) in cases {
        let session = finished(&catalog, "linked-list-delete", preset);
        let state = session.current_variables();
        let head = state.reference("head").expect("head is a reference");
        let values = state.walk_list(head).expect("list is well formed");
        let expected: Vec<Value> = expected.into_iter().map(Value::Integer).collect();
        assert_eq!(values, expected, "{preset:?}");
    }
}

#[test]
fn append_walks_to_the_tail() {
    let catalog = catalog();
    let session = finished(&catalog, "linked-list-append", Some("existing list"));
    let state = session.current_variables();
    assert_eq!(
        state.walk_list(Some(1)),
        Ok(vec![Value::Integer(10), Value::Integer(20), Value::Integer(42)])
    );
    assert_eq!(state.heap().len(), 3);
}

#[test]
fn inorder_prints_the_tree_in_sorted_order() {
    let catalog = catalog();
    let session = finished(&catalog, "tree-inorder", None);
    assert_eq!(session.current_variables().output(), ["1", "2", "3", "4", "6"]);
    assert_eq!(session.peak_depth(), 4);
    assert_eq!(session.depth(), 0);

    let session = finished(&catalog, "tree-inorder", Some("subtree"));
    assert_eq!(session.current_variables().output(), ["1", "2", "3"]);

    let session = finished(&catalog, "tree-inorder", Some("empty tree"));
    assert!(session.current_variables().output().is_empty());
    assert_eq!(session.peak_depth(), 1);
}

#[test]
fn priority_queue_prints_the_minimum_and_restores_the_heap() {
    let catalog = catalog();
    let cases: [(Option<&str>, &str, Vec<i64>); 4] = [
        (None, "1", vec![2, 5, 8, 9]),
        (Some("largest"), "2", vec![5, 9, 8, 10]),
        (Some("empty"), "3", vec![]),
        (Some("duplicate"), "2", vec![5, 5, 8, 9]),
    ];
    for (preset, printed, heap) in cases {
        let session = finished(&catalog, "priority-queue", preset);
        let state = session.current_variables();
        assert_eq!(state.output(), [printed], "{preset:?}");
        assert_eq!(state.get("pq"), Ok(&Value::from(heap)), "{preset:?}");
    }
}

#[test]
fn swap_works_on_text_too() {
    let catalog = catalog();
    let session = finished(&catalog, "swap-three", Some("letters"));
    let state = session.current_variables();
    assert_eq!(state.get("x"), Ok(&Value::from("b")));
    assert_eq!(state.get("y"), Ok(&Value::from("c")));
    assert_eq!(state.get("z"), Ok(&Value::from("b")));
}
