use crate::runtime::error::{TraceError, TraceResult};
use crate::strategies::{
    binary_search::{BinarySearch, BuggyBinarySearch},
    bubble_sort::BubbleSort,
    factorial::Factorial,
    fibonacci::Fibonacci,
    fizzbuzz::FizzBuzz,
    gcd::Gcd,
    inorder::InorderTraversal,
    linear_search::LinearSearch,
    linked_list::{LinkedListAppend, LinkedListDelete},
    priority_queue::PriorityQueue,
    quicksort::QuickSort,
    swap::VariableSwap,
    Strategy,
};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicType {
    VariableSwap,
    FizzBuzz,
    LinearSearch,
    BinarySearch,
    BuggyBinarySearch,
    BubbleSort,
    Gcd,
    Fibonacci,
    Factorial,
    QuickSort,
    LinkedListAppend,
    LinkedListDelete,
    InorderTraversal,
    PriorityQueue,
}

/// Keys accepted in problem data. The first entry for each variant is its
/// canonical key.
const REGISTRY: &[(&str, LogicType)] = &[
    ("variable_swap", LogicType::VariableSwap),
    ("swap", LogicType::VariableSwap),
    ("fizzbuzz", LogicType::FizzBuzz),
    ("linear_search", LogicType::LinearSearch),
    ("binary_search", LogicType::BinarySearch),
    ("buggy_binary_search", LogicType::BuggyBinarySearch),
    ("binary_search_bug", LogicType::BuggyBinarySearch),
    ("bubble_sort", LogicType::BubbleSort),
    ("gcd", LogicType::Gcd),
    ("euclid", LogicType::Gcd),
    ("fibonacci", LogicType::Fibonacci),
    ("factorial", LogicType::Factorial),
    ("recursive_factorial", LogicType::Factorial),
    ("quicksort", LogicType::QuickSort),
    ("linked_list_append", LogicType::LinkedListAppend),
    ("linked_list_delete", LogicType::LinkedListDelete),
    ("inorder_traversal", LogicType::InorderTraversal),
    ("tree_inorder", LogicType::InorderTraversal),
    ("priority_queue", LogicType::PriorityQueue),
    ("min_heap", LogicType::PriorityQueue),
];

impl LogicType {
    pub const ALL: &'static [LogicType] = &[
        LogicType::VariableSwap,
        LogicType::FizzBuzz,
        LogicType::LinearSearch,
        LogicType::BinarySearch,
        LogicType::BuggyBinarySearch,
        LogicType::BubbleSort,
        LogicType::Gcd,
        LogicType::Fibonacci,
        LogicType::Factorial,
        LogicType::QuickSort,
        LogicType::LinkedListAppend,
        LogicType::LinkedListDelete,
        LogicType::InorderTraversal,
        LogicType::PriorityQueue,
    ];

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            LogicType::VariableSwap => &VariableSwap,
            LogicType::FizzBuzz => &FizzBuzz,
            LogicType::LinearSearch => &LinearSearch,
            LogicType::BinarySearch => &BinarySearch,
            LogicType::BuggyBinarySearch => &BuggyBinarySearch,
            LogicType::BubbleSort => &BubbleSort,
            LogicType::Gcd => &Gcd,
            LogicType::Fibonacci => &Fibonacci,
            LogicType::Factorial => &Factorial,
            LogicType::QuickSort => &QuickSort,
            LogicType::LinkedListAppend => &LinkedListAppend,
            LogicType::LinkedListDelete => &LinkedListDelete,
            LogicType::InorderTraversal => &InorderTraversal,
            LogicType::PriorityQueue => &PriorityQueue,
        }
    }

    pub fn key(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|(_, logic)| *logic == self)
            .map(|(key, _)| *key)
            .unwrap_or("unregistered")
    }

    pub fn is_recursive(self) -> bool {
        matches!(
            self,
            LogicType::Factorial | LogicType::QuickSort | LogicType::InorderTraversal
        )
    }
}

pub fn resolve(key: &str) -> TraceResult<LogicType> {
    let normalized = key.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    REGISTRY
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, logic)| *logic)
        .ok_or_else(|| TraceError::UnknownLogicType {
            logic_type: key.to_string(),
        })
}

impl FromStr for LogicType {
    type Err = TraceError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        resolve(key)
    }
}

impl fmt::Display for LogicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
