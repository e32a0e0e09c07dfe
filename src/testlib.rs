// Assertion helpers shared by unit tests and the integration tests under
// tests/ (which get them through the "testlib" feature).

use std::fmt::Debug;

use regex::Regex;

pub fn assert_re(pattern: &str, haystack: &str) {
    let re = Regex::new(pattern).unwrap();
    assert!(re.is_match(haystack), "{:?} did not match {:?}", haystack, re);
}

/// Like assert_eq, but pretty-prints both sides. For reports and other large
/// structs, where the single line output is unreadable.
pub fn assert_big_struct_eq<T: PartialEq + Debug>(left: T, right: T) {
    assert_eq!(left, right, "{:#?} != {:#?}", left, right);
}

pub fn assert_vec_eq<T: PartialEq + Debug>(left: Vec<T>, right: Vec<T>) {
    assert_vecr_eq(&left, &right);
}

/// On mismatch, prints both vecs one element per line, and then each
/// mismatched index, before panicking.
pub fn assert_vecr_eq<T: PartialEq + Debug>(left: &Vec<T>, right: &Vec<T>) {
    if left == right {
        return;
    }

    let dump = |v: &Vec<T>| -> String {
        v.iter().map(|o| format!("  {:?},\n", o)).collect::<String>()
    };
    eprintln!("left != right. left: [\n{}] != right: [\n{}]", dump(left), dump(right));

    if left.len() != right.len() {
        panic!("size of left ({}) != size of right ({})", left.len(), right.len());
    }
    for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        if l != r {
            eprintln!("Mismatch at index {}:\nleft: {:#?} != right: {:#?}", i, l, r);
        }
    }
    panic!("left != right");
}
