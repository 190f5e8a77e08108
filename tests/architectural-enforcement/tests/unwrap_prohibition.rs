//! Integration Test: Unwrap Prohibition
//!
//! **Policy**: Library code in `whiskers-core` propagates errors with `?` and
//! MUST NOT call `.unwrap()` or `.expect(..)` outside test modules.

use architectural_enforcement::production_lines_in;

#[test]
fn test_no_unwrap_in_core_library() {
    let violations: Vec<String> = production_lines_in("conductor/core/src")
        .into_iter()
        .filter(|line| line.code.contains(".unwrap()") || line.code.contains(".expect("))
        .map(|line| line.to_string())
        .collect();

    assert!(
        violations.is_empty(),
        "Found unwrap/expect in library code:\n  {}",
        violations.join("\n  ")
    );
}
