use super::*;

#[test]
fn test_depth_go_command() {
    assert_eq!(SearchLimits::depth(10).go_command(), "go depth 10");
}

#[test]
fn test_movetime_go_command() {
    let limits = SearchLimits::time(Duration::from_millis(1000));
    assert_eq!(limits.go_command(), "go movetime 1000");
}

#[test]
fn test_default_is_depth_ten() {
    assert_eq!(SearchLimits::default(), SearchLimits::Depth(10));
}
