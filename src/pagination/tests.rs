//! Tests for pagination module

use super::*;
use test_case::test_case;

#[test_case(0, 1000 => 0 ; "no rows")]
#[test_case(1, 1000 => 1 ; "single row")]
#[test_case(1000, 1000 => 1 ; "exactly one page")]
#[test_case(1001, 1000 => 2 ; "one row over")]
#[test_case(2500, 1000 => 3 ; "partial last page")]
#[test_case(3, 2 => 2 ; "small pages")]
#[test_case(10, 0 => 0 ; "zero page size")]
fn test_total_pages(total_results: u64, page_size: u32) -> u64 {
    total_pages(total_results, page_size)
}

#[test]
fn test_plan_remaining_pages() {
    let plan = PagePlan::new(2500, 1000).unwrap();
    assert_eq!(plan.total_results(), 2500);
    assert_eq!(plan.page_size(), 1000);
    assert_eq!(plan.total_pages(), 3);
    assert_eq!(plan.remaining_pages().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn test_plan_without_follow_up_pages() {
    let empty = PagePlan::new(0, 1000).unwrap();
    assert_eq!(empty.total_pages(), 0);
    assert_eq!(empty.remaining_pages().count(), 0);

    let single = PagePlan::new(999, 1000).unwrap();
    assert_eq!(single.total_pages(), 1);
    assert_eq!(single.remaining_pages().count(), 0);
}

#[test]
fn test_plan_rejects_zero_page_size() {
    assert!(PagePlan::new(10, 0).is_err());
}

#[test]
fn test_plan_rejects_page_count_overflow() {
    let err = PagePlan::new(u64::MAX, 1).unwrap_err();
    assert!(err.to_string().contains("TotalResults"));
}
