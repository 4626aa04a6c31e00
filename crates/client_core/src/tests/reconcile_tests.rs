use super::*;

#[test]
fn toggling_last_member_of_required_set_is_noop() {
    let mut draft = SetDraft::from_current(vec![1_i64], 1);
    assert!(!draft.toggle(1));
    assert_eq!(draft.target(), &[1]);
}

#[test]
fn toggle_flips_membership_in_insertion_order() {
    let mut draft = SetDraft::from_current(vec![1_i64, 2], 1);
    assert!(draft.toggle(1));
    assert!(draft.toggle(3));
    assert_eq!(draft.target(), &[2, 3]);
    assert_eq!(draft.primary(), Some(2));
}

#[test]
fn retoggled_member_moves_to_the_end() {
    let mut draft = SetDraft::from_current(vec![1_i64, 2], 1);
    draft.toggle(1);
    draft.toggle(1);
    assert_eq!(draft.target(), &[2, 1]);
    assert_eq!(draft.primary(), Some(2));
}

#[test]
fn plan_update_is_exact_and_disjoint() {
    let mut draft = SetDraft::from_current(vec![1_i64, 2], 1);
    draft.toggle(1);
    draft.toggle(3);
    let plan = draft.plan_update();
    assert_eq!(plan.primary, Some(2));
    assert_eq!(plan.attach, vec![3]);
    assert_eq!(plan.detach, vec![1]);
    assert!(plan.attach.iter().all(|id| !plan.detach.contains(id)));
}

#[test]
fn unchanged_target_plans_no_requests() {
    let draft = SetDraft::from_current(vec![4_i64, 5], 1);
    assert_eq!(draft.current(), draft.target());
    let plan = draft.plan_update();
    assert!(plan.attach.is_empty());
    assert!(plan.detach.is_empty());
}

#[test]
fn plan_create_excludes_the_primary_from_attaches() {
    let mut draft = SetDraft::empty(1);
    draft.toggle(7_i64);
    draft.toggle(8);
    draft.toggle(9);
    let plan = draft.plan_create();
    assert_eq!(plan.primary, Some(7));
    assert_eq!(plan.attach, vec![8, 9]);
    assert!(plan.detach.is_empty());
}

#[test]
fn optional_relation_can_be_emptied() {
    let mut draft = SetDraft::from_current(vec![4_i64], 0);
    assert!(draft.toggle(4));
    assert!(draft.target().is_empty());
    assert_eq!(draft.plan_update().detach, vec![4]);
}
