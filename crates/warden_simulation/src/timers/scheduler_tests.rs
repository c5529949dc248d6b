//! Tests for TaskScheduler and ScheduledTasks.

use super::*;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_drain_due_returns_only_expired_tasks() {
    let mut scheduler = TaskScheduler::new();
    scheduler.schedule(ms(1500), "late");
    scheduler.schedule(ms(500), "early");

    assert!(scheduler.drain_due(ms(499)).is_empty());
    assert_eq!(scheduler.drain_due(ms(500)), vec!["early"]);
    assert_eq!(scheduler.len(), 1);
    assert_eq!(scheduler.next_due(), Some(ms(1500)));
}

#[test]
fn test_same_due_keeps_insertion_order() {
    let mut scheduler = TaskScheduler::new();
    scheduler.schedule(ms(100), 1);
    scheduler.schedule(ms(100), 2);
    scheduler.schedule(ms(50), 0);
    scheduler.schedule(ms(100), 3);

    assert_eq!(scheduler.drain_due(ms(1000)), vec![0, 1, 2, 3]);
    assert!(scheduler.is_empty());
    assert_eq!(scheduler.next_due(), None);
}

#[test]
fn test_cancel_where_removes_matching_tasks() {
    let mut scheduler = TaskScheduler::new();
    for i in 0..6u32 {
        scheduler.schedule(ms(u64::from(i) * 10), i);
    }

    let cancelled = scheduler.cancel_where(|task| task % 2 == 0);

    assert_eq!(cancelled, 3);
    assert_eq!(scheduler.drain_due(ms(100)), vec![1, 3, 5]);
}

#[test]
fn test_scheduled_tasks_resource() {
    let agent = Entity::from_raw(7);
    let other = Entity::from_raw(8);
    let mut tasks = ScheduledTasks::default();

    tasks.schedule(ms(1500), ScheduledTask::ResetAttackCooldown(agent));
    tasks.schedule(ms(500), ScheduledTask::Destroy(agent));
    tasks.schedule(ms(900), ScheduledTask::ResetAttackCooldown(other));

    assert!(tasks.contains(&ScheduledTask::Destroy(agent)));
    assert_eq!(tasks.next_due(), Some(ms(500)));

    // Destroy → чистим оставшиеся задачи этого entity
    let due = tasks.drain_due(ms(500));
    assert_eq!(due, vec![ScheduledTask::Destroy(agent)]);
    assert_eq!(tasks.cancel_where(|task| task.entity() == agent), 1);

    assert_eq!(tasks.len(), 1);
    assert!(tasks.contains(&ScheduledTask::ResetAttackCooldown(other)));
}
