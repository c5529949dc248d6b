//! Отложенные задачи и tick counter
//!
//! # Архитектура
//!
//! **FixedUpdate** → increment_tick_counter → run_scheduled_tasks
//!   ├─ ResetAttackCooldown(entity) → AttackCooldown::reset
//!   └─ Destroy(entity) → despawn + EntityDestroyed
//!
//! Время задачи = `Time<Fixed>::elapsed()` + задержка, поэтому задачи
//! срабатывают детерминированно (не зависят от wall clock).
//! Задачи с одинаковым временем исполняются в порядке постановки.

use bevy::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

pub mod timer_systems;

#[cfg(test)]
mod scheduler_tests;

pub use timer_systems::{increment_tick_counter, run_scheduled_tasks};

use crate::SimulationSet;

/// Глобальный tick counter (детерминистичный, wraparound safe)
///
/// Инкрементируется в каждый FixedUpdate tick.
#[derive(Resource, Default, Debug)]
pub struct FixedTickCounter {
    pub tick: u64,
}

struct Entry<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Min-heap задач по (due, seq)
pub struct TaskScheduler<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.heap.push(Reverse(Entry { due, seq, task }));
    }

    /// Забрать все задачи с due ≤ now (по возрастанию due, затем seq)
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();

        while self
            .heap
            .peek()
            .is_some_and(|Reverse(entry)| entry.due <= now)
        {
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.task);
            }
        }

        due
    }

    /// Удалить все задачи, для которых `predicate` вернул true. Возвращает кол-во удалённых.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(entry)| !predicate(&entry.task));
        before - self.heap.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Задачи симуляции, которые исполняет `run_scheduled_tasks`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Cooldown атаки истёк (ResetAttack)
    ResetAttackCooldown(Entity),
    /// Отложенное уничтожение после смерти
    Destroy(Entity),
}

impl ScheduledTask {
    pub fn entity(&self) -> Entity {
        match self {
            ScheduledTask::ResetAttackCooldown(entity) | ScheduledTask::Destroy(entity) => *entity,
        }
    }
}

/// Resource: очередь отложенных задач симуляции
#[derive(Resource, Default)]
pub struct ScheduledTasks {
    scheduler: TaskScheduler<ScheduledTask>,
}

impl ScheduledTasks {
    pub fn schedule(&mut self, due: Duration, task: ScheduledTask) {
        self.scheduler.schedule(due, task);
    }

    pub fn drain_due(&mut self, now: Duration) -> Vec<ScheduledTask> {
        self.scheduler.drain_due(now)
    }

    pub fn cancel_where(&mut self, predicate: impl FnMut(&ScheduledTask) -> bool) -> usize {
        self.scheduler.cancel_where(predicate)
    }

    /// Есть ли такая задача в очереди (для тестов и debug)
    pub fn contains(&self, task: &ScheduledTask) -> bool {
        self.scheduler
            .heap
            .iter()
            .any(|Reverse(entry)| entry.task == *task)
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }
}

/// Timers Plugin: tick counter + исполнение отложенных задач
pub struct TimersPlugin;

impl Plugin for TimersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FixedTickCounter>()
            .init_resource::<ScheduledTasks>()
            .add_systems(
                FixedUpdate,
                (
                    increment_tick_counter
                        .in_set(SimulationSet::Bookkeeping)
                        .before(crate::spatial::sync_spatial_index),
                    run_scheduled_tasks.in_set(SimulationSet::Timers),
                ),
            );
    }
}
