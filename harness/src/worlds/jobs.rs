//! `JobSequencing`: order single-machine tasks to minimize lateness penalty.
//!
//! A state is the sequence of tasks scheduled so far. Appending task `t`
//! costs `max(0, finish - deadline) * penalty_rate`, where `finish` is the
//! sum of all scheduled durations including `t`. The goal is any sequence
//! that schedules every task, so the path cost is the schedule's total
//! penalty.

use waypoint_search::{Heuristic, StateSpace};

use crate::contract::{World, WorldError};

/// A task with a processing time, a due time and a per-unit lateness rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub duration: u32,
    pub deadline: u32,
    pub penalty_rate: u32,
}

impl Task {
    #[must_use]
    pub fn new(name: &str, duration: u32, deadline: u32, penalty_rate: u32) -> Self {
        Self {
            name: name.to_string(),
            duration,
            deadline,
            penalty_rate,
        }
    }

    /// Penalty if this task finishes at `finish`.
    #[must_use]
    pub fn penalty_at(&self, finish: u32) -> u32 {
        finish
            .saturating_sub(self.deadline)
            .saturating_mul(self.penalty_rate)
    }
}

/// Indices of scheduled tasks, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence(Vec<usize>);

impl Sequence {
    #[must_use]
    pub fn tasks(&self) -> &[usize] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// Heuristic used by Greedy and A*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobBound {
    /// A flat charge per unscheduled task. Cheap, not admissible in general.
    PerTask(u32),
    /// Each remaining task's penalty if it started immediately. Admissible
    /// and consistent.
    Relaxed,
}

impl Default for JobBound {
    fn default() -> Self {
        Self::PerTask(5)
    }
}

/// A job-sequencing instance.
#[derive(Debug, Clone)]
pub struct JobSequencing {
    tasks: Vec<Task>,
    bound: JobBound,
}

impl JobSequencing {
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidTasks`] for an empty list or a task with
    /// zero duration.
    pub fn new(tasks: Vec<Task>) -> Result<Self, WorldError> {
        if tasks.is_empty() {
            return Err(WorldError::InvalidTasks {
                detail: "at least one task is required".into(),
            });
        }
        if let Some(task) = tasks.iter().find(|t| t.duration == 0) {
            return Err(WorldError::InvalidTasks {
                detail: format!("task {} has zero duration", task.name),
            });
        }
        Ok(Self {
            tasks,
            bound: JobBound::default(),
        })
    }

    /// The four-task reference instance.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            tasks: vec![
                Task::new("Task1", 3, 4, 10),
                Task::new("Task2", 2, 3, 15),
                Task::new("Task3", 4, 6, 20),
                Task::new("Task4", 1, 2, 8),
            ],
            bound: JobBound::default(),
        }
    }

    #[must_use]
    pub fn with_bound(mut self, bound: JobBound) -> Self {
        self.bound = bound;
        self
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn bound(&self) -> JobBound {
        self.bound
    }

    fn elapsed(&self, seq: &Sequence) -> u32 {
        seq.0
            .iter()
            .map(|&i| self.tasks[i].duration)
            .fold(0u32, u32::saturating_add)
    }

    /// Total penalty of executing `order` back to back from time zero.
    #[must_use]
    pub fn total_penalty(&self, order: &[usize]) -> u32 {
        let mut time = 0u32;
        let mut total = 0u32;
        for &i in order {
            let task = &self.tasks[i];
            time = time.saturating_add(task.duration);
            total = total.saturating_add(task.penalty_at(time));
        }
        total
    }

    /// Tasks sorted by deadline (stable, so list order breaks ties).
    #[must_use]
    pub fn earliest_deadline_first(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tasks.len()).collect();
        order.sort_by_key(|&i| self.tasks[i].deadline);
        order
    }

    /// Render an order as `"A -> B -> C"`.
    #[must_use]
    pub fn format_order(&self, order: &[usize]) -> String {
        order
            .iter()
            .map(|&i| self.tasks[i].name.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl StateSpace for JobSequencing {
    type State = Sequence;
    type Cost = u32;

    fn successors(&self, state: &Sequence) -> Vec<(Sequence, u32)> {
        let elapsed = self.elapsed(state);
        self.tasks
            .iter()
            .enumerate()
            .filter(|&(i, _)| !state.contains(i))
            .map(|(i, task)| {
                let mut next = state.clone();
                next.0.push(i);
                (next, task.penalty_at(elapsed.saturating_add(task.duration)))
            })
            .collect()
    }

    fn is_goal(&self, state: &Sequence) -> bool {
        state.len() == self.tasks.len()
    }
}

impl Heuristic<Sequence, u32> for JobSequencing {
    fn estimate(&self, state: &Sequence) -> u32 {
        let remaining = self.tasks.len() - state.len();
        match self.bound {
            JobBound::PerTask(charge) => {
                u32::try_from(remaining).unwrap_or(u32::MAX).saturating_mul(charge)
            }
            JobBound::Relaxed => {
                let elapsed = self.elapsed(state);
                self.tasks
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| !state.contains(i))
                    .map(|(_, task)| task.penalty_at(elapsed.saturating_add(task.duration)))
                    .fold(0u32, u32::saturating_add)
            }
        }
    }
}

impl World for JobSequencing {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "job_sequencing"
    }

    fn start(&self) -> Sequence {
        Sequence::default()
    }

    fn heuristic(&self) -> Option<&dyn Heuristic<Sequence, u32>> {
        Some(self)
    }

    fn label(&self, state: &Sequence) -> String {
        let names: Vec<&str> = state
            .tasks()
            .iter()
            .map(|&i| self.tasks[i].name.as_str())
            .collect();
        format!("[{}]", names.join(","))
    }
}
