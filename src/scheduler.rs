//! Periodic driver for the overdue-task auto-close job.
//!
//! The scheduler owns the timer and the shutdown handling; the job itself is
//! [`autoclose_overdue_tasks`], which stays callable on its own.

use crate::todo::{ports::TaskRepository, services::autoclose_overdue_tasks};
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use tokio::time::MissedTickBehavior;

/// Runs [`autoclose_overdue_tasks`] on a fixed period.
pub struct AutocloseScheduler<T, C>
where
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    clock: Arc<C>,
    period: Duration,
}

impl<T, C> AutocloseScheduler<T, C>
where
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler that runs once per `period`.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>, period: Duration) -> Self {
        Self {
            tasks,
            clock,
            period,
        }
    }

    /// Returns the configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Runs a single auto-close pass.
    ///
    /// Failures are logged and reported as `None` so that a failed pass
    /// never stops the schedule.
    pub async fn run_once(&self) -> Option<usize> {
        match autoclose_overdue_tasks(&*self.tasks, &*self.clock).await {
            Ok(closed) => Some(closed),
            Err(err) => {
                tracing::error!(error = %err, "auto-close run failed");
                None
            }
        }
    }

    /// Runs passes on every tick until `shutdown` completes.
    ///
    /// The first pass runs immediately. Passes never overlap, and ticks
    /// missed while a pass is running are delayed rather than replayed.
    /// Returns the number of passes started.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) -> usize {
        tracing::info!(
            period_secs = self.period.as_secs(),
            "auto-close scheduler started"
        );

        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut runs = 0_usize;
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!(runs, "auto-close scheduler stopping");
                    break;
                }
                _ = interval.tick() => {
                    runs += 1;
                    self.run_once().await;
                }
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::{
        adapters::memory::InMemoryTodoStore,
        domain::{
            ProjectDescription, ProjectName, TaskDescription, TaskStatus, TaskTitle, TodoLimits,
        },
        ports::ProjectRepository,
        tests::recording_tasks::{RecordingTasks, overdue_task},
    };
    use chrono::{Duration as ChronoDuration, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn run_once_closes_overdue_tasks() {
        let limits = TodoLimits::default();
        let store = Arc::new(InMemoryTodoStore::new());
        let project = ProjectRepository::create(
            &*store,
            &ProjectName::new("Chores", &limits).expect("valid name"),
            &ProjectDescription::new("", &limits).expect("valid description"),
        )
        .await
        .expect("project should be created");
        let task = TaskRepository::create(
            &*store,
            project.id(),
            &TaskTitle::new("Laundry", &limits).expect("valid title"),
            &TaskDescription::new("", &limits).expect("valid description"),
            Some(Utc::now() - ChronoDuration::hours(1)),
        )
        .await
        .expect("task should be created");

        let scheduler = AutocloseScheduler::new(
            Arc::clone(&store),
            Arc::new(DefaultClock),
            Duration::from_secs(60),
        );

        assert_eq!(scheduler.run_once().await, Some(1));
        assert_eq!(scheduler.run_once().await, Some(0));
        let closed = TaskRepository::get_by_id(&*store, task.id())
            .await
            .expect("lookup should succeed")
            .expect("task should exist");
        assert_eq!(closed.status(), TaskStatus::Done);
        assert!(closed.closed_at().is_some());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn run_until_stops_when_shutdown_completes() {
        let store = Arc::new(InMemoryTodoStore::new());
        let scheduler =
            AutocloseScheduler::new(store, Arc::new(DefaultClock), Duration::from_secs(3600));

        let runs = scheduler
            .run_until(tokio::time::sleep(Duration::from_millis(50)))
            .await;

        assert_eq!(runs, 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn run_once_reports_failed_pass_as_none() {
        let tasks = Arc::new(
            RecordingTasks::with_overdue(vec![overdue_task("Late")]).failing_updates(),
        );
        let scheduler = AutocloseScheduler::new(
            Arc::clone(&tasks),
            Arc::new(DefaultClock),
            Duration::from_secs(60),
        );

        assert_eq!(scheduler.run_once().await, None);
        assert_eq!(tasks.updates(), 1);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn run_until_keeps_ticking_after_failed_passes() {
        let tasks = Arc::new(RecordingTasks::with_overdue(Vec::new()).failing_scans());
        let scheduler = AutocloseScheduler::new(
            Arc::clone(&tasks),
            Arc::new(DefaultClock),
            Duration::from_secs(60),
        );
        assert_eq!(scheduler.period(), Duration::from_secs(60));

        // Ticks land at 0s, 60s and 120s before the 150s shutdown.
        let runs = scheduler
            .run_until(tokio::time::sleep(Duration::from_secs(150)))
            .await;

        assert_eq!(runs, 3);
        assert_eq!(tasks.scans(), 3);
    }
}
