// src/monitor/mod.rs

//! Availability monitor: the per-target polling loop.
//!
//! Each loop repeatedly fetches a fresh course snapshot, evaluates the seat
//! verdict for its activity, and lets `WatchState` decide whether to fire the
//! notifier. Fetch failures are logged and skipped; the loop only ends when
//! the task is cancelled from outside.

mod state;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::error::Result;
use crate::models::{MonitorConfig, Target};
use crate::notify::Notifier;
use crate::services::CourseSource;

pub use state::{Decision, WatchState};

/// Result of one poll cycle, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Seats opened up and an alert was dispatched
    Notified,
    /// Seats are open but alerting is suppressed (cool-down or no new edge)
    OpenSuppressed,
    /// No open seat this cycle
    NoSeats,
    /// The fetch or lookup failed; no new information
    FetchFailed,
}

/// Running counters for one monitor loop.
#[derive(Debug, Default, Clone)]
pub struct MonitorStats {
    pub cycles: u64,
    pub fetch_failures: u64,
    pub notifications: u64,
    pub last_poll: Option<DateTime<Utc>>,
}

impl MonitorStats {
    fn record(&mut self, outcome: PollOutcome) {
        self.cycles += 1;
        self.last_poll = Some(Utc::now());
        match outcome {
            PollOutcome::Notified => self.notifications += 1,
            PollOutcome::FetchFailed => self.fetch_failures += 1,
            PollOutcome::OpenSuppressed | PollOutcome::NoSeats => {}
        }
    }

    fn log_summary(&self, target: &Target) {
        log::info!(
            "{}: {} cycles, {} fetch failures, {} notifications",
            target,
            self.cycles,
            self.fetch_failures,
            self.notifications
        );
    }
}

/// Polling loop for one watched (course, semester, activity) target.
pub struct Monitor {
    source: Arc<dyn CourseSource>,
    notifier: Arc<dyn Notifier>,
    target: Target,
    config: MonitorConfig,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn CourseSource>,
        notifier: Arc<dyn Notifier>,
        target: Target,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            target,
            config,
        }
    }

    /// Check the target exists before the first poll. Start-up errors
    /// propagate so the caller can fail fast with a clear message.
    pub async fn validate(&self) -> Result<()> {
        self.source
            .validate_target(
                &self.target.course_code,
                &self.target.semester,
                &self.target.activity,
            )
            .await
    }

    /// Run the polling loop until the surrounding task is cancelled.
    pub async fn run(&self) {
        log::info!(
            "Watching {} every {}s (cool-down {}s)",
            self.target,
            self.config.poll_interval_secs,
            self.config.cooldown_secs
        );

        let mut state = WatchState::new(self.config.cooldown());
        let mut stats = MonitorStats::default();

        loop {
            let outcome = self.poll_once(&mut state).await;
            stats.record(outcome);

            if self.config.summary_every > 0 && stats.cycles % self.config.summary_every == 0 {
                stats.log_summary(&self.target);
            }

            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }

    /// Fetch one snapshot and feed the verdict through the state machine.
    ///
    /// Never returns an error: a failed cycle is logged and reported as
    /// `FetchFailed` so the loop survives transient catalog trouble.
    pub async fn poll_once(&self, state: &mut WatchState) -> PollOutcome {
        let course = match self
            .source
            .fetch_course(&self.target.course_code, &self.target.semester)
            .await
        {
            Ok(course) => course,
            Err(e) => {
                log::warn!("{}: fetch failed, will retry next cycle: {}", self.target, e);
                return PollOutcome::FetchFailed;
            }
        };

        let activity = match course.get_activity(&self.target.activity) {
            Ok(activity) => activity,
            Err(e) => {
                log::warn!("{}: {}", self.target, e);
                return PollOutcome::FetchFailed;
            }
        };

        let open = activity.has_open_seat();
        log::debug!("{}: {} (open: {})", self.target, activity, open);

        match state.observe(open, Instant::now()) {
            Decision::Notify => {
                let message = format!(
                    "Seats are available for {} in {} ({})! Enroll now!",
                    self.target.activity, self.target.course_code, self.target.semester
                );
                log::info!("{}: seats open, dispatching alert", self.target);

                // Delivery failure does not change monitor state; the
                // cool-down is already armed and there is no in-cycle retry.
                if let Err(e) = self.notifier.notify(&message).await {
                    log::warn!("{}: alert delivery failed: {}", self.target, e);
                }
                PollOutcome::Notified
            }
            Decision::Hold if open => PollOutcome::OpenSuppressed,
            Decision::Hold => PollOutcome::NoSeats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::AppError;
    use crate::models::{Activity, Course};

    /// One scripted poll reply.
    #[derive(Debug, Clone, Copy)]
    enum Step {
        Open,
        Full,
        Transport,
        Missing,
    }

    /// Source that replays a script, repeating the final step forever.
    struct ScriptedSource {
        steps: Mutex<Vec<Step>>,
    }

    impl ScriptedSource {
        fn new(steps: &[Step]) -> Arc<Self> {
            let mut steps: Vec<Step> = steps.to_vec();
            steps.reverse();
            Arc::new(Self {
                steps: Mutex::new(steps),
            })
        }

        fn next_step(&self) -> Step {
            let mut steps = self.steps.lock().unwrap();
            if steps.len() > 1 {
                steps.pop().unwrap()
            } else {
                steps[0]
            }
        }

        fn course(current: u32) -> Course {
            let mut course = Course::new("Programming on the Web", "CSC309H1", "F");
            course.add_activity(Activity::new("LEC0101", current, 50, false, 0));
            course
        }
    }

    #[async_trait]
    impl CourseSource for ScriptedSource {
        async fn fetch_course(&self, code: &str, semester: &str) -> Result<Course> {
            match self.next_step() {
                Step::Open => Ok(Self::course(49)),
                Step::Full => Ok(Self::course(50)),
                Step::Missing => Err(AppError::course_not_found(code, semester)),
                Step::Transport => Err(AppError::config("simulated transport failure")),
            }
        }

        async fn fetch_all(
            &self,
            _wanted: Option<&HashSet<String>>,
        ) -> Result<HashMap<String, Course>> {
            Ok(HashMap::new())
        }
    }

    /// Notifier that records every delivered message.
    #[derive(Default)]
    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, message: &str) -> Result<()> {
            self.messages.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    /// Notifier whose delivery always fails.
    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(&self, _message: &str) -> Result<()> {
            Err(AppError::notify("simulated delivery failure"))
        }
    }

    fn target() -> Target {
        Target {
            course_code: "CSC309H1".into(),
            semester: "F".into(),
            activity: "LEC0101".into(),
        }
    }

    fn config() -> MonitorConfig {
        MonitorConfig {
            poll_interval_secs: 5,
            cooldown_secs: 35,
            summary_every: 0,
        }
    }

    fn monitor(source: Arc<ScriptedSource>, notifier: Arc<RecordingNotifier>) -> Monitor {
        Monitor::new(source, notifier, target(), config())
    }

    #[tokio::test]
    async fn test_full_then_open_notifies_once() {
        let source = ScriptedSource::new(&[Step::Full, Step::Open, Step::Open]);
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor(source, Arc::clone(&notifier));
        let mut state = WatchState::new(config().cooldown());

        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::NoSeats);
        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::Notified);
        assert_eq!(
            monitor.poll_once(&mut state).await,
            PollOutcome::OpenSuppressed
        );

        let messages = notifier.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("LEC0101"));
        assert!(messages[0].contains("CSC309H1"));
    }

    #[tokio::test]
    async fn test_fetch_error_does_not_break_detection() {
        // Scenario: seats taken, one transport failure, then seats open.
        // The failed cycle carries no information and must not eat the edge.
        let source = ScriptedSource::new(&[Step::Full, Step::Transport, Step::Open]);
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor(source, Arc::clone(&notifier));
        let mut state = WatchState::new(config().cooldown());

        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::NoSeats);
        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::FetchFailed);
        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::Notified);
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_course_not_found_is_transient() {
        let source = ScriptedSource::new(&[Step::Missing, Step::Open]);
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor(source, Arc::clone(&notifier));
        let mut state = WatchState::new(config().cooldown());

        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::FetchFailed);
        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::Notified);
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_cooldown() {
        let source = ScriptedSource::new(&[Step::Open, Step::Open]);
        let monitor = Monitor::new(source, Arc::new(FailingNotifier), target(), config());
        let mut state = WatchState::new(config().cooldown());

        // Failed delivery still counts as the one alert for this window
        assert_eq!(monitor.poll_once(&mut state).await, PollOutcome::Notified);
        assert_eq!(
            monitor.poll_once(&mut state).await,
            PollOutcome::OpenSuppressed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_alerts_once_while_open() {
        let source = ScriptedSource::new(&[Step::Full, Step::Open]);
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor(source, Arc::clone(&notifier));

        let handle = tokio::spawn(async move { monitor.run().await });

        // Plenty of cycles: past the cool-down and well beyond
        tokio::time::sleep(Duration::from_secs(120)).await;
        handle.abort();

        // Seats stayed open the whole time after the first opening, so the
        // loop must have alerted exactly once.
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_realerts_after_window_closes() {
        let source = ScriptedSource::new(&[
            Step::Full,
            Step::Open, // alert 1
            Step::Open,
            Step::Open,
            Step::Open,
            Step::Open,
            Step::Open,
            Step::Open,
            Step::Open, // cool-down (35s) expires during these
            Step::Full, // window closes
            Step::Open, // alert 2
        ]);
        let notifier = Arc::new(RecordingNotifier::default());
        let monitor = monitor(source, Arc::clone(&notifier));

        let handle = tokio::spawn(async move { monitor.run().await });
        tokio::time::sleep(Duration::from_secs(120)).await;
        handle.abort();

        assert_eq!(notifier.messages.lock().unwrap().len(), 2);
    }
}
