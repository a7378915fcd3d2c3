//! Sunscreen reapplication reminders.
//!
//! A reminder fires once after a delay in minutes. Showing reminders needs a
//! one-time permission; for the terminal implementation that is the
//! `reminders.enabled` config flag.

use crate::config::ReminderConfig;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const REMINDER_TITLE: &str = "Time to reapply sunscreen! ☀️";
pub const REMINDER_BODY: &str = "Protect your skin by reapplying sunscreen now.";

/// Schedules user-visible reminders
pub trait ReminderScheduler {
    /// Ask for permission to show reminders; `true` if granted
    fn request_permission(&self) -> bool;

    /// Fire a reapplication reminder after `minutes`
    fn schedule(&self, minutes: u32) -> Result<ScheduledReminder>;
}

/// Handle to a pending reminder
#[derive(Debug)]
pub struct ScheduledReminder {
    minutes: u32,
    due_at: DateTime<Local>,
    handle: JoinHandle<()>,
}

impl ScheduledReminder {
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn due_at(&self) -> DateTime<Local> {
        self.due_at
    }

    /// Block until the reminder has fired
    pub fn wait(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| Error::Notification("reminder thread panicked".into()))
    }
}

type Notifier = Arc<dyn Fn(&str, &str) + Send + Sync>;

/// Reminder printed to the terminal from a timer thread
pub struct TerminalReminder {
    permitted: bool,
    minute: Duration,
    notify: Notifier,
}

impl TerminalReminder {
    pub fn new(permitted: bool) -> Self {
        Self {
            permitted,
            minute: Duration::from_secs(60),
            notify: Arc::new(|title: &str, body: &str| {
                // Bell, then the message
                println!("\x07{}\n{}", title, body);
            }),
        }
    }

    pub fn from_config(config: &ReminderConfig) -> Self {
        Self::new(config.enabled)
    }

    /// Length of one "minute"; shortened in tests
    pub fn with_minute_length(mut self, minute: Duration) -> Self {
        self.minute = minute;
        self
    }

    /// Replace how the reminder is shown
    pub fn with_notifier<F>(mut self, notify: F) -> Self
    where
        F: Fn(&str, &str) + Send + Sync + 'static,
    {
        self.notify = Arc::new(notify);
        self
    }
}

impl ReminderScheduler for TerminalReminder {
    fn request_permission(&self) -> bool {
        if !self.permitted {
            tracing::info!("Reminders disabled in config");
        }
        self.permitted
    }

    fn schedule(&self, minutes: u32) -> Result<ScheduledReminder> {
        if !self.request_permission() {
            return Err(Error::Notification(
                "reminder permission not granted (set reminders.enabled = true)".into(),
            ));
        }

        let due_at = Local::now() + chrono::Duration::minutes(i64::from(minutes));
        let delay = self.minute * minutes;
        let notify = Arc::clone(&self.notify);

        let handle = thread::spawn(move || {
            thread::sleep(delay);
            notify(REMINDER_TITLE, REMINDER_BODY);
        });

        tracing::info!("Reapplication reminder scheduled for {}", due_at.format("%H:%M"));

        Ok(ScheduledReminder {
            minutes,
            due_at,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_reminder_fires_after_delay() {
        let shown = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&shown);

        let scheduler = TerminalReminder::new(true)
            .with_minute_length(Duration::from_millis(1))
            .with_notifier(move |title, body| {
                sink.lock().unwrap().push(format!("{} {}", title, body));
            });

        let reminder = scheduler.schedule(90).unwrap();
        assert_eq!(reminder.minutes(), 90);
        assert!(reminder.due_at() > Local::now());
        reminder.wait().unwrap();

        let shown = shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert!(shown[0].starts_with(REMINDER_TITLE));
    }

    #[test]
    fn test_schedule_without_permission_fails() {
        let scheduler = TerminalReminder::from_config(&ReminderConfig { enabled: false });
        assert!(!scheduler.request_permission());
        assert!(matches!(scheduler.schedule(60), Err(Error::Notification(_))));
    }
}
