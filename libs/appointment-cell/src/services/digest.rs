use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info};

use notification_cell::NotificationService;

use crate::services::store::AppointmentStore;

/// Local wall-clock hour at which the daily summary goes out.
pub const DIGEST_HOUR: u32 = 21;

/// Queries the day's bookings and mails the summary. Every failure is
/// logged and swallowed; each firing stands alone.
pub struct DailyDigestJob {
    store: Arc<dyn AppointmentStore>,
    notifier: Arc<NotificationService>,
}

impl DailyDigestJob {
    pub fn new(store: Arc<dyn AppointmentStore>, notifier: Arc<NotificationService>) -> Self {
        Self { store, notifier }
    }

    pub async fn run_once(&self) {
        let now = Local::now();
        let threshold = start_of_today(now).with_timezone(&Utc);

        let appointments = match self.store.find_created_since(threshold).await {
            Ok(appointments) => appointments,
            Err(e) => {
                error!("Failed to query today's appointments: {}", e);
                return;
            }
        };

        if appointments.is_empty() {
            debug!("No appointments booked today, skipping digest");
            return;
        }

        if let Err(e) = self.notifier.send_digest(&appointments, now).await {
            error!("Failed to send daily digest: {}", e);
        }
    }
}

/// Recurring trigger for [`DailyDigestJob`], owned by the process
/// lifecycle: a shutdown signal cancels the pending firing.
pub struct DigestScheduler {
    job: DailyDigestJob,
}

impl DigestScheduler {
    pub fn new(job: DailyDigestJob) -> Self {
        Self { job }
    }

    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting daily digest scheduler, fires at {:02}:00 local time",
            DIGEST_HOUR
        );

        loop {
            let now = Local::now();
            let fire_at = next_fire(now);
            let wait = (fire_at - now).to_std().unwrap_or(StdDuration::ZERO);
            debug!("Next digest fires at {}", fire_at);

            tokio::select! {
                _ = sleep(wait) => self.job.run_once().await,
                _ = shutdown.changed() => {
                    info!("Digest scheduler shutting down");
                    return;
                }
            }
        }
    }
}

/// Local midnight of the given instant's day.
pub fn start_of_today(now: DateTime<Local>) -> DateTime<Local> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(now)
}

/// The next strictly-future daily fire time.
pub fn next_fire(now: DateTime<Local>) -> DateTime<Local> {
    let today = now.date_naive();

    if let Some(fire_at) = fire_on(today) {
        if fire_at > now {
            return fire_at;
        }
    }

    today
        .succ_opt()
        .and_then(fire_on)
        .unwrap_or_else(|| now + Duration::days(1))
}

fn fire_on(day: NaiveDate) -> Option<DateTime<Local>> {
    day.and_hms_opt(DIGEST_HOUR, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}
