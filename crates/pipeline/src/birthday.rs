//! Daily birthday greetings and reminders.

use chrono::{Datelike, Duration, NaiveDate};
use giapha_core::birthday::{clan_today, is_birthday_on, sent_marker_key};
use giapha_core::types::Timestamp;
use giapha_db::models::person::Person;
use giapha_db::Store;
use giapha_events::{templates, Notification, Notifier};
use serde::Serialize;

use crate::error::PipelineResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthdayReport {
    pub ok: bool,
    pub date: String,
    pub today_birthdays: usize,
    pub today_emails_sent: usize,
    pub tomorrow_birthdays: usize,
    pub tomorrow_reminders_sent: usize,
}

fn born_on(person: &Person, date: NaiveDate) -> bool {
    match (person.birth_month, person.birth_day) {
        (Some(m), Some(d)) => match (u32::try_from(m), u32::try_from(d)) {
            (Ok(m), Ok(d)) => is_birthday_on(m, d, date),
            _ => false,
        },
        _ => false,
    }
}

async fn send_all(notifier: &dyn Notifier, notifications: Vec<Notification>) -> usize {
    let mut sent = 0;
    for notification in notifications {
        match notifier.send(&notification).await {
            Ok(()) => sent += 1,
            Err(e) => tracing::warn!(to = %notification.to, error = %e, "Birthday email failed"),
        }
    }
    sent
}

/// Run the job for the clan-local day containing `now`.
///
/// The day's marker is claimed before anything is sent, so a second run on
/// the same day reports the counts but sends nothing.
pub async fn run(
    store: &dyn Store,
    notifier: &dyn Notifier,
    now: Timestamp,
) -> PipelineResult<BirthdayReport> {
    let today = clan_today(now);
    let tomorrow = today + Duration::days(1);

    let people = store.list_living_with_birthdays().await?;
    let todays: Vec<&Person> = people.iter().filter(|p| born_on(p, today)).collect();
    let tomorrows: Vec<&Person> = people.iter().filter(|p| born_on(p, tomorrow)).collect();

    let mut report = BirthdayReport {
        ok: true,
        date: today.format("%Y-%m-%d").to_string(),
        today_birthdays: todays.len(),
        today_emails_sent: 0,
        tomorrow_birthdays: tomorrows.len(),
        tomorrow_reminders_sent: 0,
    };

    let marker = serde_json::json!({
        "today": report.today_birthdays,
        "tomorrow": report.tomorrow_birthdays,
        "claimed_at": now.to_rfc3339(),
    });
    if !store.claim_setting(&sent_marker_key(today), &marker).await? {
        tracing::info!(date = %report.date, "Birthday notifications already sent today");
        return Ok(report);
    }

    let greetings = todays
        .iter()
        .filter_map(|p| {
            let email = p.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
            let age = p.birth_year.map(|y| today.year() - y);
            Some(templates::birthday_greeting(email, &p.display_name, age))
        })
        .collect();
    report.today_emails_sent = send_all(notifier, greetings).await;

    if !tomorrows.is_empty() {
        let names: Vec<String> = tomorrows.iter().map(|p| p.display_name.clone()).collect();
        let reminders = store
            .list_active_profiles()
            .await?
            .iter()
            .map(|profile| templates::birthday_reminder(&profile.email, &names))
            .collect();
        report.tomorrow_reminders_sent = send_all(notifier, reminders).await;
    }

    tracing::info!(
        date = %report.date,
        today = report.today_birthdays,
        greetings = report.today_emails_sent,
        tomorrow = report.tomorrow_birthdays,
        reminders = report.tomorrow_reminders_sent,
        "Birthday job finished",
    );
    Ok(report)
}
