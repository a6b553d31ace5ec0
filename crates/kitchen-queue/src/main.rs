//! Demo binary: places a few orders, moves them through the kitchen and prints
//! the queue as a customer would see it.
//!
//! Usage: `kitchen-queue [config.toml]`

use actor_framework::tracing::setup_tracing;
use chrono::{DateTime, Duration, FixedOffset};
use kitchen_queue::clients::OrderStore;
use kitchen_queue::clock::{Clock, SystemClock};
use kitchen_queue::config::QueueConfig;
use kitchen_queue::display::QueueRow;
use kitchen_queue::lifecycle::KitchenSystem;
use kitchen_queue::localization::{EnglishCatalog, Localizer, MessageKey};
use kitchen_queue::model::KitchenStatus;
use std::sync::Arc;
use tracing::{info, Instrument};

/// Title bar with the display clock, as shown above the table.
fn header_line(now: DateTime<FixedOffset>, text: &impl Localizer) -> String {
    format!(
        "== {} == {}",
        text.text(MessageKey::OrderQueueList),
        now.format("%H:%M:%S %p")
    )
}

fn print_queue(rows: &[QueueRow], now: DateTime<FixedOffset>, text: &impl Localizer) {
    println!("{}", header_line(now, text));
    if rows.is_empty() {
        println!("{}", text.text(MessageKey::NoCurrentOrders));
        return;
    }
    println!(
        "{:<8} {:<12} {:<18} {}",
        text.text(MessageKey::OrderNumber),
        text.text(MessageKey::Status),
        text.text(MessageKey::WaitingTimeMinutes),
        text.text(MessageKey::OrderTime),
    );
    for row in rows {
        let marker = if row.highlighted { "*" } else { " " };
        println!(
            "{marker}{:<7} {:<12} {:<18} {}",
            row.order_number,
            text.text(row.status.into()),
            text.wait_text(row.wait),
            row.created_at.format("%H:%M:%S"),
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => QueueConfig::from_file(&path).map_err(|e| e.to_string())?,
        None => QueueConfig::default(),
    };
    info!(?config, "Starting kitchen queue");

    let clock = Arc::new(SystemClock);
    let system = KitchenSystem::new(&config, clock.clone()).map_err(|e| e.to_string())?;
    let client = system.order_client.clone();

    let span = tracing::info_span!("kitchen_demo");
    async {
        let mut ids = Vec::new();
        for number in 1..=4 {
            ids.push(client.place_order(number).await?);
        }

        client
            .set_estimate(ids[1], clock.now_utc() + Duration::minutes(7))
            .await?;
        client
            .update_kitchen_status(ids[1], KitchenStatus::InProgress)
            .await?;
        client.update_kitchen_status(ids[2], KitchenStatus::InProgress).await?;
        client.update_kitchen_status(ids[0], KitchenStatus::Ready).await?;
        client.update_kitchen_status(ids[3], KitchenStatus::Delivered).await?;
        Ok::<_, kitchen_queue::order_actor::OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let rows = system.display.rows().await.map_err(|e| e.to_string())?;
    print_queue(&rows, system.display.displayed_now(), &EnglishCatalog);

    drop(client);
    system.shutdown().await;

    info!("Kitchen queue demo finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn header_shows_display_clock() {
        let now = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 14, 5, 9)
            .unwrap();
        assert_eq!(header_line(now, &EnglishCatalog), "== Order Queue == 14:05:09 PM");
    }
}
