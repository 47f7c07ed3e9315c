//! Savings bookkeeping: cumulative savings, streaks, points, achievement
//! unlocks, settings and the wishlist, all persisted through an injected
//! [`KvStore`].

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

use crate::achievements::{self, Rule};
use crate::error::{ServiceError, ServiceResult};
use crate::storage::KvStore;
use crate::types::{Settings, Stats, WishlistItem};

pub const KEY_SETTINGS: &str = "settings";
pub const KEY_TOTAL_SAVED: &str = "totalSaved";
pub const KEY_WISHLIST: &str = "wishlist";
pub const KEY_STATS: &str = "stats";

pub const BASE_POINTS: u64 = 10;

/// What one recorded saving earned.
#[derive(Debug)]
pub struct SaveOutcome {
    pub points_earned: u64,
    pub new_streak: u32,
    pub unlocked: Vec<&'static Rule>,
}

pub struct SavingsLedger {
    store: Arc<dyn KvStore>,
    // record_saving is read-modify-write with an await in the middle; the
    // guard makes rapid double invocations apply sequentially instead of the
    // second silently overwriting the first.
    save_lock: Mutex<()>,
}

impl SavingsLedger {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            save_lock: Mutex::new(()),
        }
    }

    /// Seed settings and the savings total on first run.
    pub async fn initialize(&self) -> ServiceResult<()> {
        let data = self.store.get(&[KEY_SETTINGS, KEY_TOTAL_SAVED]).await?;
        let mut seed = Map::new();
        if !data.contains_key(KEY_SETTINGS) {
            seed.insert(
                KEY_SETTINGS.to_string(),
                serde_json::to_value(Settings::default())?,
            );
        }
        if !data.contains_key(KEY_TOTAL_SAVED) {
            seed.insert(KEY_TOTAL_SAVED.to_string(), json!(0.0));
        }
        if !seed.is_empty() {
            tracing::info!("seeding default settings");
            self.store.set(seed).await?;
        }
        Ok(())
    }

    /// Record a forgone purchase: bump the savings total and item count,
    /// award `10 + floor(amount)` points, recompute the streak, evaluate
    /// achievements and persist everything as one logical unit.
    pub async fn record_saving(&self, amount: f64) -> ServiceResult<SaveOutcome> {
        self.record_saving_at(amount, Local::now()).await
    }

    pub async fn record_saving_at(
        &self,
        amount: f64,
        now: DateTime<Local>,
    ) -> ServiceResult<SaveOutcome> {
        if !amount.is_finite() {
            return Err(ServiceError::InvalidAmount);
        }
        let amount = if amount < 0.0 {
            tracing::warn!(amount, "negative saving amount, clamping to zero");
            0.0
        } else {
            amount
        };

        let _guard = self.save_lock.lock().await;

        let data = self.store.get(&[KEY_TOTAL_SAVED, KEY_STATS]).await?;
        let total_saved = data
            .get(KEY_TOTAL_SAVED)
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let mut stats: Stats = match data.get(KEY_STATS) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Stats::default(),
        };

        stats.items_saved += 1;
        let points_earned = BASE_POINTS + amount.floor() as u64;
        stats.total_points += points_earned;

        let today = now.date_naive();
        match stats.last_save_date.as_deref().and_then(parse_save_date) {
            None => stats.current_streak = 1,
            Some(last) => {
                let day_difference = (today - last).num_days().abs();
                if day_difference == 1 {
                    stats.current_streak += 1;
                } else if day_difference > 1 {
                    stats.current_streak = 1;
                }
                // Same calendar day: streak unchanged.
            }
        }
        stats.last_save_date = Some(now.to_rfc3339());

        let unlocked = achievements::evaluate(&mut stats);

        let mut items = Map::new();
        items.insert(KEY_TOTAL_SAVED.to_string(), json!(total_saved + amount));
        items.insert(KEY_STATS.to_string(), serde_json::to_value(&stats)?);
        self.store.set(items).await?;

        tracing::info!(
            amount,
            points_earned,
            streak = stats.current_streak,
            "saving recorded"
        );

        Ok(SaveOutcome {
            points_earned,
            new_streak: stats.current_streak,
            unlocked,
        })
    }

    pub async fn get_total_saved(&self) -> ServiceResult<f64> {
        let data = self.store.get(&[KEY_TOTAL_SAVED]).await?;
        Ok(data
            .get(KEY_TOTAL_SAVED)
            .and_then(Value::as_f64)
            .unwrap_or(0.0))
    }

    pub async fn get_stats(&self) -> ServiceResult<Stats> {
        let data = self.store.get(&[KEY_STATS]).await?;
        Ok(match data.get(KEY_STATS) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Stats::default(),
        })
    }

    /// Persisted settings merged over the defaults, so a partial record
    /// picks up defaults for whatever it omits.
    pub async fn get_settings(&self) -> ServiceResult<Settings> {
        let data = self.store.get(&[KEY_SETTINGS]).await?;
        Ok(match data.get(KEY_SETTINGS) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Settings::default(),
        })
    }

    pub async fn save_settings(&self, settings: &Settings) -> ServiceResult<()> {
        let mut items = Map::new();
        items.insert(KEY_SETTINGS.to_string(), serde_json::to_value(settings)?);
        self.store.set(items).await?;
        Ok(())
    }

    pub async fn get_wishlist(&self) -> ServiceResult<Vec<WishlistItem>> {
        let data = self.store.get(&[KEY_WISHLIST]).await?;
        Ok(match data.get(KEY_WISHLIST) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        })
    }

    /// Append an item to the wishlist, stamping its creation date.
    pub async fn add_to_wishlist(&self, item: WishlistItem) -> ServiceResult<WishlistItem> {
        self.add_to_wishlist_at(item, Local::now()).await
    }

    pub async fn add_to_wishlist_at(
        &self,
        mut item: WishlistItem,
        now: DateTime<Local>,
    ) -> ServiceResult<WishlistItem> {
        item.date = now.to_rfc3339();
        let mut list = self.get_wishlist().await?;
        list.push(item.clone());
        let mut items = Map::new();
        items.insert(KEY_WISHLIST.to_string(), serde_json::to_value(&list)?);
        self.store.set(items).await?;
        Ok(item)
    }
}

fn parse_save_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}
