use serde::{Deserialize, Serialize};
use time::Time;
use crate::models::item::Item;

time::serde::format_description!(hour_minute, Time, "[hour]:[minute]");

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "hour_minute")]
    pub opens_at: Time,
    #[serde(with = "hour_minute")]
    pub closes_at: Time,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub menu: Vec<Item>,
}

impl Restaurant {
    /// Whether the restaurant serves at `time`. The closing instant itself is
    /// excluded, windows ending before they start run past midnight, and equal
    /// bounds mean the restaurant never closes.
    pub fn is_open_at(&self, time: Time) -> bool {
        if self.opens_at == self.closes_at {
            return true;
        }

        if self.opens_at < self.closes_at {
            self.opens_at <= time && time < self.closes_at
        } else {
            time >= self.opens_at || time < self.closes_at
        }
    }
}
