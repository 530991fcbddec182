use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
