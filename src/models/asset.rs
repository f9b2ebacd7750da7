use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fixed category taxonomy. Names are part of the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "MEME")]
    Meme,
    #[serde(rename = "DeFi")]
    DeFi,
    #[serde(rename = "L1")]
    L1,
    #[serde(rename = "GameFi")]
    GameFi,
    #[serde(rename = "Privacy")]
    Privacy,
    #[serde(rename = "Infrastructure")]
    Infrastructure,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Meme,
        Category::DeFi,
        Category::L1,
        Category::GameFi,
        Category::Privacy,
        Category::Infrastructure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Meme => "MEME",
            Category::DeFi => "DeFi",
            Category::L1 => "L1",
            Category::GameFi => "GameFi",
            Category::Privacy => "Privacy",
            Category::Infrastructure => "Infrastructure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Raw asset metadata as supplied by the market-data collaborator.
/// Every metric is optional; absent values count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRecord {
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub price_history: Vec<f64>,
    pub market_cap_rank: Option<u32>,
    pub market_cap: Option<f64>,
    pub total_value_locked: Option<f64>,
    pub launch_date: Option<DateTime<Utc>>,
    /// Reference time for age computations.
    pub observed_at: Option<DateTime<Utc>>,
    pub holder_count: Option<u64>,
    pub twitter_followers: Option<u64>,
    pub reddit_subscribers: Option<u64>,
    pub telegram_members: Option<u64>,
    pub github_stars: Option<u64>,
    pub github_commits: Option<u64>,
    pub github_contributors: Option<u64>,
    pub github_issues: Option<u64>,
    pub nft_volume: Option<f64>,
    pub nft_holders: Option<u64>,
    pub gaming_users: Option<u64>,
}

impl AssetRecord {
    pub fn new(symbol: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Normalised, non-negative features derived from an [`AssetRecord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFeatures {
    pub volatility: f64,
    pub market_cap_rank: f64,
    pub age_days: f64,
    pub holder_count: f64,
    pub social_score: f64,
    pub developer_score: f64,
    pub tvl_ratio: f64,
    pub nft_activity: f64,
}

/// Category -> confidence in [0, 1]. Multi-label, need not sum to 1.
pub type CategoryScore = BTreeMap<Category, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub symbol: String,
    pub scores: CategoryScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<Category>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub secondary: Vec<Category>,
    /// Best score reached the minimum confidence; otherwise the asset is
    /// treated as unclassified and no primary/secondary is assigned.
    pub confident: bool,
    /// False when the text capability was unavailable and only feature
    /// scores contributed.
    pub text_scored: bool,
}

impl Classification {
    pub fn is_classified(&self) -> bool {
        self.confident
    }

    pub fn score(&self, category: Category) -> Option<f64> {
        self.scores.get(&category).copied()
    }
}
