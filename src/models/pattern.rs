use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    DoubleTop,
    DoubleBottom,
    HeadShoulders,
    Triangle,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::DoubleTop,
        PatternKind::DoubleBottom,
        PatternKind::HeadShoulders,
        PatternKind::Triangle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::DoubleTop => "double_top",
            PatternKind::DoubleBottom => "double_bottom",
            PatternKind::HeadShoulders => "head_shoulders",
            PatternKind::Triangle => "triangle",
        }
    }
}

/// A pattern holding at the series' final point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    #[serde(rename = "pattern")]
    pub pattern_kind: PatternKind,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Summary of one return/volatility regime cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterProfile {
    pub cluster_id: usize,
    pub member_count: usize,
    pub mean_return: f64,
    pub mean_volatility: f64,
}
