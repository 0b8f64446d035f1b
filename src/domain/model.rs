use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 兩段式評分比對的 19 個骨骼名稱，順序即回報順序
pub const TRACKED_BONES: [&str; 19] = [
    "hips",
    "spine",
    "chest",
    "neck",
    "head",
    "leftShoulder",
    "leftUpperArm",
    "leftLowerArm",
    "leftHand",
    "rightShoulder",
    "rightUpperArm",
    "rightLowerArm",
    "rightHand",
    "leftUpperLeg",
    "leftLowerLeg",
    "leftFoot",
    "rightUpperLeg",
    "rightLowerLeg",
    "rightFoot",
];

/// 要啟動的服務組合；原始部署中 media 跑在 5000、scoring 跑在 5001
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Media,
    Scoring,
    #[default]
    All,
}

impl ServiceKind {
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceKind::Media | ServiceKind::All => 5000,
            ServiceKind::Scoring => 5001,
        }
    }

    pub fn serves_media(&self) -> bool {
        matches!(self, ServiceKind::Media | ServiceKind::All)
    }

    pub fn serves_scoring(&self) -> bool {
        matches!(self, ServiceKind::Scoring | ServiceKind::All)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Media => "media",
            ServiceKind::Scoring => "scoring",
            ServiceKind::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 從用戶端送來的原始 JSON 解析座標；缺欄位或非數值視為計算錯誤
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| ServiceError::computation(e.to_string()))
    }

    pub fn distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

/// 骨骼名稱 → 座標，保留原始 JSON 不做結構驗證
pub type BoneSnapshot = Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotSlot {
    User,
    Model,
}

impl SnapshotSlot {
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotSlot::User => "User",
            SnapshotSlot::Model => "Model",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotPair {
    pub user: Option<BoneSnapshot>,
    pub model: Option<BoneSnapshot>,
}

impl SnapshotPair {
    pub fn slot(&self, slot: SnapshotSlot) -> Option<&BoneSnapshot> {
        match slot {
            SnapshotSlot::User => self.user.as_ref(),
            SnapshotSlot::Model => self.model.as_ref(),
        }
    }

    pub fn set(&mut self, slot: SnapshotSlot, snapshot: BoneSnapshot) {
        match slot {
            SnapshotSlot::User => self.user = Some(snapshot),
            SnapshotSlot::Model => self.model = Some(snapshot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub const DEFAULT: &'static str = "default";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Landmark {
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoneScore {
    pub bone: String,
    pub user_position: Option<Value>,
    pub model_position: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub results: Vec<BoneScore>,
    pub total_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoreographyComparison {
    pub player_position: Value,
    pub choreography_position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoreographyResult {
    pub results: BTreeMap<String, ChoreographyComparison>,
    pub total_points: u32,
}

/// 單次評分使用的參考舞步座標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoreographyTable(BTreeMap<String, Position>);

impl ChoreographyTable {
    pub fn new(positions: BTreeMap<String, Position>) -> Self {
        Self(positions)
    }

    pub fn get(&self, bone: &str) -> Option<&Position> {
        self.0.get(bone)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Position)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ChoreographyTable {
    fn default() -> Self {
        let positions = [
            ("hips", Position::new(0.1, 1.4, -0.5)),
            ("chest", Position::new(0.2, 1.8, -0.55)),
            ("neck", Position::new(0.25, 2.0, -0.6)),
            ("head", Position::new(0.3, 2.2, -0.65)),
        ]
        .into_iter()
        .map(|(name, pos)| (name.to_string(), pos))
        .collect();
        Self(positions)
    }
}

#[derive(Debug, Clone)]
pub struct JobInput {
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl JobOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// JSON 的「空值」判斷：null、false、0、空字串、空陣列、空物件
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
