use crate::domain::model::{
    is_blank, BoneScore, ChoreographyComparison, ChoreographyResult, ChoreographyTable, Position,
    ScoreResult, TRACKED_BONES,
};
use crate::utils::error::{Result, ServiceError};
use serde_json::Value;
use std::collections::BTreeMap;

/// 距離 → 分數的門檻表。門檻皆為嚴格小於，超過最後一級給 `fallback`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub name: &'static str,
    pub tiers: &'static [(f64, u32)],
    pub fallback: u32,
}

impl ScoringPolicy {
    pub fn award(&self, distance: f64) -> u32 {
        self.tiers
            .iter()
            .find(|(threshold, _)| distance < *threshold)
            .map(|(_, points)| *points)
            .unwrap_or(self.fallback)
    }
}

/// 兩段式 user/model 快照比對使用的門檻
pub const SNAPSHOT_POLICY: ScoringPolicy = ScoringPolicy {
    name: "snapshot",
    tiers: &[(1.0, 100), (1.5, 70), (2.0, 40)],
    fallback: 1,
};

/// 單次請求對照參考舞步使用的門檻。
/// 與 SNAPSHOT_POLICY 不一致（尺度差十倍、最低分 0 而非 1），兩套門檻各自保留。
pub const CHOREOGRAPHY_POLICY: ScoringPolicy = ScoringPolicy {
    name: "choreography",
    tiers: &[(0.1, 100), (0.3, 70), (0.5, 40)],
    fallback: 0,
};

fn present<'a>(snapshot: &'a Value, bone: &str) -> Result<Option<&'a Value>> {
    let map = snapshot.as_object().ok_or_else(|| {
        ServiceError::computation(format!(
            "bone positions must be a JSON object, got {}",
            json_kind(snapshot)
        ))
    })?;
    Ok(map.get(bone).filter(|value| !is_blank(value)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// 逐一比對 19 個追蹤骨骼；任一邊缺少的骨骼記 0 分並保留 null
pub fn compare_snapshots(user: &Value, model: &Value, policy: &ScoringPolicy) -> Result<ScoreResult> {
    let mut results = Vec::with_capacity(TRACKED_BONES.len());
    let mut total_points = 0;

    for bone in TRACKED_BONES {
        let user_pos = present(user, bone)?;
        let model_pos = present(model, bone)?;

        let score = match (user_pos, model_pos) {
            (Some(user_value), Some(model_value)) => {
                let distance =
                    Position::from_value(user_value)?.distance(&Position::from_value(model_value)?);
                let points = policy.award(distance);
                total_points += points;
                BoneScore {
                    bone: bone.to_string(),
                    user_position: Some(user_value.clone()),
                    model_position: Some(model_value.clone()),
                    distance: Some(distance),
                    points,
                }
            }
            _ => BoneScore {
                bone: bone.to_string(),
                user_position: user_pos.cloned(),
                model_position: model_pos.cloned(),
                distance: None,
                points: 0,
            },
        };
        results.push(score);
    }

    Ok(ScoreResult {
        results,
        total_points,
    })
}

fn required_field<'a>(entry: &'a Value, field: &str) -> Result<&'a Value> {
    entry
        .get(field)
        .ok_or_else(|| ServiceError::computation(format!("missing field `{}`", field)))
}

/// 單次請求：`{"bones": [{"boneName", "position"}]}` 對照參考表評分。
/// 重複的骨骼名稱每筆都計入總分，`results` 只保留最後一筆。
pub fn score_against_choreography(
    payload: &Value,
    table: &ChoreographyTable,
    policy: &ScoringPolicy,
) -> Result<ChoreographyResult> {
    if !payload.is_object() {
        return Err(ServiceError::computation(format!(
            "request body must be a JSON object, got {}",
            json_kind(payload)
        )));
    }

    let bones: &[Value] = match payload.get("bones") {
        None => &[],
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) => {
            return Err(ServiceError::computation(format!(
                "`bones` must be an array, got {}",
                json_kind(other)
            )))
        }
    };

    let mut results = BTreeMap::new();
    let mut total_points = 0;

    for entry in bones {
        let bone_name = required_field(entry, "boneName")?
            .as_str()
            .ok_or_else(|| ServiceError::computation("`boneName` must be a string"))?;
        let player_position = required_field(entry, "position")?;

        let comparison = match table.get(bone_name) {
            Some(reference) => {
                let distance = Position::from_value(player_position)?.distance(reference);
                let points = policy.award(distance);
                total_points += points;
                ChoreographyComparison {
                    player_position: player_position.clone(),
                    choreography_position: Some(*reference),
                    distance: Some(distance),
                    points,
                }
            }
            None => ChoreographyComparison {
                player_position: player_position.clone(),
                choreography_position: None,
                distance: None,
                points: 0,
            },
        };
        results.insert(bone_name.to_string(), comparison);
    }

    Ok(ChoreographyResult {
        results,
        total_points,
    })
}
