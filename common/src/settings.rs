//! ControlNet設定（表示専用）
//!
//! Step2で表示する概念的な設定値。生成リクエストには一切含めない。

use serde::{Deserialize, Serialize};

pub const WEIGHT_RANGE: (f32, f32) = (0.0, 2.0);
pub const WEIGHT_STEP: f32 = 0.1;
pub const STEP_RANGE: (f32, f32) = (0.0, 1.0);
pub const STEP_STEP: f32 = 0.05;

/// 1ユニット分の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlUnit {
    pub label: String,
    pub control_type: String,
    pub model: String,
    pub weight: f32,
    pub start_step: f32,
    pub end_step: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    Weight,
    StartStep,
    EndStep,
}

impl ControlUnit {
    /// 入力文字列を反映する。数値でなければ前の値のまま
    pub fn set_from_input(&mut self, field: ControlField, input: &str) {
        let Ok(value) = input.trim().parse::<f32>() else {
            return;
        };
        if value.is_nan() {
            return;
        }
        match field {
            ControlField::Weight => self.weight = value.clamp(WEIGHT_RANGE.0, WEIGHT_RANGE.1),
            ControlField::StartStep => self.start_step = value.clamp(STEP_RANGE.0, STEP_RANGE.1),
            ControlField::EndStep => self.end_step = value.clamp(STEP_RANGE.0, STEP_RANGE.1),
        }
    }

    pub fn value(&self, field: ControlField) -> f32 {
        match field {
            ControlField::Weight => self.weight,
            ControlField::StartStep => self.start_step,
            ControlField::EndStep => self.end_step,
        }
    }
}

/// 設定ユニットの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitId {
    Face,
    Pose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlNetSettings {
    pub face: ControlUnit,
    pub pose: ControlUnit,
}

impl ControlNetSettings {
    pub fn unit(&self, id: UnitId) -> &ControlUnit {
        match id {
            UnitId::Face => &self.face,
            UnitId::Pose => &self.pose,
        }
    }

    pub fn unit_mut(&mut self, id: UnitId) -> &mut ControlUnit {
        match id {
            UnitId::Face => &mut self.face,
            UnitId::Pose => &mut self.pose,
        }
    }
}

impl Default for ControlNetSettings {
    fn default() -> Self {
        Self {
            face: ControlUnit {
                label: "Unit 0: IP-adapter Face".to_string(),
                control_type: "IP-adapter".to_string(),
                model: "ip-adapter-plus-face_sd15".to_string(),
                weight: 1.0,
                start_step: 0.0,
                end_step: 1.0,
            },
            pose: ControlUnit {
                label: "Unit 1: OpenPose".to_string(),
                control_type: "OpenPose".to_string(),
                model: "control_sd15_openpose".to_string(),
                weight: 1.0,
                start_step: 0.25,
                end_step: 0.8,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ControlNetSettings::default();
        assert_eq!(settings.face.model, "ip-adapter-plus-face_sd15");
        assert_eq!(settings.face.end_step, 1.0);
        assert_eq!(settings.pose.model, "control_sd15_openpose");
        assert_eq!(settings.pose.start_step, 0.25);
        assert_eq!(settings.pose.end_step, 0.8);
    }

    #[test]
    fn test_set_from_input_clamps() {
        let mut unit = ControlNetSettings::default().face;
        unit.set_from_input(ControlField::Weight, "3.5");
        assert_eq!(unit.weight, 2.0);
        unit.set_from_input(ControlField::StartStep, "-1");
        assert_eq!(unit.start_step, 0.0);
        unit.set_from_input(ControlField::EndStep, " 0.45 ");
        assert_eq!(unit.value(ControlField::EndStep), 0.45);
    }

    #[test]
    fn test_set_from_input_ignores_garbage() {
        let mut unit = ControlNetSettings::default().pose;
        unit.set_from_input(ControlField::Weight, "abc");
        unit.set_from_input(ControlField::Weight, "");
        unit.set_from_input(ControlField::Weight, "NaN");
        assert_eq!(unit.weight, 1.0);
    }

    #[test]
    fn test_unit_lookup() {
        let mut settings = ControlNetSettings::default();
        settings
            .unit_mut(UnitId::Pose)
            .set_from_input(ControlField::StartStep, "0.5");
        assert_eq!(settings.unit(UnitId::Pose).start_step, 0.5);
        assert_eq!(settings.unit(UnitId::Face).start_step, 0.0);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_string(&ControlNetSettings::default()).expect("シリアライズ失敗");
        assert!(json.contains("\"startStep\":0.25"));
        assert!(json.contains("\"endStep\":0.8"));
    }
}
