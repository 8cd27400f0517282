//! 比較スライダーの状態機械
//!
//! Idle --pointer down--> Dragging --pointer up--> Idle
//!
//! Dragging中のみポインタ移動を位置に反映する。表示専用の値で、
//! 画像そのものには影響しない。

use serde::{Deserialize, Serialize};

/// マウント時の初期位置
pub const INITIAL_POSITION: f64 = 0.5;

/// 表示領域のサイズ（px）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
        }
    }
}

/// 画面上の表示領域の水平位置（getBoundingClientRect の left/width）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub left: f64,
    pub width: f64,
}

impl ViewportBounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// ポインタのX座標を [0, 1] の割合に変換する
    ///
    /// 幅が0以下（レイアウト前など）の場合はNone
    pub fn fraction_at(&self, pointer_x: f64) -> Option<f64> {
        if self.width.is_nan() || self.width <= 0.0 || pointer_x.is_nan() {
            return None;
        }
        let offset = (pointer_x - self.left).clamp(0.0, self.width);
        Some(offset / self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    position: f64,
    phase: DragPhase,
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            phase: DragPhase::Idle,
        }
    }
}

impl SliderState {
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    /// ハンドル上でポインタが押された。遷移した場合true
    pub fn begin_drag(&mut self) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Dragging;
        true
    }

    /// ポインタ移動。Dragging中で位置が決まった場合のみ更新してtrue
    pub fn drag_to(&mut self, pointer_x: f64, bounds: ViewportBounds) -> bool {
        if !self.is_dragging() {
            return false;
        }
        match bounds.fraction_at(pointer_x) {
            Some(fraction) => {
                self.position = fraction;
                true
            }
            None => false,
        }
    }

    /// ポインタが離された（どこでも）。遷移した場合true
    pub fn end_drag(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.phase = DragPhase::Idle;
        true
    }

    pub fn percent(&self) -> f64 {
        self.position * 100.0
    }

    /// 「後」画像を仕切りの左側だけ見せる clip-path
    pub fn clip_path(&self) -> String {
        format!("inset(0 {}% 0 0)", 100.0 - self.percent())
    }

    /// ハンドルのCSS left値
    pub fn handle_left(&self) -> String {
        format!("{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ViewportBounds = ViewportBounds { left: 100.0, width: 500.0 };

    #[test]
    fn test_initial_state() {
        let slider = SliderState::default();
        assert_eq!(slider.position(), 0.5);
        assert_eq!(slider.phase(), DragPhase::Idle);
        assert_eq!(slider.clip_path(), "inset(0 50% 0 0)");
        assert_eq!(slider.handle_left(), "50%");
    }

    #[test]
    fn test_viewport_default() {
        assert_eq!(Viewport::default(), Viewport { width: 500, height: 300 });
    }

    #[test]
    fn test_move_is_ignored_while_idle() {
        let mut slider = SliderState::default();
        assert!(!slider.drag_to(150.0, BOUNDS));
        assert_eq!(slider.position(), 0.5);
    }

    #[test]
    fn test_drag_tracks_pointer() {
        let mut slider = SliderState::default();
        assert!(slider.begin_drag());
        assert!(slider.drag_to(225.0, BOUNDS));
        assert_eq!(slider.position(), 0.25);
        assert_eq!(slider.clip_path(), "inset(0 75% 0 0)");
    }

    #[test]
    fn test_drag_to_left_edge_is_zero() {
        let mut slider = SliderState::default();
        slider.begin_drag();
        slider.drag_to(100.0, BOUNDS);
        assert_eq!(slider.position(), 0.0);

        // 左にはみ出しても0
        slider.drag_to(-40.0, BOUNDS);
        assert_eq!(slider.position(), 0.0);
    }

    #[test]
    fn test_drag_past_right_edge_clamps_to_one() {
        let mut slider = SliderState::default();
        slider.begin_drag();
        slider.drag_to(9999.0, BOUNDS);
        assert_eq!(slider.position(), 1.0);
        assert_eq!(slider.clip_path(), "inset(0 0% 0 0)");
    }

    #[test]
    fn test_release_stops_updates() {
        let mut slider = SliderState::default();
        slider.begin_drag();
        slider.drag_to(400.0, BOUNDS);
        assert!(slider.end_drag());
        assert_eq!(slider.phase(), DragPhase::Idle);

        assert!(!slider.drag_to(150.0, BOUNDS));
        assert_eq!(slider.position(), 0.6);
    }

    #[test]
    fn test_repeated_transitions_are_noops() {
        let mut slider = SliderState::default();
        assert!(!slider.end_drag());
        assert!(slider.begin_drag());
        assert!(!slider.begin_drag());
        assert!(slider.end_drag());
        assert!(!slider.end_drag());
    }

    #[test]
    fn test_zero_width_viewport_is_ignored() {
        let mut slider = SliderState::default();
        slider.begin_drag();
        assert!(!slider.drag_to(10.0, ViewportBounds::new(0.0, 0.0)));
        assert_eq!(slider.position(), 0.5);
    }
}
