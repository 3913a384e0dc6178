//! 変換パラメータ（しきい値）の保持
//!
//! しきい値はプロセス内で1つだけ。永続化はしない。

/// しきい値の初期値
pub const DEFAULT_THRESHOLD: u8 = 50;

/// しきい値ストア
///
/// 設定パネルと送信フローで共有される。設定時に[0,100]へクランプする
/// 以外のバリデーションは持たない（入力面がレンジを制約している前提）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStore {
    value: u8,
}

impl ThresholdStore {
    pub fn new() -> Self {
        Self {
            value: DEFAULT_THRESHOLD,
        }
    }

    pub fn get(&self) -> u8 {
        self.value
    }

    pub fn set(&mut self, value: i64) {
        self.value = value.clamp(0, 100) as u8;
    }
}

impl Default for ThresholdStore {
    fn default() -> Self {
        Self::new()
    }
}
