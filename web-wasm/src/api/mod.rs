//! 変換サービスAPI連携

pub mod gateway;
