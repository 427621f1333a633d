//! 금액대별 수동 기본값 테이블
//!
//! 시트 스캔보다 우선하는 확정 기본값. 운영상 변경될 수 있으므로
//! 파싱 로직과 분리해 JSON으로 교체 주입할 수 있게 한다.

use crate::error::Result;
use crate::types::GroupDefaults;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 금액(만원 단위) → 그룹별 기본 선택 개수
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsTable {
    entries: BTreeMap<u32, GroupDefaults>,
}

impl Default for DefaultsTable {
    fn default() -> Self {
        let entries = [
            (25, GroupDefaults::new(3, 0, 0)),
            (30, GroupDefaults::new(3, 0, 0)),
            (35, GroupDefaults::new(4, 0, 0)),
            (40, GroupDefaults::new(5, 0, 0)),
            (45, GroupDefaults::new(4, 1, 0)),
            (50, GroupDefaults::new(5, 1, 0)),
            (60, GroupDefaults::new(3, 1, 1)),
            (70, GroupDefaults::new(5, 1, 1)),
            (80, GroupDefaults::new(5, 2, 1)),
            (90, GroupDefaults::new(5, 3, 1)),
            (100, GroupDefaults::new(3, 3, 2)),
        ]
        .into_iter()
        .collect();
        Self { entries }
    }
}

impl DefaultsTable {
    /// JSON 파일에서 테이블을 읽는다
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table = serde_json::from_str(&content)?;
        Ok(table)
    }

    pub fn get(&self, price: u32) -> Option<GroupDefaults> {
        self.entries.get(&price).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_lookup() {
        let table = DefaultsTable::default();
        assert_eq!(table.get(25), Some(GroupDefaults::new(3, 0, 0)));
        assert_eq!(table.get(70), Some(GroupDefaults::new(5, 1, 1)));
        assert_eq!(table.get(100), Some(GroupDefaults::new(3, 3, 2)));
        assert_eq!(table.get(27), None);
    }

    #[test]
    fn test_table_roundtrip() {
        let table = DefaultsTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let loaded: DefaultsTable = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.get(90), Some(GroupDefaults::new(5, 3, 1)));
    }
}
